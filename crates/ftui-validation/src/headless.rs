#![forbid(unsafe_code)]

//! In-memory components implementing the capability traits.
//!
//! These stand in for a real component framework when a form runs headless:
//! in tests, benches, and scripted flows. Each component keeps one handler
//! slot per event and dispatches synchronously through [`emit`]. Setting a
//! value programmatically does not emit anything; the `type_text` / `toggle`
//! / `pick` helpers model user input and emit the matching event.
//!
//! [`emit`]: TextBox::emit

use std::cell::{Cell, RefCell};

use ahash::AHashMap;

use crate::component::{CheckField, Component, Control, DateField, Indicator, TextField};
use crate::error::{Result, ValidationError};
use crate::event::{ComponentEvent, EventHandler};

/// Single-slot handler table shared by the headless components.
///
/// Canonical events must be listed in `native`; [`ComponentEvent::Named`]
/// events are always accepted.
struct EventSlots {
    name: String,
    native: &'static [ComponentEvent],
    handlers: RefCell<AHashMap<ComponentEvent, EventHandler>>,
}

impl EventSlots {
    fn new(name: String, native: &'static [ComponentEvent]) -> Self {
        Self {
            name,
            native,
            handlers: RefCell::new(AHashMap::new()),
        }
    }

    fn install(&self, event: &ComponentEvent, handler: EventHandler) -> Result<()> {
        let supported = matches!(event, ComponentEvent::Named(_)) || self.native.contains(event);
        if !supported {
            return Err(ValidationError::unsupported(self.name.clone(), event.clone()));
        }
        self.handlers.borrow_mut().insert(event.clone(), handler);
        Ok(())
    }

    fn emit(&self, event: &ComponentEvent) -> bool {
        // Release the table before dispatch; the handler may reinstall itself.
        let handler = self.handlers.borrow().get(event).cloned();
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    fn has_handler(&self, event: &ComponentEvent) -> bool {
        self.handlers.borrow().contains_key(event)
    }
}

const TEXT_BOX_EVENTS: &[ComponentEvent] =
    &[ComponentEvent::TextChanged, ComponentEvent::FocusLost];
const CHECK_BOX_EVENTS: &[ComponentEvent] =
    &[ComponentEvent::Toggled, ComponentEvent::FocusLost];
const DATE_PICKER_EVENTS: &[ComponentEvent] =
    &[ComponentEvent::DateChanged, ComponentEvent::FocusLost];

// ---------------------------------------------------------------------------
// TextBox
// ---------------------------------------------------------------------------

/// Single-line text input. Starts with no value.
pub struct TextBox {
    text: RefCell<Option<String>>,
    slots: EventSlots,
}

impl TextBox {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            text: RefCell::new(None),
            slots: EventSlots::new(name.into(), TEXT_BOX_EVENTS),
        }
    }

    /// Builder: start with `text` already entered.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.slots.name
    }

    /// Replace the value without emitting an event.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = Some(text.into());
    }

    /// Reset to the never-set state without emitting an event.
    pub fn clear(&self) {
        *self.text.borrow_mut() = None;
    }

    /// Replace the value as a user edit would, emitting `TextChanged`.
    pub fn type_text(&self, text: impl Into<String>) {
        self.set_text(text);
        self.emit(&ComponentEvent::TextChanged);
    }

    /// Move focus away, emitting `FocusLost`.
    pub fn blur(&self) {
        self.emit(&ComponentEvent::FocusLost);
    }

    /// Dispatch `event` to its handler. Returns whether a handler ran.
    pub fn emit(&self, event: &ComponentEvent) -> bool {
        self.slots.emit(event)
    }

    #[must_use]
    pub fn has_handler(&self, event: &ComponentEvent) -> bool {
        self.slots.has_handler(event)
    }
}

impl Component for TextBox {
    fn set_event_handler(&self, event: &ComponentEvent, handler: EventHandler) -> Result<()> {
        self.slots.install(event, handler)
    }
}

impl TextField for TextBox {
    fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }
}

// ---------------------------------------------------------------------------
// CheckBox
// ---------------------------------------------------------------------------

/// Two-state check box. Starts unchecked.
pub struct CheckBox {
    checked: Cell<bool>,
    slots: EventSlots,
}

impl CheckBox {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            checked: Cell::new(false),
            slots: EventSlots::new(name.into(), CHECK_BOX_EVENTS),
        }
    }

    #[must_use]
    pub fn with_checked(self, checked: bool) -> Self {
        self.checked.set(checked);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.slots.name
    }

    pub fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
    }

    /// Flip the state as a click would, emitting `Toggled`.
    pub fn toggle(&self) {
        self.checked.set(!self.checked.get());
        self.emit(&ComponentEvent::Toggled);
    }

    pub fn emit(&self, event: &ComponentEvent) -> bool {
        self.slots.emit(event)
    }

    #[must_use]
    pub fn has_handler(&self, event: &ComponentEvent) -> bool {
        self.slots.has_handler(event)
    }
}

impl Component for CheckBox {
    fn set_event_handler(&self, event: &ComponentEvent, handler: EventHandler) -> Result<()> {
        self.slots.install(event, handler)
    }
}

impl CheckField for CheckBox {
    fn is_checked(&self) -> bool {
        self.checked.get()
    }
}

// ---------------------------------------------------------------------------
// DatePicker
// ---------------------------------------------------------------------------

/// Date picker over any date representation `D`. Starts with no selection.
pub struct DatePicker<D> {
    date: RefCell<Option<D>>,
    slots: EventSlots,
}

impl<D: Clone> DatePicker<D> {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            date: RefCell::new(None),
            slots: EventSlots::new(name.into(), DATE_PICKER_EVENTS),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.slots.name
    }

    pub fn set_date(&self, date: Option<D>) {
        *self.date.borrow_mut() = date;
    }

    /// Select `date` as a user would, emitting `DateChanged`.
    pub fn pick(&self, date: D) {
        self.set_date(Some(date));
        self.emit(&ComponentEvent::DateChanged);
    }

    pub fn emit(&self, event: &ComponentEvent) -> bool {
        self.slots.emit(event)
    }

    #[must_use]
    pub fn has_handler(&self, event: &ComponentEvent) -> bool {
        self.slots.has_handler(event)
    }
}

impl<D> Component for DatePicker<D> {
    fn set_event_handler(&self, event: &ComponentEvent, handler: EventHandler) -> Result<()> {
        self.slots.install(event, handler)
    }
}

impl<D: Clone> DateField for DatePicker<D> {
    type Date = D;

    fn date(&self) -> Option<D> {
        self.date.borrow().clone()
    }
}

// ---------------------------------------------------------------------------
// Label / Button
// ---------------------------------------------------------------------------

/// Static text, typically used as an error indicator. Starts visible.
#[derive(Debug)]
pub struct Label {
    text: String,
    visible: Cell<bool>,
}

impl Label {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: Cell::new(true),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

impl Indicator for Label {
    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }
}

/// Push button. Starts enabled.
#[derive(Debug)]
pub struct Button {
    text: String,
    enabled: Cell<bool>,
}

impl Button {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            enabled: Cell::new(true),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

impl Control for Button {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }
}
