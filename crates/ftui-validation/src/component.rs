#![forbid(unsafe_code)]

//! Capability traits a UI component framework implements so its components
//! can be tracked by a [`Validator`](crate::Validator).
//!
//! Each trait exposes only what validation touches: event subscription on
//! tracked components, the value accessors read by the convenience
//! requirements, and the two writable properties validation drives
//! (indicator visibility and control enablement). Components are shared with
//! the owning form as `Rc<C>`, so every method takes `&self` and
//! implementations use interior mutability.

use std::rc::{Rc, Weak};

use crate::error::Result;
use crate::event::{ComponentEvent, EventHandler};

/// A component that emits events.
pub trait Component {
    /// Install `handler` for `event`, replacing any handler previously
    /// installed for the same event.
    ///
    /// # Errors
    ///
    /// Returns an error if the component does not emit `event` or refuses the
    /// handler.
    fn set_event_handler(&self, event: &ComponentEvent, handler: EventHandler) -> Result<()>;
}

/// A component holding an optional text value.
pub trait TextField: Component {
    /// Current text, `None` if the component has never held a value.
    fn text(&self) -> Option<String>;
}

/// A component with a checked state.
pub trait CheckField: Component {
    fn is_checked(&self) -> bool;
}

/// A component holding an optional date selection.
pub trait DateField: Component {
    type Date;

    /// Currently selected date, if any.
    fn date(&self) -> Option<Self::Date>;
}

/// An error indicator whose visibility validation controls.
pub trait Indicator {
    fn set_visible(&self, visible: bool);
}

/// A control whose enabled state follows aggregate validity.
pub trait Control {
    fn set_enabled(&self, enabled: bool);
}

/// Identity of a tracked component: the address of its shared allocation.
///
/// The address stays reserved while any `Weak` to the allocation exists, and
/// the validator keeps one for every key it stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ComponentKey(usize);

impl ComponentKey {
    pub(crate) fn of<C: ?Sized>(component: &Rc<C>) -> Self {
        Self(Rc::as_ptr(component).cast::<()>() as usize)
    }

    pub(crate) fn of_weak<C: ?Sized>(component: &Weak<C>) -> Self {
        Self(component.as_ptr().cast::<()>() as usize)
    }
}
