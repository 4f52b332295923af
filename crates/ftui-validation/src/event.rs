#![forbid(unsafe_code)]

//! Component event names and the handler type installed on components.
//!
//! The component model is single-handler-per-event: installing a handler for
//! an event replaces whatever was installed for that event before.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Callback installed on a component for one event.
///
/// Handlers take no arguments; anything the framework would pass along with
/// the event is ignored by validation handlers.
pub type EventHandler = Rc<dyn Fn()>;

/// Name of an event a component can emit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentEvent {
    /// The component's text value changed.
    TextChanged,
    /// The component lost keyboard focus.
    FocusLost,
    /// A checkable component was toggled.
    Toggled,
    /// A date picker's selection changed.
    DateChanged,
    /// Framework-specific event name.
    Named(Cow<'static, str>),
}

impl ComponentEvent {
    /// Build an event from its name, mapping well-known names to their
    /// dedicated variants.
    #[must_use]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        match name.as_ref() {
            "text-changed" => Self::TextChanged,
            "focus-lost" => Self::FocusLost,
            "toggled" => Self::Toggled,
            "date-changed" => Self::DateChanged,
            _ => Self::Named(name),
        }
    }

    /// Canonical name of this event.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::TextChanged => "text-changed",
            Self::FocusLost => "focus-lost",
            Self::Toggled => "toggled",
            Self::DateChanged => "date-changed",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for ComponentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&'static str> for ComponentEvent {
    fn from(name: &'static str) -> Self {
        Self::named(name)
    }
}

impl From<String> for ComponentEvent {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}
