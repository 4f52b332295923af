use thiserror::Error;

use crate::event::ComponentEvent;

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Failures surfaced by the component framework while wiring validation.
///
/// An invalid field is never an error: it is recorded as `false` in the
/// validator. These variants cover the framework refusing a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{component} does not emit `{event}` events")]
    UnsupportedEvent {
        component: String,
        event: ComponentEvent,
    },

    #[error("{component} rejected the `{event}` handler: {reason}")]
    HandlerRejected {
        component: String,
        event: ComponentEvent,
        reason: String,
    },
}

impl ValidationError {
    #[must_use]
    pub fn unsupported(component: impl Into<String>, event: ComponentEvent) -> Self {
        Self::UnsupportedEvent {
            component: component.into(),
            event,
        }
    }

    #[must_use]
    pub fn rejected(
        component: impl Into<String>,
        event: ComponentEvent,
        reason: impl Into<String>,
    ) -> Self {
        Self::HandlerRejected {
            component: component.into(),
            event,
            reason: reason.into(),
        }
    }

    /// The event whose subscription failed.
    #[must_use]
    pub fn event(&self) -> &ComponentEvent {
        match self {
            Self::UnsupportedEvent { event, .. } | Self::HandlerRejected { event, .. } => event,
        }
    }
}
