#![forbid(unsafe_code)]

//! Form validation for FrankenTUI component trees.
//!
//! A [`Validator`] pairs input components with validity predicates, installs
//! re-validation handlers on their events, tracks aggregate validity, toggles
//! per-field error indicators, and keeps dependent controls (a submit button,
//! say) enabled only while the whole form is valid.
//!
//! - [`component`]: capability traits a component framework implements.
//! - [`event`]: event names and the handler type.
//! - [`feedback`]: error-indicator settings per requirement.
//! - [`config`]: event lists used by the convenience requirements.
//! - [`headless`]: in-memory components for tests and headless forms.
//!
//! Everything is single-threaded and synchronous; validation runs inside the
//! host's event dispatch.

pub mod component;
pub mod config;
pub mod error;
pub mod event;
pub mod feedback;
pub mod headless;
pub mod validator;

pub use component::{CheckField, Component, Control, DateField, Indicator, TextField};
pub use config::ValidatorConfig;
pub use error::{Result, ValidationError};
pub use event::{ComponentEvent, EventHandler};
pub use feedback::ErrorFeedback;
pub use validator::Validator;
