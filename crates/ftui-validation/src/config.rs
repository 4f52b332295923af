#![forbid(unsafe_code)]

//! Validator configuration.

use crate::event::ComponentEvent;

/// Event lists used by the convenience requirements
/// ([`require_text`](crate::Validator::require_text),
/// [`require_checked`](crate::Validator::require_checked),
/// [`require_date`](crate::Validator::require_date)).
///
/// Frameworks whose components use different event names override these
/// instead of falling back to [`register`](crate::Validator::register).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Events that re-validate a required text field.
    pub text_events: Vec<ComponentEvent>,
    /// Events that re-validate a required check field.
    pub checked_events: Vec<ComponentEvent>,
    /// Events that re-validate a required date field.
    pub date_events: Vec<ComponentEvent>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            text_events: vec![ComponentEvent::TextChanged, ComponentEvent::FocusLost],
            checked_events: vec![ComponentEvent::Toggled],
            date_events: vec![ComponentEvent::DateChanged],
        }
    }
}

impl ValidatorConfig {
    #[must_use]
    pub fn with_text_events(mut self, events: impl IntoIterator<Item = ComponentEvent>) -> Self {
        self.text_events = events.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_checked_events(
        mut self,
        events: impl IntoIterator<Item = ComponentEvent>,
    ) -> Self {
        self.checked_events = events.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_date_events(mut self, events: impl IntoIterator<Item = ComponentEvent>) -> Self {
        self.date_events = events.into_iter().collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_change_and_focus_loss_for_text() {
        let config = ValidatorConfig::default();
        assert_eq!(
            config.text_events,
            vec![ComponentEvent::TextChanged, ComponentEvent::FocusLost]
        );
        assert_eq!(config.checked_events, vec![ComponentEvent::Toggled]);
        assert_eq!(config.date_events, vec![ComponentEvent::DateChanged]);
    }

    #[test]
    fn builders_replace_event_lists() {
        let config = ValidatorConfig::default()
            .with_text_events([ComponentEvent::named("change")])
            .with_checked_events([ComponentEvent::named("change")])
            .with_date_events([]);
        assert_eq!(config.text_events, vec![ComponentEvent::named("change")]);
        assert_eq!(config.checked_events, vec![ComponentEvent::named("change")]);
        assert!(config.date_events.is_empty());
    }
}
