#![forbid(unsafe_code)]

//! How a tracked component reports failure: an optional error indicator and
//! whether it is revealed at registration time.

use std::rc::{Rc, Weak};

use crate::component::Indicator;

/// Error-indicator settings for one requirement.
///
/// By default nothing is shown until the component fires one of its events
/// (or [`show_all_errors`](crate::Validator::show_all_errors) runs), so a
/// freshly opened form looks clean.
#[derive(Debug, Clone, Default)]
pub struct ErrorFeedback {
    indicator: Option<Weak<dyn Indicator>>,
    show_immediately: bool,
}

impl ErrorFeedback {
    /// No error indicator.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Show `indicator` while the component is invalid.
    ///
    /// Only a weak reference is kept; the indicator stays owned by the form.
    #[must_use]
    pub fn indicator<I: Indicator + 'static>(indicator: &Rc<I>) -> Self {
        let weak: Weak<I> = Rc::downgrade(indicator);
        Self::from_weak(weak)
    }

    /// Like [`indicator`](Self::indicator), for an indicator already erased
    /// to a trait object.
    #[must_use]
    pub fn indicator_dyn(indicator: &Rc<dyn Indicator>) -> Self {
        Self::from_weak(Rc::downgrade(indicator))
    }

    fn from_weak(indicator: Weak<dyn Indicator>) -> Self {
        Self {
            indicator: Some(indicator),
            show_immediately: false,
        }
    }

    /// Reveal the indicator at registration if the component already fails.
    #[must_use]
    pub fn show_immediately(mut self, show: bool) -> Self {
        self.show_immediately = show;
        self
    }

    #[inline]
    #[must_use]
    pub fn shows_immediately(&self) -> bool {
        self.show_immediately
    }

    #[inline]
    #[must_use]
    pub fn has_indicator(&self) -> bool {
        self.indicator.is_some()
    }

    pub(crate) fn into_parts(self) -> (Option<Weak<dyn Indicator>>, bool) {
        (self.indicator, self.show_immediately)
    }
}
