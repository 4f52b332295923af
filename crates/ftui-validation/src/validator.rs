#![forbid(unsafe_code)]

//! The form validator.
//!
//! # Design
//!
//! A [`Validator`] is a handle over shared, single-threaded state
//! (`Rc<..>` with interior mutability). The state holds three things:
//!
//! - `validity`: the last predicate result per tracked component,
//! - `checks`: one owned check record per `register` / `validate_now` call,
//!   in call order,
//! - `actions`: callbacks over the aggregate validity, in registration order.
//!
//! A check record holds a `Weak` to its component, the predicate, and an
//! optional `Weak` to an error indicator. Running a check evaluates the
//! predicate, stores the result, sets the indicator's visibility to the
//! negated result, then recomputes the aggregate and hands it to every
//! action. Handlers installed on components hold the check record and a
//! `Weak` to the validator state, so they go inert once every `Validator`
//! handle is dropped. A check is armed only once it is recorded in `checks`;
//! handlers of an unarmed check do nothing, so a registration that failed
//! partway never writes `validity`.
//!
//! # Invariants
//!
//! 1. After a check runs, `validity` holds that predicate's latest result for
//!    its component; with several checks on one component, the last to run
//!    wins.
//! 2. The aggregate is the AND over `validity`; an empty map is valid.
//! 3. Every run of a check broadcasts the aggregate to all actions, in
//!    registration order.
//! 4. No `RefCell` borrow is held while predicates, indicator writes, or
//!    actions run, so any of them may read the validator.
//! 5. Only recorded checks write `validity`, so every key has a check in
//!    `checks` holding a `Weak` to its component. After
//!    [`Validator::show_all_errors`], the keys are exactly the live
//!    components with a recorded check.
//!
//! # Failure Modes
//!
//! - **Component dropped**: its checks are skipped when replayed and are
//!   pruned by [`Validator::show_all_errors`], together with its validity
//!   entry.
//! - **Re-entrant validation**: a predicate or action that triggers another
//!   check on the same validator runs that check to completion first
//!   (depth-first). Action notifications then interleave; the final aggregate
//!   is still consistent.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use ahash::{AHashMap, AHashSet};

use crate::component::{
    CheckField, Component, ComponentKey, Control, DateField, Indicator, TextField,
};
use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::event::{ComponentEvent, EventHandler};
use crate::feedback::ErrorFeedback;

type Action = Rc<dyn Fn(bool)>;

/// What a check run does with the component's error indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reveal {
    /// Indicator visible exactly when the component is invalid.
    Sync,
    /// Indicator hidden regardless of the result.
    Hide,
}

/// A tracked binding, type-erased over the component type.
trait Check {
    fn key(&self) -> ComponentKey;

    /// Evaluate the predicate, or `None` if the component is gone.
    fn evaluate(&self) -> Option<bool>;

    fn indicator(&self) -> Option<Rc<dyn Indicator>>;

    /// Mark the check as recorded; event handlers ignore it until then.
    fn arm(&self);

    fn is_armed(&self) -> bool;
}

struct Binding<C: ?Sized> {
    key: ComponentKey,
    component: Weak<C>,
    predicate: Box<dyn Fn(&C) -> bool>,
    indicator: Option<Weak<dyn Indicator>>,
    armed: Cell<bool>,
}

impl<C: ?Sized> Check for Binding<C> {
    fn key(&self) -> ComponentKey {
        self.key
    }

    fn evaluate(&self) -> Option<bool> {
        let component = self.component.upgrade()?;
        Some((self.predicate)(&*component))
    }

    fn indicator(&self) -> Option<Rc<dyn Indicator>> {
        self.indicator.as_ref().and_then(Weak::upgrade)
    }

    fn arm(&self) {
        self.armed.set(true);
    }

    fn is_armed(&self) -> bool {
        self.armed.get()
    }
}

#[derive(Default)]
struct Registry {
    validity: AHashMap<ComponentKey, bool>,
    checks: Vec<Rc<dyn Check>>,
    actions: Vec<Action>,
}

impl Registry {
    fn is_valid(&self) -> bool {
        self.validity.values().all(|&valid| valid)
    }
}

struct Shared {
    registry: RefCell<Registry>,
    config: ValidatorConfig,
    /// Number of check runs currently on the stack.
    depth: Cell<u32>,
}

/// Keeps `Shared::depth` balanced across early returns and unwinding.
struct DepthGuard<'a>(&'a Cell<u32>);

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<u32>) -> Self {
        depth.set(depth.get() + 1);
        Self(depth)
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

impl Shared {
    fn is_valid(&self) -> bool {
        self.registry.borrow().is_valid()
    }

    /// Evaluate, store, toggle the indicator, broadcast.
    ///
    /// Returns the component's result, or `None` (and changes nothing) if the
    /// component is gone.
    fn run(&self, check: &dyn Check, reveal: Reveal) -> Option<bool> {
        let _guard = DepthGuard::enter(&self.depth);
        #[cfg(feature = "tracing")]
        Self::log_depth(self.depth.get());

        let Some(valid) = check.evaluate() else {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "validator.detached");
            return None;
        };
        self.registry
            .borrow_mut()
            .validity
            .insert(check.key(), valid);
        if let Some(indicator) = check.indicator() {
            indicator.set_visible(reveal == Reveal::Sync && !valid);
        }
        #[cfg(feature = "tracing")]
        Self::log_check(valid, reveal);

        self.broadcast();
        Some(valid)
    }

    fn broadcast(&self) {
        let (valid, actions) = {
            let registry = self.registry.borrow();
            (registry.is_valid(), registry.actions.clone())
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(
            message = "validator.broadcast",
            valid,
            actions = actions.len()
        );
        for action in &actions {
            action(valid);
        }
    }

    /// Record `check` and arm its handlers.
    fn record(&self, check: &Rc<dyn Check>) {
        self.registry.borrow_mut().checks.push(Rc::clone(check));
        check.arm();
    }

    /// Drop detached checks and any validity entry left without a recorded
    /// check.
    ///
    /// Returns whether the validity map changed.
    fn prune(&self, detached: &[Rc<dyn Check>]) -> bool {
        let mut registry = self.registry.borrow_mut();
        registry
            .checks
            .retain(|check| !detached.iter().any(|gone| Rc::ptr_eq(check, gone)));
        let live: AHashSet<ComponentKey> = registry.checks.iter().map(|c| c.key()).collect();
        let before = registry.validity.len();
        registry.validity.retain(|key, _| live.contains(key));
        let removed = before - registry.validity.len();
        #[cfg(feature = "tracing")]
        Self::log_prune(detached.len(), removed);
        removed > 0
    }

    #[cfg(feature = "tracing")]
    fn log_check(valid: bool, reveal: Reveal) {
        tracing::debug!(message = "validator.check", valid, reveal = ?reveal);
    }

    #[cfg(feature = "tracing")]
    fn log_prune(checks: usize, entries: usize) {
        if checks > 0 || entries > 0 {
            tracing::debug!(message = "validator.prune", checks, entries);
        }
    }

    #[cfg(feature = "tracing")]
    fn log_depth(depth: u32) {
        if depth > 1 {
            tracing::warn!(message = "validator.reentrant", depth);
        }
    }
}

/// Tracks the validity of a set of components and drives error indicators
/// and dependent controls from it.
///
/// Cloning a `Validator` creates a new handle to the **same** state.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use ftui_validation::headless::{Button, CheckBox, Label, TextBox};
/// use ftui_validation::{ErrorFeedback, Validator};
///
/// let name = Rc::new(TextBox::new("name_box"));
/// let name_missing = Rc::new(Label::new("Please enter your name"));
/// let tos = Rc::new(CheckBox::new("tos_accept_cbx"));
/// let submit = Rc::new(Button::new("Sign up"));
///
/// let validator = Validator::new();
/// validator.require_text(&name, ErrorFeedback::indicator(&name_missing))?;
/// validator.require_checked(&tos, ErrorFeedback::none())?;
/// validator.enable_when_valid(&submit);
///
/// // Clean form: errors hidden, submit disabled.
/// assert!(!name_missing.is_visible());
/// assert!(!submit.is_enabled());
///
/// name.type_text("Ada");
/// tos.toggle();
/// assert!(submit.is_enabled());
/// # Ok::<(), ftui_validation::ValidationError>(())
/// ```
#[derive(Clone)]
pub struct Validator {
    shared: Rc<Shared>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.shared.registry.borrow();
        f.debug_struct("Validator")
            .field("tracked", &registry.validity.len())
            .field("checks", &registry.checks.len())
            .field("actions", &registry.actions.len())
            .field("valid", &registry.is_valid())
            .finish()
    }
}

impl Validator {
    /// Empty validator with the default event lists.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    #[must_use]
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            shared: Rc::new(Shared {
                registry: RefCell::new(Registry::default()),
                config,
                depth: Cell::new(0),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.shared.config
    }

    /// Track `component` with `predicate`, re-validating on each of `events`.
    ///
    /// One handler is installed for every event (replacing whatever the
    /// component had for that event) and the check is appended to the replay
    /// list used by [`show_all_errors`](Self::show_all_errors). The
    /// predicate is evaluated right away and the aggregate is broadcast, so
    /// [`enable_when_valid`](Self::enable_when_valid) targets are correct
    /// before any event fires. The error indicator is hidden at this point
    /// unless `feedback` asks to show errors immediately.
    ///
    /// An empty `events` list is allowed: the component's validity is
    /// recorded but only replays and [`validate_now`](Self::validate_now)
    /// update it.
    ///
    /// # Errors
    ///
    /// Propagates the first subscription the component refuses. Handlers
    /// installed before the failure stay in place but are inert: the check
    /// is not recorded and never touches the validator.
    pub fn register<C, P>(
        &self,
        component: &Rc<C>,
        events: impl IntoIterator<Item = ComponentEvent>,
        predicate: P,
        feedback: ErrorFeedback,
    ) -> Result<()>
    where
        C: Component + ?Sized + 'static,
        P: Fn(&C) -> bool + 'static,
    {
        let (check, show_immediately) = Self::bind(component, predicate, feedback);
        let handler = self.handler(&check);
        for event in events {
            component.set_event_handler(&event, Rc::clone(&handler))?;
        }
        self.shared.record(&check);

        let reveal = if show_immediately {
            Reveal::Sync
        } else {
            Reveal::Hide
        };
        self.shared.run(&*check, reveal);
        Ok(())
    }

    /// Validate `component` once, right now, and remember the check for
    /// [`show_all_errors`](Self::show_all_errors).
    ///
    /// For application event handlers that need validation inline; no event
    /// subscription happens. The indicator (if any) is always synced to the
    /// result. Returns the component's result.
    pub fn validate_now<C, P>(
        &self,
        component: &Rc<C>,
        predicate: P,
        feedback: ErrorFeedback,
    ) -> bool
    where
        C: ?Sized + 'static,
        P: Fn(&C) -> bool + 'static,
    {
        let (check, _) = Self::bind(component, predicate, feedback);
        self.shared.record(&check);
        self.shared.run(&*check, Reveal::Sync).unwrap_or(false)
    }

    /// Require a non-empty text value.
    ///
    /// Re-validates on [`ValidatorConfig::text_events`].
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn require_text<C>(&self, component: &Rc<C>, feedback: ErrorFeedback) -> Result<()>
    where
        C: TextField + ?Sized + 'static,
    {
        let events = self.shared.config.text_events.clone();
        self.register(
            component,
            events,
            |field: &C| field.text().is_some_and(|text| !text.is_empty()),
            feedback,
        )
    }

    /// Require the component to be checked.
    ///
    /// Re-validates on [`ValidatorConfig::checked_events`].
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn require_checked<C>(&self, component: &Rc<C>, feedback: ErrorFeedback) -> Result<()>
    where
        C: CheckField + ?Sized + 'static,
    {
        let events = self.shared.config.checked_events.clone();
        self.register(component, events, |field: &C| field.is_checked(), feedback)
    }

    /// Require a date to be selected.
    ///
    /// Re-validates on [`ValidatorConfig::date_events`].
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn require_date<C>(&self, component: &Rc<C>, feedback: ErrorFeedback) -> Result<()>
    where
        C: DateField + ?Sized + 'static,
    {
        let events = self.shared.config.date_events.clone();
        self.register(
            component,
            events,
            |field: &C| field.date().is_some(),
            feedback,
        )
    }

    /// Keep `control` enabled exactly while the form is valid.
    ///
    /// The control is updated immediately and after every check run.
    pub fn enable_when_valid<E>(&self, control: &Rc<E>)
    where
        E: Control + ?Sized + 'static,
    {
        let target = Rc::downgrade(control);
        self.on_validity_change(move |valid| {
            if let Some(control) = target.upgrade() {
                control.set_enabled(valid);
            }
        });
    }

    /// Call `action` with the aggregate validity after every check run.
    ///
    /// `action` is also called once immediately with the current aggregate.
    pub fn on_validity_change(&self, action: impl Fn(bool) + 'static) {
        let action: Action = Rc::new(action);
        self.shared
            .registry
            .borrow_mut()
            .actions
            .push(Rc::clone(&action));
        action(self.is_valid());
    }

    /// Whether every tracked component passed its latest check.
    ///
    /// True when nothing is tracked.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.shared.is_valid()
    }

    /// Re-run every check in registration order.
    ///
    /// This is the path that reveals indicators of components that were
    /// registered quietly and never fired an event. Actions run once per
    /// check. Checks whose component has been dropped are removed, along
    /// with validity entries no recorded check refers to; if that changes
    /// the validity map, the aggregate is broadcast once more.
    pub fn show_all_errors(&self) {
        let checks = self.shared.registry.borrow().checks.clone();
        let mut detached = Vec::new();
        for check in &checks {
            if self.shared.run(&**check, Reveal::Sync).is_none() {
                detached.push(Rc::clone(check));
            }
        }
        if self.shared.prune(&detached) {
            self.shared.broadcast();
        }
    }

    /// Latest result recorded for `component`, if it is tracked.
    #[must_use]
    pub fn validity_of<C: ?Sized>(&self, component: &Rc<C>) -> Option<bool> {
        self.shared
            .registry
            .borrow()
            .validity
            .get(&ComponentKey::of(component))
            .copied()
    }

    /// Number of distinct tracked components.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.shared.registry.borrow().validity.len()
    }

    /// Number of checks replayed by [`show_all_errors`](Self::show_all_errors).
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.shared.registry.borrow().checks.len()
    }

    #[must_use]
    pub fn action_count(&self) -> usize {
        self.shared.registry.borrow().actions.len()
    }

    fn bind<C, P>(
        component: &Rc<C>,
        predicate: P,
        feedback: ErrorFeedback,
    ) -> (Rc<dyn Check>, bool)
    where
        C: ?Sized + 'static,
        P: Fn(&C) -> bool + 'static,
    {
        let (indicator, show_immediately) = feedback.into_parts();
        let component = Rc::downgrade(component);
        let check: Rc<dyn Check> = Rc::new(Binding {
            key: ComponentKey::of_weak(&component),
            component,
            predicate: Box::new(predicate),
            indicator,
            armed: Cell::new(false),
        });
        (check, show_immediately)
    }

    fn handler(&self, check: &Rc<dyn Check>) -> EventHandler {
        let shared = Rc::downgrade(&self.shared);
        let check = Rc::clone(check);
        Rc::new(move || {
            if !check.is_armed() {
                return;
            }
            if let Some(shared) = shared.upgrade() {
                shared.run(&*check, Reveal::Sync);
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
