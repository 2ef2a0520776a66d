//! OS colour-scheme preference sources.
//!
//! The controller consults the preference only while the mode is `auto`,
//! and only through [`PreferenceSource`]. Whatever the platform offers
//! (a `matchMedia` query with either listener API, a desktop setting, a
//! test fixture) is adapted at this boundary.
//!
//! - [`ManualPreference`]: host-driven; the host forwards change events.
//! - [`SystemPreference`]: queries the OS through `dark-light`. Override the
//!   detector for testing with [`set_preference_detector`].

mod manual;
mod system;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

pub use manual::ManualPreference;
pub use system::{detect_preference, set_preference_detector, SystemPreference};

/// Callback invoked with the new "prefers dark" value.
pub type PreferenceListener = Rc<dyn Fn(bool)>;

/// Handle returned by [`PreferenceSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A read-only "does the platform prefer a dark colour scheme" signal.
pub trait PreferenceSource {
    /// Returns the current value of the signal.
    fn prefers_dark(&self) -> bool;

    /// Registers a listener called whenever the signal changes.
    fn subscribe(&self, listener: PreferenceListener) -> SubscriptionId;

    /// Removes a listener. Returns `false` if the id was not registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Listener bookkeeping shared by the bundled sources.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(SubscriptionId, PreferenceListener)>>,
}

impl Listeners {
    pub(crate) fn add(&self, listener: PreferenceListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, listener));
        id
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Calls every listener with `prefers_dark`.
    ///
    /// The list is snapshotted first so a listener may subscribe or
    /// unsubscribe without a borrow conflict.
    pub(crate) fn notify(&self, prefers_dark: bool) {
        let snapshot: Vec<PreferenceListener> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(prefers_dark);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}
