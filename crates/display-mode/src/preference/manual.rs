//! Host-driven preference source.

use std::cell::Cell;

use super::{Listeners, PreferenceListener, PreferenceSource, SubscriptionId};

/// A preference signal whose value the host pushes in.
///
/// In a browser the host wires the `(prefers-color-scheme: dark)` media
/// query's change event to [`set`](ManualPreference::set), using whichever
/// listener API the engine supports.
#[derive(Debug, Default)]
pub struct ManualPreference {
    prefers_dark: Cell<bool>,
    listeners: Listeners,
}

impl ManualPreference {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            prefers_dark: Cell::new(prefers_dark),
            listeners: Listeners::default(),
        }
    }

    /// Updates the signal, notifying listeners if the value changed.
    pub fn set(&self, prefers_dark: bool) {
        if self.prefers_dark.replace(prefers_dark) != prefers_dark {
            self.listeners.notify(prefers_dark);
        }
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl PreferenceSource for ManualPreference {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark.get()
    }

    fn subscribe(&self, listener: PreferenceListener) -> SubscriptionId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_set_notifies_only_on_change() {
        let source = ManualPreference::new(false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        source.subscribe(Rc::new(move |dark: bool| sink.borrow_mut().push(dark)));

        source.set(false);
        source.set(true);
        source.set(true);
        source.set(false);

        assert_eq!(*seen.borrow(), vec![true, false]);
        assert!(!source.prefers_dark());
    }

    #[test]
    fn test_unsubscribed_listener_is_not_called() {
        let source = ManualPreference::new(false);
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let id = source.subscribe(Rc::new(move |_: bool| sink.set(sink.get() + 1)));

        assert!(source.unsubscribe(id));
        source.set(true);
        assert_eq!(seen.get(), 0);
        assert_eq!(source.listener_count(), 0);
    }
}
