//! The host layer that receives the controller's output.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::view::{DocumentFlags, ViewChange, ViewState};

/// Applies controller output to a document (or anything standing in for one).
///
/// In a browser, `apply_flags` maps to the root element's `data-theme`
/// attribute and `theme-dim` class, `render_control` patches the button,
/// `announce` writes the polite live region and `set_idle` toggles the
/// control's `is-idle` class.
pub trait Surface {
    /// Writes the page-level flags. Always called with both flags together.
    fn apply_flags(&mut self, flags: &DocumentFlags);

    /// Updates the control. `changes` is empty only when nothing changed
    /// since the previous call, in which case hosts may skip the update.
    fn render_control(&mut self, view: &ViewState, changes: &[ViewChange]);

    /// Announces a message to assistive technology.
    fn announce(&mut self, message: &str);

    /// Shows or fades the control.
    fn set_idle(&mut self, idle: bool);
}

impl<T: Surface + ?Sized> Surface for Box<T> {
    fn apply_flags(&mut self, flags: &DocumentFlags) {
        (**self).apply_flags(flags)
    }

    fn render_control(&mut self, view: &ViewState, changes: &[ViewChange]) {
        (**self).render_control(view, changes)
    }

    fn announce(&mut self, message: &str) {
        (**self).announce(message)
    }

    fn set_idle(&mut self, idle: bool) {
        (**self).set_idle(idle)
    }
}

/// What a [`RecordingSurface`] has seen.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub flags: Option<DocumentFlags>,
    pub flag_writes: usize,
    pub view: Option<ViewState>,
    pub renders: usize,
    pub last_changes: Vec<ViewChange>,
    pub announcements: Vec<String>,
    pub idle: bool,
}

/// A surface that records everything it is given.
///
/// Clones share the recording, so tests and headless hosts can keep a handle
/// after passing a clone to the controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    inner: Rc<RefCell<Recording>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the current recording.
    pub fn recording(&self) -> Ref<'_, Recording> {
        self.inner.borrow()
    }

    pub fn flags(&self) -> Option<DocumentFlags> {
        self.inner.borrow().flags
    }

    pub fn view(&self) -> Option<ViewState> {
        self.inner.borrow().view.clone()
    }

    pub fn announcements(&self) -> Vec<String> {
        self.inner.borrow().announcements.clone()
    }

    pub fn is_idle(&self) -> bool {
        self.inner.borrow().idle
    }
}

impl Surface for RecordingSurface {
    fn apply_flags(&mut self, flags: &DocumentFlags) {
        let mut rec = self.inner.borrow_mut();
        rec.flags = Some(*flags);
        rec.flag_writes += 1;
    }

    fn render_control(&mut self, view: &ViewState, changes: &[ViewChange]) {
        let mut rec = self.inner.borrow_mut();
        rec.view = Some(view.clone());
        rec.renders += 1;
        rec.last_changes = changes.to_vec();
    }

    fn announce(&mut self, message: &str) {
        self.inner
            .borrow_mut()
            .announcements
            .push(message.to_string());
    }

    fn set_idle(&mut self, idle: bool) {
        self.inner.borrow_mut().idle = idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::DisplayMode;

    #[test]
    fn test_clones_share_recording() {
        let surface = RecordingSurface::new();
        let mut handle = surface.clone();
        handle.apply_flags(&DocumentFlags::for_mode(DisplayMode::Dark));
        handle.announce("Dark mode enabled");
        handle.set_idle(true);

        assert_eq!(surface.flags().map(|f| f.mode()), Some(DisplayMode::Dark));
        assert_eq!(surface.recording().flag_writes, 1);
        assert_eq!(surface.announcements(), vec!["Dark mode enabled"]);
        assert!(surface.is_idle());
    }
}
