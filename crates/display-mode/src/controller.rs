//! The theme-mode controller.
//!
//! Owns the current [`DisplayMode`], mirrors it to a [`ModeStore`], projects
//! it onto a [`Surface`], and keeps the control in sync with the OS
//! preference while the mode is `auto`.
//!
//! # Lifecycle
//!
//! [`ThemeModeController::initialize`] is the only constructor: it loads the
//! stored mode (migrating the legacy keys if needed), applies it, renders the
//! control and subscribes to the preference source. A controller is therefore
//! initialized exactly once; keeping to one controller per page is up to the
//! host. Dropping the controller unsubscribes it.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use display_mode::{
//!     ControllerConfig, DisplayMode, ManualPreference, MemoryStore, RecordingSurface,
//!     ThemeModeController,
//! };
//!
//! let store = MemoryStore::new().with("display-mode", "dark");
//! let surface = RecordingSurface::new();
//! let mut controller = ThemeModeController::initialize(
//!     ControllerConfig::default(),
//!     store.clone(),
//!     Rc::new(ManualPreference::new(false)),
//!     surface.clone(),
//! ).unwrap();
//!
//! assert_eq!(controller.mode(), DisplayMode::Dark);
//! assert_eq!(controller.cycle(), DisplayMode::DarkDim);
//! assert_eq!(store.peek("display-mode").as_deref(), Some("dark+dim"));
//! assert!(surface.flags().unwrap().dimmed());
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Instant;

use crate::config::ControllerConfig;
use crate::error::ModeError;
use crate::idle::{Activity, IdleFade, Rect};
use crate::mode::DisplayMode;
use crate::preference::{PreferenceSource, SubscriptionId};
use crate::store::ModeStore;
use crate::surface::Surface;
use crate::view::{DocumentFlags, LabelRenderer, ViewState};

/// Literal the standalone dim toggle stored when the overlay was on.
const LEGACY_DIM_ON: &str = "on";

/// State reachable from the preference listener.
struct Shared {
    mode: DisplayMode,
    renderer: LabelRenderer,
    surface: Box<dyn Surface>,
    last_view: Option<ViewState>,
}

impl Shared {
    fn apply(&mut self) -> DocumentFlags {
        let flags = DocumentFlags::for_mode(self.mode);
        self.surface.apply_flags(&flags);
        flags
    }

    fn render(&mut self, prefers_dark: bool) -> ViewState {
        let view = self.renderer.render(self.mode, prefers_dark);
        let changes = view.changes_from(self.last_view.as_ref());
        self.surface.render_control(&view, &changes);
        self.last_view = Some(view.clone());
        view
    }
}

/// Controller for a single theme toggle.
pub struct ThemeModeController<S: ModeStore> {
    config: ControllerConfig,
    store: S,
    preference: Rc<dyn PreferenceSource>,
    subscription: Option<SubscriptionId>,
    shared: Rc<RefCell<Shared>>,
    idle: IdleFade,
}

impl<S: ModeStore> ThemeModeController<S> {
    /// Loads, applies and renders the display mode, then starts listening
    /// for OS preference changes.
    ///
    /// Store failures never fail initialization: the controller falls back to
    /// `config.default_mode` and keeps working in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Template`] if a label template does not compile.
    pub fn initialize(
        config: ControllerConfig,
        mut store: S,
        preference: Rc<dyn PreferenceSource>,
        surface: impl Surface + 'static,
    ) -> Result<Self, ModeError> {
        let renderer = LabelRenderer::new(&config)?;
        let mode = load_mode(&config, &mut store);
        tracing::debug!(%mode, "display mode initialized");

        let shared = Rc::new(RefCell::new(Shared {
            mode,
            renderer,
            surface: Box::new(surface),
            last_view: None,
        }));
        {
            let mut shared = shared.borrow_mut();
            shared.apply();
            shared.render(preference.prefers_dark());
        }

        let listener_state: Weak<RefCell<Shared>> = Rc::downgrade(&shared);
        let subscription = preference.subscribe(Rc::new(move |prefers_dark: bool| {
            let Some(state) = listener_state.upgrade() else {
                return;
            };
            let Ok(mut shared) = state.try_borrow_mut() else {
                tracing::debug!("preference change arrived mid-update, ignored");
                return;
            };
            if shared.mode == DisplayMode::Auto {
                shared.render(prefers_dark);
            }
        }));

        let mut idle = IdleFade::new(&config.idle);
        idle.start(Instant::now());

        Ok(Self {
            config,
            store,
            preference,
            subscription: Some(subscription),
            shared,
            idle,
        })
    }

    /// Returns the current display mode.
    pub fn mode(&self) -> DisplayMode {
        self.shared.borrow().mode
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Returns the page flags for the current mode.
    pub fn flags(&self) -> DocumentFlags {
        DocumentFlags::for_mode(self.mode())
    }

    /// Computes the control's view for the current mode and OS preference.
    ///
    /// Pure: does not touch the surface.
    pub fn render(&self) -> ViewState {
        let shared = self.shared.borrow();
        shared
            .renderer
            .render(shared.mode, self.preference.prefers_dark())
    }

    /// Advances to the next mode in the configured order.
    ///
    /// Persists, applies, re-renders and announces the new mode, in that
    /// order. Returns the new mode.
    pub fn cycle(&mut self) -> DisplayMode {
        let next = self.config.cycle.next(self.mode());
        self.switch_to(next);
        next
    }

    /// Switches directly to `mode`, with the same effects as [`cycle`](Self::cycle).
    pub fn select(&mut self, mode: DisplayMode) {
        self.switch_to(mode);
    }

    /// Feeds a document event to the idle fade.
    pub fn notify_activity(&mut self, activity: Activity, now: Instant) {
        if self.idle.handle(activity, now) {
            self.push_idle();
        }
    }

    /// Fires the idle deadline if it has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.idle.tick(now) {
            self.push_idle();
        }
    }

    /// When the host should call [`tick`](Self::tick) next.
    pub fn next_idle_deadline(&self) -> Option<Instant> {
        self.idle.next_deadline()
    }

    /// Records the control's bounding box for pointer proximity.
    pub fn set_control_bounds(&mut self, bounds: Rect) {
        self.idle.set_bounds(bounds);
    }

    pub fn is_idle(&self) -> bool {
        self.idle.is_idle()
    }

    fn switch_to(&mut self, mode: DisplayMode) {
        if let Err(err) = self.store.set(&self.config.storage_key, mode.as_str()) {
            tracing::debug!(error = %err, %mode, "could not persist display mode");
        }

        let prefers_dark = self.preference.prefers_dark();
        let mut shared = self.shared.borrow_mut();
        let previous = shared.mode;
        shared.mode = mode;
        shared.apply();
        shared.render(prefers_dark);
        let message = shared.renderer.announcement(mode);
        shared.surface.announce(&message);
        tracing::trace!(from = %previous, to = %mode, "display mode switched");
    }

    fn push_idle(&mut self) {
        let idle = self.idle.is_idle();
        self.shared.borrow_mut().surface.set_idle(idle);
    }
}

impl<S: ModeStore> Drop for ThemeModeController<S> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.preference.unsubscribe(id);
        }
    }
}

impl<S: ModeStore> std::fmt::Debug for ThemeModeController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeModeController")
            .field("mode", &self.mode())
            .field("config", &self.config)
            .field("idle", &self.idle)
            .finish()
    }
}

/// Resolves the startup mode: stored value, then legacy migration, then default.
fn load_mode<S: ModeStore>(config: &ControllerConfig, store: &mut S) -> DisplayMode {
    match read_mode(config, store) {
        Ok(Some(mode)) => mode,
        Ok(None) => config.default_mode,
        Err(err) => {
            tracing::debug!(error = %err, "display mode store unavailable, using default");
            config.default_mode
        }
    }
}

fn read_mode<S: ModeStore>(
    config: &ControllerConfig,
    store: &mut S,
) -> Result<Option<DisplayMode>, ModeError> {
    if let Some(mode) = parse_stored(&config.storage_key, store.get(&config.storage_key)?) {
        return Ok(Some(mode));
    }

    let legacy_key = &config.legacy_theme_key;
    let Some(legacy) = parse_stored(legacy_key, store.get(legacy_key)?) else {
        return Ok(None);
    };
    let dimmed = store.get(&config.legacy_dim_key)?.as_deref() == Some(LEGACY_DIM_ON);
    let migrated = match legacy {
        DisplayMode::Dark if dimmed => DisplayMode::DarkDim,
        other => other,
    };
    if let Err(err) = store.set(&config.storage_key, migrated.as_str()) {
        tracing::debug!(error = %err, "could not persist migrated display mode");
    }
    tracing::debug!(from = %legacy, dimmed, to = %migrated, "migrated legacy display mode");
    Ok(Some(migrated))
}

// Invalid literals count as absent.
fn parse_stored(key: &str, raw: Option<String>) -> Option<DisplayMode> {
    let raw = raw?;
    match raw.parse() {
        Ok(mode) => Some(mode),
        Err(err) => {
            tracing::debug!(key, error = %err, "ignoring stored value");
            None
        }
    }
}
