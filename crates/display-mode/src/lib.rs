//! # Display Mode - Theme Toggle Controller
//!
//! `display-mode` drives a single page-level theme toggle. One control cycles
//! the page through four display modes, remembers the choice, and follows the
//! OS colour-scheme preference when asked to.
//!
//! ## Core Concepts
//!
//! - [`DisplayMode`]: `auto`, `light`, `dark` or `dark+dim`; the only persisted value
//! - [`ThemeModeController`]: owns the mode, persists it, applies and renders it
//! - [`ModeStore`]: key-value persistence (browser storage, a file, memory)
//! - [`PreferenceSource`]: the OS "prefers dark" signal, with subscribe/unsubscribe
//! - [`Surface`]: the host layer that receives [`DocumentFlags`] and [`ViewState`]
//! - [`IdleFade`]: fades the control after a quiet period
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use display_mode::{
//!     ControllerConfig, DisplayMode, Icon, ManualPreference, MemoryStore, RecordingSurface,
//!     ThemeModeController,
//! };
//!
//! let surface = RecordingSurface::new();
//! let mut controller = ThemeModeController::initialize(
//!     ControllerConfig::default(),
//!     MemoryStore::new(),
//!     Rc::new(ManualPreference::new(true)),
//!     surface.clone(),
//! ).unwrap();
//!
//! // Nothing stored: light, whatever the OS prefers.
//! assert_eq!(controller.mode(), DisplayMode::Light);
//! let view = surface.view().unwrap();
//! assert_eq!(view.icon, Icon::Sun);
//! assert_eq!(view.aria_label, "Switch to Dark");
//!
//! controller.cycle();
//! assert_eq!(controller.mode(), DisplayMode::Dark);
//! assert_eq!(surface.announcements(), vec!["Dark mode enabled"]);
//! ```
//!
//! ## Document Flags
//!
//! Each mode maps to exactly one combination of page flags:
//!
//! | Mode       | `data-theme` | `theme-dim` |
//! |------------|--------------|-------------|
//! | `auto`     | (removed)    | off         |
//! | `light`    | `light`      | off         |
//! | `dark`     | `dark`       | off         |
//! | `dark+dim` | `dark`       | on          |
//!
//! ## Failure Handling
//!
//! Storage that is missing or throws never reaches the user: the controller
//! logs at `debug` level through `tracing` and runs on an in-memory mode for
//! the rest of the session. Only configuration mistakes (a label template that
//! does not compile) are returned as errors.

pub mod config;
pub mod controller;
mod error;
pub mod idle;
pub mod mode;
pub mod preference;
pub mod store;
pub mod surface;
pub mod view;

pub use config::{ControllerConfig, IdleConfig, LabelConvention, LabelTemplates, ModeLabels};
pub use controller::ThemeModeController;
pub use error::ModeError;
pub use idle::{Activity, IdleFade, Rect};
pub use mode::{BaseTheme, CycleOrder, DisplayMode};
pub use preference::{
    detect_preference, set_preference_detector, ManualPreference, PreferenceListener,
    PreferenceSource, SubscriptionId, SystemPreference,
};
pub use store::{FileStore, MemoryStore, ModeStore, UnavailableStore};
pub use surface::{Recording, RecordingSurface, Surface};
pub use view::{DocumentFlags, Icon, LabelRenderer, ViewChange, ViewState};
