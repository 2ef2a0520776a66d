//! OS preference detection through `dark-light`.

use std::cell::Cell;
use std::sync::Mutex;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;

use super::{Listeners, PreferenceListener, PreferenceSource, SubscriptionId};
use crate::mode::BaseTheme;

type PreferenceDetector = fn() -> BaseTheme;

static PREFERENCE_DETECTOR: Lazy<Mutex<PreferenceDetector>> =
    Lazy::new(|| Mutex::new(os_preference_detector));

/// Overrides the detector used to query the OS colour-scheme preference.
///
/// This is useful for testing or for hosts that know better than the OS.
///
/// # Example
///
/// ```rust
/// use display_mode::{detect_preference, set_preference_detector, BaseTheme};
///
/// set_preference_detector(|| BaseTheme::Dark);
/// assert_eq!(detect_preference(), BaseTheme::Dark);
/// ```
pub fn set_preference_detector(detector: PreferenceDetector) {
    let mut guard = PREFERENCE_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Queries the configured detector (default: the OS via `dark-light`).
pub fn detect_preference() -> BaseTheme {
    let detector = PREFERENCE_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

fn os_preference_detector() -> BaseTheme {
    match detect_os_theme() {
        OsThemeMode::Dark => BaseTheme::Dark,
        _ => BaseTheme::Light,
    }
}

/// A preference source backed by the OS setting.
///
/// The OS offers no change notification through `dark-light`, so the host
/// calls [`refresh`](SystemPreference::refresh) when it has reason to
/// believe the setting moved (focus regained, a periodic tick).
#[derive(Debug)]
pub struct SystemPreference {
    prefers_dark: Cell<bool>,
    listeners: Listeners,
}

impl SystemPreference {
    /// Creates a source primed with the current OS preference.
    pub fn new() -> Self {
        Self {
            prefers_dark: Cell::new(detect_preference() == BaseTheme::Dark),
            listeners: Listeners::default(),
        }
    }

    /// Re-detects the preference. Returns `true` and notifies listeners if it changed.
    pub fn refresh(&self) -> bool {
        let prefers_dark = detect_preference() == BaseTheme::Dark;
        let changed = self.prefers_dark.replace(prefers_dark) != prefers_dark;
        if changed {
            tracing::debug!(prefers_dark, "OS colour-scheme preference changed");
            self.listeners.notify(prefers_dark);
        }
        changed
    }
}

impl Default for SystemPreference {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceSource for SystemPreference {
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
