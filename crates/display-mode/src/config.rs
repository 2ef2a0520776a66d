//! Controller configuration.
//!
//! Every field has a default carrying the canonical policy: default to
//! `light`, four-state cycle, next-action ARIA wording. The alternatives the
//! toggle has shipped with over time are configuration choices, made once
//! per deployment.
//!
//! ```rust
//! use display_mode::{ControllerConfig, CycleOrder, DisplayMode};
//!
//! let config = ControllerConfig::from_yaml(r#"
//! cycle: three-state
//! labels:
//!   dark_dim: Darker
//! idle:
//!   delay_ms: 3000
//! "#).unwrap();
//!
//! assert_eq!(config.cycle, CycleOrder::ThreeState);
//! assert_eq!(config.default_mode, DisplayMode::Light);
//! assert_eq!(config.labels.get(DisplayMode::DarkDim), "Darker");
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ModeError;
use crate::mode::{CycleOrder, DisplayMode};

/// Storage key holding the current mode.
pub const DEFAULT_STORAGE_KEY: &str = "display-mode";
/// Key of the pre-dim theme toggle (`auto`, `light` or `dark`).
pub const LEGACY_THEME_KEY: &str = "theme-preference";
/// Key of the standalone dim toggle (`on` or `off`).
pub const LEGACY_DIM_KEY: &str = "hum:dim";

/// How the control's accessible name is worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelConvention {
    /// Describe what activating the control will do ("Switch to Dark").
    /// `aria-pressed` is not emitted.
    #[default]
    NextAction,
    /// Describe the current state ("Display mode: Dark"), with
    /// `aria-pressed` reflecting the dim overlay.
    CurrentState,
}

/// Human-readable mode names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModeLabels {
    pub auto: String,
    pub light: String,
    pub dark: String,
    pub dark_dim: String,
}

impl ModeLabels {
    pub fn get(&self, mode: DisplayMode) -> &str {
        match mode {
            DisplayMode::Auto => &self.auto,
            DisplayMode::Light => &self.light,
            DisplayMode::Dark => &self.dark,
            DisplayMode::DarkDim => &self.dark_dim,
        }
    }
}

impl Default for ModeLabels {
    fn default() -> Self {
        Self {
            auto: "Auto".to_string(),
            light: "Light".to_string(),
            dark: "Dark".to_string(),
            dark_dim: "Dark+Dim".to_string(),
        }
    }
}

/// MiniJinja templates for the accessible strings.
///
/// Available variables: `current` and `next` (labels), `mode` and
/// `next_mode` (literals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelTemplates {
    /// Used with [`LabelConvention::NextAction`].
    pub action_label: String,
    /// Used with [`LabelConvention::CurrentState`].
    pub state_label: String,
    /// Written to the live region after each cycle.
    pub announcement: String,
}

impl Default for LabelTemplates {
    fn default() -> Self {
        Self {
            action_label: "Switch to {{ next }}".to_string(),
            state_label: "Display mode: {{ current }}".to_string(),
            announcement: "{{ current }} mode enabled".to_string(),
        }
    }
}

/// Idle-fade timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdleConfig {
    /// Milliseconds without qualifying activity before the control fades.
    pub delay_ms: u64,
    /// Pointer distance from the control's box that counts as proximity.
    pub proximity_px: f64,
    /// Set on touch-first hosts; disables the fade entirely.
    pub coarse_pointer: bool,
}

impl IdleConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            proximity_px: 96.0,
            coarse_pointer: false,
        }
    }
}

/// Configuration for a [`ThemeModeController`](crate::ThemeModeController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    pub storage_key: String,
    pub legacy_theme_key: String,
    pub legacy_dim_key: String,
    /// Mode used when nothing usable is stored. Not persisted.
    pub default_mode: DisplayMode,
    pub cycle: CycleOrder,
    pub convention: LabelConvention,
    pub labels: ModeLabels,
    pub templates: LabelTemplates,
    pub idle: IdleConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            legacy_theme_key: LEGACY_THEME_KEY.to_string(),
            legacy_dim_key: LEGACY_DIM_KEY.to_string(),
            default_mode: DisplayMode::Light,
            cycle: CycleOrder::default(),
            convention: LabelConvention::default(),
            labels: ModeLabels::default(),
            templates: LabelTemplates::default(),
            idle: IdleConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Parses a configuration from YAML. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Config`] on malformed YAML, unknown fields or
    /// invalid values.
    pub fn from_yaml(yaml: &str) -> Result<Self, ModeError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Config`] on malformed JSON, unknown fields or
    /// invalid values.
    pub fn from_json(json: &str) -> Result<Self, ModeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the cycle order, returning `self` for chaining.
    pub fn with_cycle(mut self, cycle: CycleOrder) -> Self {
        self.cycle = cycle;
        self
    }

    /// Sets the label convention, returning `self` for chaining.
    pub fn with_convention(mut self, convention: LabelConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Sets the default mode, returning `self` for chaining.
    pub fn with_default_mode(mut self, mode: DisplayMode) -> Self {
        self.default_mode = mode;
        self
    }
}
