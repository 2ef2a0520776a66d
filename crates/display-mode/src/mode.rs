//! Display modes and the order the toggle cycles through them.
//!
//! [`DisplayMode`] is the only value that is ever persisted. Everything the
//! page shows (base theme, dim overlay, button label) is derived from it,
//! together with the OS preference when the mode is [`DisplayMode::Auto`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModeError;

/// The user's selected display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Follow the OS colour-scheme preference.
    #[serde(rename = "auto")]
    Auto,
    /// Force the light base theme.
    #[serde(rename = "light")]
    Light,
    /// Force the dark base theme.
    #[serde(rename = "dark")]
    Dark,
    /// Dark base theme with the dim overlay enabled.
    #[serde(rename = "dark+dim")]
    DarkDim,
}

impl DisplayMode {
    /// All modes, in canonical cycle order.
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Auto,
        DisplayMode::Light,
        DisplayMode::Dark,
        DisplayMode::DarkDim,
    ];

    /// Returns the literal used in storage and in the `data-theme-mode` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Auto => "auto",
            DisplayMode::Light => "light",
            DisplayMode::Dark => "dark",
            DisplayMode::DarkDim => "dark+dim",
        }
    }

    /// The base theme written to the document, or `None` to let OS styling take over.
    pub fn data_theme(&self) -> Option<BaseTheme> {
        match self {
            DisplayMode::Auto => None,
            DisplayMode::Light => Some(BaseTheme::Light),
            DisplayMode::Dark | DisplayMode::DarkDim => Some(BaseTheme::Dark),
        }
    }

    /// Whether the dim overlay is active in this mode.
    pub fn is_dimmed(&self) -> bool {
        matches!(self, DisplayMode::DarkDim)
    }

    /// Resolves the effective theme, consulting the OS signal only for `Auto`.
    pub fn resolve(&self, prefers_dark: bool) -> BaseTheme {
        match self.data_theme() {
            Some(theme) => theme,
            None if prefers_dark => BaseTheme::Dark,
            None => BaseTheme::Light,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = ModeError;

    /// Parses one of the four exact literals. Anything else, including
    /// differently cased or padded input, is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(DisplayMode::Auto),
            "light" => Ok(DisplayMode::Light),
            "dark" => Ok(DisplayMode::Dark),
            "dark+dim" => Ok(DisplayMode::DarkDim),
            other => Err(ModeError::InvalidStoredValue(other.to_string())),
        }
    }
}

/// The effective light/dark theme once `auto` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseTheme {
    Light,
    Dark,
}

impl BaseTheme {
    /// Returns the value of the `data-theme` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseTheme::Light => "light",
            BaseTheme::Dark => "dark",
        }
    }
}

/// The fixed circular order the toggle advances through.
///
/// Pick one per deployment. A page that switches order mid-session would
/// give the same click two different meanings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CycleOrder {
    /// `auto → light → dark → dark+dim → auto`
    #[default]
    FourState,
    /// `light → dark → dark+dim → light`
    ThreeState,
}

const THREE_STATE: [DisplayMode; 3] = [
    DisplayMode::Light,
    DisplayMode::Dark,
    DisplayMode::DarkDim,
];

impl CycleOrder {
    /// Returns the modes this order visits, in order.
    pub fn modes(&self) -> &'static [DisplayMode] {
        match self {
            CycleOrder::FourState => &DisplayMode::ALL,
            CycleOrder::ThreeState => &THREE_STATE,
        }
    }

    /// Returns the mode following `current`.
    ///
    /// A mode outside this order (only `auto` under [`CycleOrder::ThreeState`])
    /// advances to the first mode of the order.
    pub fn next(&self, current: DisplayMode) -> DisplayMode {
        let modes = self.modes();
        match modes.iter().position(|m| *m == current) {
            Some(idx) => modes[(idx + 1) % modes.len()],
            None => modes[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_literals() {
        for mode in DisplayMode::ALL {
            assert_eq!(mode.as_str().parse::<DisplayMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_parse_rejects_near_misses() {
        for raw in ["", "Dark", " dark", "dark+Dim", "dim", "system", "null"] {
            let err = raw.parse::<DisplayMode>().unwrap_err();
            assert_eq!(err, ModeError::InvalidStoredValue(raw.to_string()));
        }
    }

    #[test]
    fn test_serde_uses_literals() {
        let json = serde_json::to_string(&DisplayMode::DarkDim).unwrap();
        assert_eq!(json, "\"dark+dim\"");
        let mode: DisplayMode = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(mode, DisplayMode::Auto);
    }

    #[test]
    fn test_data_theme_and_dim_are_consistent() {
        assert_eq!(DisplayMode::Auto.data_theme(), None);
        assert_eq!(DisplayMode::Light.data_theme(), Some(BaseTheme::Light));
        assert_eq!(DisplayMode::Dark.data_theme(), Some(BaseTheme::Dark));
        assert_eq!(DisplayMode::DarkDim.data_theme(), Some(BaseTheme::Dark));
        assert!(DisplayMode::DarkDim.is_dimmed());
        assert!(!DisplayMode::Dark.is_dimmed());
    }

    #[test]
    fn test_resolve_auto_follows_signal() {
        assert_eq!(DisplayMode::Auto.resolve(true), BaseTheme::Dark);
        assert_eq!(DisplayMode::Auto.resolve(false), BaseTheme::Light);
        assert_eq!(DisplayMode::Light.resolve(true), BaseTheme::Light);
        assert_eq!(DisplayMode::DarkDim.resolve(false), BaseTheme::Dark);
    }

    #[test]
    fn test_four_state_cycle() {
        let order = CycleOrder::FourState;
        assert_eq!(order.next(DisplayMode::Auto), DisplayMode::Light);
        assert_eq!(order.next(DisplayMode::Light), DisplayMode::Dark);
        assert_eq!(order.next(DisplayMode::Dark), DisplayMode::DarkDim);
        assert_eq!(order.next(DisplayMode::DarkDim), DisplayMode::Auto);
    }

    #[test]
    fn test_three_state_cycle() {
        let order = CycleOrder::ThreeState;
        assert_eq!(order.next(DisplayMode::Light), DisplayMode::Dark);
        assert_eq!(order.next(DisplayMode::Dark), DisplayMode::DarkDim);
        assert_eq!(order.next(DisplayMode::DarkDim), DisplayMode::Light);
        assert_eq!(order.next(DisplayMode::Auto), DisplayMode::Light);
    }

    #[test]
    fn test_cycle_order_serde() {
        let order: CycleOrder = serde_json::from_str("\"three-state\"").unwrap();
        assert_eq!(order, CycleOrder::ThreeState);
    }

    fn any_mode() -> impl Strategy<Value = DisplayMode> {
        prop::sample::select(DisplayMode::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_four_state_returns_after_four_steps(start in any_mode()) {
            let order = CycleOrder::FourState;
            let mut mode = start;
            for _ in 0..4 {
                mode = order.next(mode);
            }
            prop_assert_eq!(mode, start);
        }

        #[test]
        fn prop_three_state_never_yields_auto(start in any_mode(), steps in 1usize..32) {
            let order = CycleOrder::ThreeState;
            let mut mode = start;
            for _ in 0..steps {
                mode = order.next(mode);
                prop_assert_ne!(mode, DisplayMode::Auto);
            }
        }
    }
}
