//! Declarative output of the controller.
//!
//! Nothing here touches a document. The controller computes two small
//! immutable records and hands them to a [`Surface`](crate::Surface):
//!
//! - [`DocumentFlags`]: the page-level attributes (`data-theme`, the
//!   `theme-dim` class, `data-theme-mode`).
//! - [`ViewState`]: what the toggle control shows (icon, label, ARIA).
//!
//! Both are pure functions of the display mode (plus the OS preference for
//! `auto`), so recomputing them can never drift from the mode. Hosts that
//! want to patch instead of rebuild use [`ViewState::changes_from`].

mod labels;

use serde::Serialize;

use crate::mode::{BaseTheme, DisplayMode};

pub use labels::LabelRenderer;

/// Page-level flags derived from a display mode.
///
/// The fields are private: the only way to build flags is from a mode, so
/// the dim overlay can never be set alongside a light base theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentFlags {
    mode: DisplayMode,
    theme: Option<BaseTheme>,
    dimmed: bool,
}

impl DocumentFlags {
    /// Computes both flags together from `mode`.
    pub fn for_mode(mode: DisplayMode) -> Self {
        Self {
            mode,
            theme: mode.data_theme(),
            dimmed: mode.is_dimmed(),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// The `data-theme` attribute value; `None` means remove the attribute.
    pub fn theme(&self) -> Option<BaseTheme> {
        self.theme
    }

    /// Whether the `theme-dim` overlay class is present.
    pub fn dimmed(&self) -> bool {
        self.dimmed
    }
}

/// The glyph shown on the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Sun,
    Moon,
}

impl Icon {
    /// Picks the icon for a resolved theme.
    pub fn for_theme(theme: BaseTheme) -> Self {
        match theme {
            BaseTheme::Light => Icon::Sun,
            BaseTheme::Dark => Icon::Moon,
        }
    }

    /// Identifier suitable for a sprite reference or CSS class.
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Sun => "sun",
            Icon::Moon => "moon",
        }
    }

    /// Text fallback when no icon font or SVG is available.
    pub fn glyph(&self) -> char {
        match self {
            Icon::Sun => '\u{2600}',
            Icon::Moon => '\u{263E}',
        }
    }
}

/// Everything the toggle control renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub mode: DisplayMode,
    pub icon: Icon,
    /// Visible text next to the icon.
    pub label: String,
    pub aria_label: String,
    /// `None` means the `aria-pressed` attribute is absent.
    pub aria_pressed: Option<bool>,
    pub title: String,
}

/// A single attribute-level difference between two view states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewChange {
    Mode(DisplayMode),
    Icon(Icon),
    Label(String),
    AriaLabel(String),
    AriaPressed(Option<bool>),
    Title(String),
}

impl ViewState {
    /// Lists the changes needed to go from `previous` to `self`.
    ///
    /// With no previous state every attribute is reported.
    pub fn changes_from(&self, previous: Option<&ViewState>) -> Vec<ViewChange> {
        let mut changes = Vec::new();
        if previous.map_or(true, |p| p.mode != self.mode) {
            changes.push(ViewChange::Mode(self.mode));
        }
        if previous.map_or(true, |p| p.icon != self.icon) {
            changes.push(ViewChange::Icon(self.icon));
        }
        if previous.map_or(true, |p| p.label != self.label) {
            changes.push(ViewChange::Label(self.label.clone()));
        }
        if previous.map_or(true, |p| p.aria_label != self.aria_label) {
            changes.push(ViewChange::AriaLabel(self.aria_label.clone()));
        }
        if previous.map_or(true, |p| p.aria_pressed != self.aria_pressed) {
            changes.push(ViewChange::AriaPressed(self.aria_pressed));
        }
        if previous.map_or(true, |p| p.title != self.title) {
            changes.push(ViewChange::Title(self.title.clone()));
        }
        changes
    }
}
