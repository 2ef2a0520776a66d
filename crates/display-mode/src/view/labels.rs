//! Label rendering from configurable templates.

use minijinja::Environment;
use serde::Serialize;

use super::{Icon, ViewState};
use crate::config::{ControllerConfig, LabelConvention, ModeLabels};
use crate::error::ModeError;
use crate::mode::{CycleOrder, DisplayMode};

const ACTION_LABEL: &str = "action_label";
const STATE_LABEL: &str = "state_label";
const ANNOUNCEMENT: &str = "announcement";

#[derive(Serialize)]
struct LabelContext<'a> {
    current: &'a str,
    next: &'a str,
    mode: &'static str,
    next_mode: &'static str,
}

/// Computes [`ViewState`]s and announcements for a configuration.
///
/// Templates are compiled once at construction, so a broken template is
/// reported before the controller touches any state.
pub struct LabelRenderer {
    env: Environment<'static>,
    labels: ModeLabels,
    convention: LabelConvention,
    cycle: CycleOrder,
}

impl LabelRenderer {
    /// Compiles the templates in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::Template`] if any template has invalid syntax.
    pub fn new(config: &ControllerConfig) -> Result<Self, ModeError> {
        let mut env = Environment::new();
        env.add_template_owned(ACTION_LABEL, config.templates.action_label.clone())?;
        env.add_template_owned(STATE_LABEL, config.templates.state_label.clone())?;
        env.add_template_owned(ANNOUNCEMENT, config.templates.announcement.clone())?;
        Ok(Self {
            env,
            labels: config.labels.clone(),
            convention: config.convention,
            cycle: config.cycle,
        })
    }

    /// Renders the control for `mode`.
    ///
    /// `prefers_dark` only affects the icon, and only for `auto`.
    pub fn render(&self, mode: DisplayMode, prefers_dark: bool) -> ViewState {
        let label = self.labels.get(mode).to_string();
        let (accessible, aria_pressed) = match self.convention {
            LabelConvention::NextAction => (self.expand(ACTION_LABEL, mode), None),
            LabelConvention::CurrentState => (
                self.expand(STATE_LABEL, mode),
                Some(mode == DisplayMode::DarkDim),
            ),
        };
        ViewState {
            mode,
            icon: Icon::for_theme(mode.resolve(prefers_dark)),
            label,
            aria_label: accessible.clone(),
            aria_pressed,
            title: accessible,
        }
    }

    /// Text for the live region after switching to `mode`.
    pub fn announcement(&self, mode: DisplayMode) -> String {
        self.expand(ANNOUNCEMENT, mode)
    }

    fn expand(&self, name: &str, mode: DisplayMode) -> String {
        let next_mode = self.cycle.next(mode);
        let ctx = LabelContext {
            current: self.labels.get(mode),
            next: self.labels.get(next_mode),
            mode: mode.as_str(),
            next_mode: next_mode.as_str(),
        };
        let rendered = self
            .env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(&ctx));
        match rendered {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(template = name, error = %err, "label template failed, using raw label");
                ctx.current.to_string()
            }
        }
    }
}

impl std::fmt::Debug for LabelRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelRenderer")
            .field("labels", &self.labels)
            .field("convention", &self.convention)
            .field("cycle", &self.cycle)
            .finish()
    }
}
