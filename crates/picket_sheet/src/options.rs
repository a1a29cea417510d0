//! Presentation options and the resolved sheet configuration.
//!
//! Hosts describe a sheet as a list of [`SheetOption`]s; [`SheetConfig`]
//! folds the list into resolved fields. The fold is ordered and later
//! options win, so a caller can layer overrides over a shared base list and
//! get a deterministic result.
//!
//! Conflicting options never fail. Each conflict yields an advisory
//! [`SheetWarning`] on the config (also logged), and the documented
//! precedence still applies.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// SheetOption
// =============================================================================

/// One presentation choice for a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SheetOption {
    /// No backdrop dimming at all.
    NoDimming,
    /// Backdrop dimming strength, 0.0 to 1.0.
    DimmingAlpha(f32),
    /// A tap on the backdrop outside the sheet dismisses it.
    DismissOnBackdropTap,
    /// The presenting view stays at full size behind the sheet.
    PresentingViewKeepsSize,
    /// Scale applied to the presenting view, capped at 1.0 on use.
    PresentingViewScale(f32),
    /// Fixed sheet height. Disables percent-height mode.
    Height(f32),
    /// Sheet height as a fraction of the container height.
    PercentHeight(f32),
    /// Upper bound on the resolved height.
    MaxHeight(f32),
    /// Lower bound on the resolved height.
    MinHeight(f32),
    /// Fixed sheet width. Disables percent-width mode.
    Width(f32),
    /// Sheet width as a fraction of the container width.
    PercentWidth(f32),
    /// Upper bound on the resolved width.
    MaxWidth(f32),
    /// Lower bound on the resolved width.
    MinWidth(f32),
}

/// Which extent an option or warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Height,
    Width,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Height => write!(f, "height"),
            Axis::Width => write!(f, "width"),
        }
    }
}

// =============================================================================
// SheetWarning
// =============================================================================

/// Advisory diagnostic for a conflicting option list.
///
/// Warnings never abort configuration; the precedence rules resolve every
/// conflict deterministically.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SheetWarning {
    /// Both a fixed and a percent extent were set on one axis.
    #[error("both fixed and percent {axis} set; the option listed last wins")]
    CompetingExtent { axis: Axis },
    /// An axis maximum below its minimum. The minimum is enforced last, so
    /// it wins.
    #[error("maximum {axis} {max} is below minimum {min}; the minimum wins")]
    MaxBelowMin { axis: Axis, max: f32, min: f32 },
    /// A dimming alpha was set on a sheet that disables dimming.
    #[error("dimming alpha {alpha} has no effect with dimming disabled")]
    AlphaWithoutDimming { alpha: f32 },
}

// =============================================================================
// SheetConfig
// =============================================================================

/// One axis of the presented extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AxisExtent {
    pub(crate) fixed: f32,
    pub(crate) percent: f32,
    pub(crate) use_percent: bool,
    pub(crate) max: f32,
    pub(crate) min: f32,
    fixed_set: bool,
    percent_set: bool,
}

impl Default for AxisExtent {
    fn default() -> Self {
        Self {
            fixed: -1.0,
            percent: 1.0,
            use_percent: true,
            max: f32::INFINITY,
            min: 0.0,
            fixed_set: false,
            percent_set: false,
        }
    }
}

impl AxisExtent {
    fn set_fixed(&mut self, fixed: f32) {
        self.fixed = fixed;
        self.use_percent = false;
        self.fixed_set = true;
    }

    fn set_percent(&mut self, percent: f32) {
        self.percent = percent;
        self.use_percent = true;
        self.percent_set = true;
    }
}

/// Resolved presentation configuration.
///
/// Defaults reproduce an untouched sheet: full-extent percent sizing, a
/// fully dimmed backdrop, no tap dismissal, and a 0.93 presenting-view
/// scale.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    pub(crate) height: AxisExtent,
    pub(crate) width: AxisExtent,
    dimming: bool,
    dimming_alpha: f32,
    custom_alpha_set: bool,
    tap_dismisses: bool,
    presenting_scale: f32,
    warnings: Vec<SheetWarning>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            height: AxisExtent::default(),
            width: AxisExtent::default(),
            dimming: true,
            dimming_alpha: 1.0,
            custom_alpha_set: false,
            tap_dismisses: false,
            presenting_scale: 0.93,
            warnings: Vec::new(),
        }
    }
}

impl SheetConfig {
    /// Fold an option list into a configuration, in iteration order with
    /// later options winning, then collect conflict warnings.
    pub fn from_options(options: impl IntoIterator<Item = SheetOption>) -> Self {
        let mut config = Self::default();
        for option in options {
            config.apply(option);
        }
        config.collect_warnings();
        config
    }

    fn apply(&mut self, option: SheetOption) {
        match option {
            SheetOption::NoDimming => self.dimming = false,
            SheetOption::DimmingAlpha(alpha) => {
                self.dimming_alpha = alpha;
                self.custom_alpha_set = true;
            }
            SheetOption::DismissOnBackdropTap => self.tap_dismisses = true,
            SheetOption::PresentingViewKeepsSize => self.presenting_scale = 1.0,
            SheetOption::PresentingViewScale(scale) => self.presenting_scale = scale,
            SheetOption::Height(height) => self.height.set_fixed(height),
            SheetOption::PercentHeight(percent) => self.height.set_percent(percent),
            SheetOption::MaxHeight(max) => self.height.max = max,
            SheetOption::MinHeight(min) => self.height.min = min,
            SheetOption::Width(width) => self.width.set_fixed(width),
            SheetOption::PercentWidth(percent) => self.width.set_percent(percent),
            SheetOption::MaxWidth(max) => self.width.max = max,
            SheetOption::MinWidth(min) => self.width.min = min,
        }
    }

    fn collect_warnings(&mut self) {
        let mut warnings = Vec::new();

        for (axis, extent) in [(Axis::Height, &self.height), (Axis::Width, &self.width)] {
            if extent.fixed_set && extent.percent_set {
                warnings.push(SheetWarning::CompetingExtent { axis });
            }
            if extent.max < extent.min {
                warnings.push(SheetWarning::MaxBelowMin {
                    axis,
                    max: extent.max,
                    min: extent.min,
                });
            }
        }

        if !self.dimming && self.custom_alpha_set && self.dimming_alpha > 0.0 {
            warnings.push(SheetWarning::AlphaWithoutDimming {
                alpha: self.dimming_alpha,
            });
        }

        for warning in &warnings {
            tracing::warn!("sheet configuration: {warning}");
        }
        self.warnings = warnings;
    }

    /// Conflicts found when the option list was folded.
    pub fn warnings(&self) -> &[SheetWarning] {
        &self.warnings
    }

    /// Backdrop dimming strength; 0.0 when dimming is disabled.
    pub fn dimming_alpha(&self) -> f32 {
        if self.dimming {
            self.dimming_alpha
        } else {
            0.0
        }
    }

    /// Whether a backdrop tap outside the sheet dismisses it.
    pub fn dismiss_on_backdrop_tap(&self) -> bool {
        self.tap_dismisses
    }

    /// Scale for the presenting view behind the sheet, never above 1.0.
    pub fn presenting_scale(&self) -> f32 {
        self.presenting_scale.min(1.0)
    }
}
