//! Engine configuration.
//!
//! Loaded from YAML:
//!
//! ```yaml
//! row_height: 40
//! primary: desktop
//! stacked: mobile
//! breakpoints:
//!   - name: desktop
//!     columns: 12
//!     padding_x: 20
//!     padding_y: 16
//!     fallback: [tablet, mobile]
//!   - name: mobile
//!     columns: 4
//!     fallback: [desktop]
//! duplicate:
//!   default: { dx: 0, dy: 1 }
//!   overrides:
//!     desktop: { dx: 1, dy: 1 }
//! mobile:
//!   spacing: 1
//!   hidden: reserve_space
//! interaction:
//!   click_threshold: 0
//!   allow_overlap: false
//!   snap_while_dragging: false
//! ```
//!
//! Every section except `breakpoints` is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use brickgrid_core::{
    BreakpointId, BreakpointSet, BreakpointSpec, DuplicatePolicy, HiddenBrickPolicy,
    MobileLayoutOptions, Validate, DEFAULT_ROW_HEIGHT, MOBILE_STACK_SPACING,
};
use brickgrid_input::InteractionConfig;

use crate::error::{EngineError, EngineResult};

/// Options for stacked layout derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MobileConfig {
    /// Empty rows between stacked bricks.
    pub spacing: u32,
    pub hidden: HiddenBrickPolicy,
}

impl Default for MobileConfig {
    fn default() -> Self {
        Self {
            spacing: MOBILE_STACK_SPACING,
            hidden: HiddenBrickPolicy::default(),
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Ordered widest first.
    pub breakpoints: Vec<BreakpointSpec>,

    #[serde(default = "default_row_height")]
    pub row_height: u32,

    /// Reading-order source for stacked derivation. Defaults to the first breakpoint.
    #[serde(default)]
    pub primary: Option<BreakpointId>,

    /// Single-column target. Defaults to the last breakpoint.
    #[serde(default)]
    pub stacked: Option<BreakpointId>,

    #[serde(default)]
    pub duplicate: DuplicatePolicy,

    #[serde(default)]
    pub mobile: MobileConfig,

    #[serde(default)]
    pub interaction: InteractionConfig,
}

fn default_row_height() -> u32 {
    DEFAULT_ROW_HEIGHT
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_set(BreakpointSet::three_tier())
    }
}

impl EngineConfig {
    /// Desktop and mobile only.
    pub fn two_tier() -> Self {
        Self::from_set(BreakpointSet::two_tier())
    }

    /// Wrap an existing breakpoint set with default options.
    pub fn from_set(set: BreakpointSet) -> Self {
        Self {
            breakpoints: set.breakpoints,
            row_height: set.row_height,
            primary: set.primary,
            stacked: set.stacked,
            duplicate: DuplicatePolicy::default(),
            mobile: MobileConfig::default(),
            interaction: InteractionConfig::default(),
        }
    }

    /// Parse and validate a YAML document.
    pub fn load_from_str(yaml: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load_from_file(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::load_from_str(&content)?;
        info!(
            path = %path.display(),
            breakpoints = config.breakpoints.len(),
            "Loaded engine config"
        );
        Ok(config)
    }

    pub fn breakpoint_set(&self) -> BreakpointSet {
        BreakpointSet {
            breakpoints: self.breakpoints.clone(),
            row_height: self.row_height,
            primary: self.primary.clone(),
            stacked: self.stacked.clone(),
        }
    }

    /// Stacked derivation options, `None` for an empty breakpoint list.
    pub fn mobile_options(&self) -> Option<MobileLayoutOptions> {
        MobileLayoutOptions::for_set(&self.breakpoint_set()).map(|options| {
            options
                .with_spacing(self.mobile.spacing)
                .with_hidden_policy(self.mobile.hidden)
        })
    }

    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate = policy;
        self
    }

    pub fn with_mobile(mut self, mobile: MobileConfig) -> Self {
        self.mobile = mobile;
        self
    }

    /// Structural checks on the breakpoint set plus option sanity. Nudge
    /// overrides for breakpoints outside the set are unused, not errors.
    pub fn validate(&self) -> EngineResult<()> {
        self.breakpoint_set().validate()?;

        let threshold = self.interaction.click_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "click_threshold must be a non-negative number, got {threshold}"
            )));
        }
        for breakpoint in self.duplicate.overrides.keys() {
            if !self.breakpoints.iter().any(|spec| &spec.id == breakpoint) {
                warn!(%breakpoint, "Duplicate nudge override names an unknown breakpoint");
            }
        }
        Ok(())
    }
}
