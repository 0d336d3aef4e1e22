//! Interaction tuning.

use serde::{Deserialize, Serialize};

use brickgrid_core::PlacementOptions;

use crate::DEFAULT_CLICK_THRESHOLD;

/// Controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Pointer travel (px) at or below which a release is a click.
    pub click_threshold: f32,

    /// Free-placement mode: commits may overlap other bricks.
    pub allow_overlap: bool,

    /// Snap live visual offsets to cell corners while dragging.
    pub snap_while_dragging: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            allow_overlap: false,
            snap_while_dragging: false,
        }
    }
}

impl InteractionConfig {
    pub fn placement_options(&self) -> PlacementOptions {
        PlacementOptions {
            allow_overlap: self.allow_overlap,
        }
    }
}
