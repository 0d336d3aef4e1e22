//! Brick manifests: per-type, per-breakpoint size constraints.
//!
//! ```yaml
//! default:
//!   preferred_w: 6
//!   preferred_h: 3
//! bricks:
//!   text:
//!     constraints:
//!       desktop: { preferred_w: 6, preferred_h: 3, min_w: 2 }
//!       mobile: { preferred_w: 4, preferred_h: 3 }
//!   image:
//!     constraints:
//!       desktop: { preferred_w: 4, preferred_h: 6, min_w: 2, min_h: 2, max_w: 8 }
//! ```
//!
//! Lookups for an unknown type, or a known type without an entry for the
//! breakpoint, return the registry-wide default.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use brickgrid_core::{BreakpointId, BreakpointSet, BrickConstraints, ConstraintsSource};

use crate::error::{EngineError, EngineResult};

/// Constraints for one brick type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickManifest {
    #[serde(default)]
    pub constraints: BTreeMap<BreakpointId, BrickConstraints>,
}

impl BrickManifest {
    pub fn with_constraints(
        mut self,
        breakpoint: impl Into<BreakpointId>,
        constraints: BrickConstraints,
    ) -> Self {
        self.constraints.insert(breakpoint.into(), constraints);
        self
    }
}

/// Registry of brick manifests keyed by brick type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRegistry {
    #[serde(default)]
    pub default: BrickConstraints,

    #[serde(default)]
    pub bricks: BTreeMap<String, BrickManifest>,
}

impl ManifestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_str(yaml: &str) -> EngineResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load_from_file(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let registry = Self::load_from_str(&content)?;
        info!(
            path = %path.display(),
            types = registry.bricks.len(),
            "Loaded brick manifests"
        );
        Ok(registry)
    }

    pub fn with_default(mut self, constraints: BrickConstraints) -> Self {
        self.default = constraints;
        self
    }

    /// Add or replace the manifest for `brick_type`.
    pub fn register(&mut self, brick_type: impl Into<String>, manifest: BrickManifest) {
        self.bricks.insert(brick_type.into(), manifest);
    }

    pub fn get(&self, brick_type: &str) -> Option<&BrickManifest> {
        self.bricks.get(brick_type)
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.bricks.keys().map(String::as_str)
    }

    /// Constraints for `brick_type` on `breakpoint`, falling back to the
    /// registry default.
    pub fn constraints(&self, brick_type: &str, breakpoint: &BreakpointId) -> BrickConstraints {
        self.bricks
            .get(brick_type)
            .and_then(|manifest| manifest.constraints.get(breakpoint))
            .copied()
            .unwrap_or(self.default)
    }

    /// Check every manifest entry (and the default, on every breakpoint)
    /// against the grid it will be used on.
    pub fn validate_for(&self, set: &BreakpointSet) -> EngineResult<()> {
        for spec in set.iter() {
            self.default
                .validate_for(spec)
                .map_err(|source| EngineError::Manifest {
                    brick_type: "<default>".to_string(),
                    source,
                })?;
        }

        for (brick_type, manifest) in &self.bricks {
            for (breakpoint, constraints) in &manifest.constraints {
                let spec = set
                    .get(breakpoint)
                    .ok_or_else(|| EngineError::UnknownBreakpoint(breakpoint.clone()))?;
                constraints
                    .validate_for(spec)
                    .map_err(|source| EngineError::Manifest {
                        brick_type: brick_type.clone(),
                        source,
                    })?;
            }
        }
        Ok(())
    }
}

impl ConstraintsSource for ManifestRegistry {
    fn constraints_for(&self, brick_type: &str, breakpoint: &BreakpointId) -> Option<BrickConstraints> {
        Some(self.constraints(brick_type, breakpoint))
    }
}
