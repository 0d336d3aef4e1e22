//! Validation of breakpoint sets, bricks and manifest constraints.
//!
//! Configurations MUST be validated before they reach the engine; the
//! geometry and solver code assume the invariants checked here.

use std::collections::HashSet;

use crate::{Brick, BrickConstraints, BreakpointSet, BreakpointSpec, LayoutError};

/// Trait for validatable types.
pub trait Validate {
    /// Validate the object, returning an error if invalid.
    fn validate(&self) -> Result<(), LayoutError>;
}

impl Validate for BreakpointSet {
    fn validate(&self) -> Result<(), LayoutError> {
        if self.breakpoints.is_empty() {
            return Err(LayoutError::EmptyBreakpointSet);
        }
        if self.row_height == 0 {
            return Err(LayoutError::ZeroRowHeight);
        }

        let mut seen = HashSet::new();
        for bp in &self.breakpoints {
            if !seen.insert(&bp.id) {
                return Err(LayoutError::DuplicateBreakpoint(bp.id.clone()));
            }
        }

        for bp in &self.breakpoints {
            bp.validate()?;
            for fallback in &bp.fallback {
                if fallback == &bp.id {
                    return Err(LayoutError::SelfFallback(bp.id.clone()));
                }
                if !self.contains(fallback) {
                    return Err(LayoutError::UnknownBreakpoint(fallback.clone()));
                }
            }
        }

        for designated in [self.primary.as_ref(), self.stacked.as_ref()]
            .into_iter()
            .flatten()
        {
            if !self.contains(designated) {
                return Err(LayoutError::UnknownBreakpoint(designated.clone()));
            }
        }

        Ok(())
    }
}

impl Validate for BreakpointSpec {
    fn validate(&self) -> Result<(), LayoutError> {
        if self.columns == 0 {
            return Err(LayoutError::ZeroColumns(self.id.clone()));
        }
        let padding_ok = |p: f32| p.is_finite() && p >= 0.0;
        if !padding_ok(self.padding_x) || !padding_ok(self.padding_y) {
            return Err(LayoutError::InvalidPadding(self.id.clone()));
        }
        Ok(())
    }
}

impl Validate for Brick {
    fn validate(&self) -> Result<(), LayoutError> {
        if self.has_any_rect() {
            Ok(())
        } else {
            Err(LayoutError::UnpositionedBrick(self.id.clone()))
        }
    }
}

impl BrickConstraints {
    /// Check these constraints against the breakpoint they apply to.
    pub fn validate_for(&self, spec: &BreakpointSpec) -> Result<(), LayoutError> {
        let inconsistent = |reason: &str| LayoutError::InconsistentConstraints {
            breakpoint: spec.id.clone(),
            reason: reason.to_string(),
        };

        if self.min_w > spec.columns {
            return Err(LayoutError::MinWidthExceedsColumns {
                breakpoint: spec.id.clone(),
                min_w: self.min_w,
                columns: spec.columns,
            });
        }
        if self.preferred_w == 0 || self.preferred_h == 0 {
            return Err(inconsistent("preferred size must be at least one cell"));
        }
        if self.min_w > self.preferred_w {
            return Err(inconsistent("minW exceeds preferredW"));
        }
        if self.min_h > self.preferred_h {
            return Err(inconsistent("minH exceeds preferredH"));
        }
        if let Some(max_w) = self.max_w {
            if max_w < self.min_w || max_w < self.preferred_w {
                return Err(inconsistent("maxW below minW or preferredW"));
            }
        }
        Ok(())
    }
}
