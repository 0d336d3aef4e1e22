//! Breakpoints and the ordered, configurable breakpoint set.
//!
//! Breakpoint names are data, not code: a set can be the three-tier
//! desktop/tablet/mobile model or the two-tier desktop/mobile one, and each
//! breakpoint declares the chain it inherits rects from when a brick has no
//! explicit position there.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DEFAULT_ROW_HEIGHT;

/// Name of a responsive tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointId(String);

impl BreakpointId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BreakpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BreakpointId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for BreakpointId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Static description of one breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointSpec {
    /// Breakpoint name.
    #[serde(rename = "name")]
    pub id: BreakpointId,

    /// Number of grid columns.
    pub columns: u32,

    /// Horizontal container padding (px), applied on both sides.
    #[serde(default)]
    pub padding_x: f32,

    /// Vertical container padding (px), applied at the top.
    #[serde(default)]
    pub padding_y: f32,

    /// Breakpoints consulted, in order, when a brick has no rect here.
    #[serde(default)]
    pub fallback: Vec<BreakpointId>,
}

impl BreakpointSpec {
    pub fn new(id: impl Into<BreakpointId>, columns: u32) -> Self {
        Self {
            id: id.into(),
            columns,
            padding_x: 0.0,
            padding_y: 0.0,
            fallback: Vec::new(),
        }
    }

    pub fn with_padding(mut self, padding_x: f32, padding_y: f32) -> Self {
        self.padding_x = padding_x;
        self.padding_y = padding_y;
        self
    }

    pub fn with_fallback<I, B>(mut self, chain: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<BreakpointId>,
    {
        self.fallback = chain.into_iter().map(Into::into).collect();
        self
    }
}

/// Ordered set of breakpoints, widest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointSet {
    pub breakpoints: Vec<BreakpointSpec>,

    /// Row height in pixels, shared across breakpoints.
    #[serde(default = "default_row_height")]
    pub row_height: u32,

    /// Source of reading order for the stacked layout. Defaults to the first
    /// breakpoint.
    #[serde(default)]
    pub primary: Option<BreakpointId>,

    /// Full-width stacked breakpoint. Defaults to the last breakpoint.
    #[serde(default)]
    pub stacked: Option<BreakpointId>,
}

fn default_row_height() -> u32 {
    DEFAULT_ROW_HEIGHT
}

impl Default for BreakpointSet {
    fn default() -> Self {
        Self::three_tier()
    }
}

impl BreakpointSet {
    pub fn new(breakpoints: Vec<BreakpointSpec>, row_height: u32) -> Self {
        Self {
            breakpoints,
            row_height,
            primary: None,
            stacked: None,
        }
    }

    /// Desktop (12) / tablet (8) / mobile (4). Mobile falls back to tablet
    /// then desktop, desktop to tablet then mobile.
    pub fn three_tier() -> Self {
        Self::new(
            vec![
                BreakpointSpec::new("desktop", 12)
                    .with_padding(20.0, 16.0)
                    .with_fallback(["tablet", "mobile"]),
                BreakpointSpec::new("tablet", 8)
                    .with_padding(16.0, 12.0)
                    .with_fallback(["desktop", "mobile"]),
                BreakpointSpec::new("mobile", 4)
                    .with_padding(10.0, 10.0)
                    .with_fallback(["tablet", "desktop"]),
            ],
            DEFAULT_ROW_HEIGHT,
        )
    }

    /// Desktop (12) / mobile (4), each falling back to the other.
    pub fn two_tier() -> Self {
        Self::new(
            vec![
                BreakpointSpec::new("desktop", 12)
                    .with_padding(20.0, 16.0)
                    .with_fallback(["mobile"]),
                BreakpointSpec::new("mobile", 4)
                    .with_padding(10.0, 10.0)
                    .with_fallback(["desktop"]),
            ],
            DEFAULT_ROW_HEIGHT,
        )
    }

    pub fn with_stacked(mut self, id: impl Into<BreakpointId>) -> Self {
        self.stacked = Some(id.into());
        self
    }

    pub fn with_primary(mut self, id: impl Into<BreakpointId>) -> Self {
        self.primary = Some(id.into());
        self
    }

    pub fn get(&self, id: &BreakpointId) -> Option<&BreakpointSpec> {
        self.breakpoints.iter().find(|bp| &bp.id == id)
    }

    pub fn contains(&self, id: &BreakpointId) -> bool {
        self.get(id).is_some()
    }

    pub fn columns(&self, id: &BreakpointId) -> Option<u32> {
        self.get(id).map(|bp| bp.columns)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BreakpointSpec> {
        self.breakpoints.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &BreakpointId> {
        self.breakpoints.iter().map(|bp| &bp.id)
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Breakpoint that defines reading order.
    pub fn primary(&self) -> Option<&BreakpointId> {
        self.primary
            .as_ref()
            .or_else(|| self.breakpoints.first().map(|bp| &bp.id))
    }

    /// Breakpoint that receives the derived stacked layout.
    pub fn stacked(&self) -> Option<&BreakpointId> {
        self.stacked
            .as_ref()
            .or_else(|| self.breakpoints.last().map(|bp| &bp.id))
    }

    /// Walk `id` and then its fallback chain, returning the first breakpoint
    /// for which `lookup` yields a value.
    pub fn resolve<T, F>(&self, id: &BreakpointId, mut lookup: F) -> Option<(&BreakpointId, T)>
    where
        F: FnMut(&BreakpointId) -> Option<T>,
    {
        let spec = self.get(id)?;
        if let Some(found) = lookup(&spec.id) {
            return Some((&spec.id, found));
        }
        spec.fallback
            .iter()
            .filter_map(|fb| self.get(fb))
            .find_map(|fb| lookup(&fb.id).map(|found| (&fb.id, found)))
    }
}
