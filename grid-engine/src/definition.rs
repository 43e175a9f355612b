//! FILENAME: grid-engine/src/definition.rs
//! Composition Definition - what to place and how.
//!
//! A `LayoutSpec` is a tree of tables. The caller picks the orientation of
//! the outermost group; every nested group stacks its members the other way.
//! These structures are designed to be:
//! - Cheap to build from caller code (`From` impls, `LayoutSpec::group`)
//! - Serializable where they are configuration (`ComposeOptions`)

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use grid_model::{LayoutError, TableModel};
use layout_engine::ResolvedTable;

// ============================================================================
// ORIENTATION
// ============================================================================

/// Direction in which the members of one group are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
}

impl Orientation {
    /// The orientation of the next nesting depth.
    pub fn flip(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

impl FromStr for Orientation {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(Orientation::Vertical),
            "horizontal" => Ok(Orientation::Horizontal),
            _ => Err(LayoutError::UnknownOrientation(s.to_string())),
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

fn default_shift() -> u32 {
    1
}

/// Settings for one `compose` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeOptions {
    /// Orientation of the outermost group.
    #[serde(default)]
    pub orientation: Orientation,

    /// Blank columns left after each table placed in a horizontal group.
    #[serde(default = "default_shift")]
    pub h_shift_by: u32,

    /// Blank rows left after each table placed in a vertical group.
    #[serde(default = "default_shift")]
    pub v_shift_by: u32,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        ComposeOptions {
            orientation: Orientation::Vertical,
            h_shift_by: 1,
            v_shift_by: 1,
        }
    }
}

impl ComposeOptions {
    pub fn new(orientation: Orientation) -> Self {
        ComposeOptions {
            orientation,
            ..ComposeOptions::default()
        }
    }

    pub fn with_shifts(mut self, h_shift_by: u32, v_shift_by: u32) -> Self {
        self.h_shift_by = h_shift_by;
        self.v_shift_by = v_shift_by;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// LAYOUT SPEC
// ============================================================================

/// What to compose: one table, or an ordered group of specs.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutSpec {
    /// Resolved at (0, 0) during composition.
    Table(TableModel),
    /// Already resolved; moved back to (0, 0) before packing.
    Resolved(ResolvedTable),
    Group(Vec<LayoutSpec>),
}

impl LayoutSpec {
    pub fn group<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LayoutSpec>,
    {
        LayoutSpec::Group(members.into_iter().map(Into::into).collect())
    }

    /// Number of tables in this layout, at any depth.
    pub fn table_count(&self) -> usize {
        match self {
            LayoutSpec::Table(_) | LayoutSpec::Resolved(_) => 1,
            LayoutSpec::Group(members) => members.iter().map(LayoutSpec::table_count).sum(),
        }
    }
}

impl From<TableModel> for LayoutSpec {
    fn from(table: TableModel) -> Self {
        LayoutSpec::Table(table)
    }
}

impl From<ResolvedTable> for LayoutSpec {
    fn from(table: ResolvedTable) -> Self {
        LayoutSpec::Resolved(table)
    }
}

impl From<Vec<LayoutSpec>> for LayoutSpec {
    fn from(members: Vec<LayoutSpec>) -> Self {
        LayoutSpec::Group(members)
    }
}
