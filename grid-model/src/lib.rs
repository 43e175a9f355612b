//! FILENAME: grid-model/src/lib.rs
//! PURPOSE: Data types shared by the layout and composition crates.
//! CONTEXT: Labels and label trees, cell values and styles, spans, the table
//! model and the error type. Nothing here knows about placement.

pub mod coord;
pub mod error;
pub mod label;
pub mod source;
pub mod style;
pub mod table;
pub mod tree;
pub mod value;

pub use coord::{checked_coord, coord_to_a1, index_to_col, A1Cache, CellCoord, Span};
pub use error::LayoutError;
pub use label::{key_to_string, Axis, Label, LabelKey, Labels};
pub use source::{CellContent, TableSource};
pub use style::{Style, StyleId, StyleRegistry};
pub use table::{Cell, StyledValue, TableModel, TableOptions};
pub use tree::{LabelNode, LabelTree, NodeData, NodeId};
pub use value::Value;
