//! FILENAME: layout-engine/src/lib.rs
//! Layout resolution for labeled tables.
//!
//! Layers:
//! - `span`: Row heights, column widths and label node extents
//! - `resolver`: Absolute spans for labels and data cells (WHERE things go)
//! - `view`: The resolved layout of one table
//! - `shift`: Rigid translation of a resolved layout
//! - `flatten`: The span -> content map handed to renderers

pub mod span;
pub mod view;
pub mod resolver;
pub mod shift;
pub mod flatten;

pub use span::{heights, node_extents, table_height, table_width, widths};
pub use view::{ResolvedCell, ResolvedTable};
pub use resolver::resolve;
pub use shift::all_spans;
pub use flatten::{FlatCell, FlatCellMap, FlatValue, FlattenMode};
