//! Polygon-to-geohash covering and cell-set compression.
//!
//! geocover indexes 2-D polygon regions into sets of geohash cells and
//! compresses those sets by merging sibling groups into coarser parent
//! cells under a configurable coverage-accuracy tolerance. The result is a
//! compact, mergeable spatial key set rather than exact vector geometry.
//!
//! ```rust
//! use geo::polygon;
//! use geocover::prelude::*;
//!
//! let zone = polygon![
//!     (x: -122.45, y: 37.75),
//!     (x: -122.35, y: 37.75),
//!     (x: -122.35, y: 37.80),
//!     (x: -122.45, y: 37.80),
//! ];
//!
//! let cells = polygon_to_cells(&zone, 6, CoverageMode::Intersecting)?;
//! let options = OptimizeOptions::new(4, 6, 6);
//! let optimized = optimize(&cells, &options)?.expect("non-empty input");
//! assert!(optimized.len() <= cells.len());
//!
//! let summary = OptimizationSummary::new(&cells, &optimized);
//! assert!(summary.reduction_percent() >= 0.0);
//! # Ok::<(), geocover::GeocoverError>(())
//! ```

pub mod codec;
pub mod convert;
pub mod cover;
pub mod error;
pub mod optimize;
pub mod stats;

pub use codec::{
    DecodedCell, GEOHASH_ALPHABET, MAX_PRECISION, MIN_PRECISION, cell_polygon, cell_rect,
    children, decode, encode, neighbors, parent, validate_code,
};
pub use convert::{cells_to_polygon, decode_all};
pub use cover::{CellSet, CoverageMode, multi_polygon_to_cells, polygon_to_cells};
pub use error::{GeocoverError, Result};
pub use optimize::{OptimizeOptions, SIBLING_GROUP_SIZE, optimize};
pub use stats::OptimizationSummary;

pub use geo::{MultiPolygon, Point, Polygon, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GeocoverError, Result};

    pub use crate::{CellSet, CoverageMode, multi_polygon_to_cells, polygon_to_cells};

    pub use crate::{OptimizeOptions, optimize};

    pub use crate::{cells_to_polygon, decode_all};

    pub use crate::OptimizationSummary;

    pub use geo::{MultiPolygon, Point, Polygon, Rect};
}
