//! Reconstruction boundary: turning cell sets back into geometry.

use crate::codec;
use crate::error::Result;
use geo::{MultiPolygon, Polygon, Rect, unary_union};

/// Decode every code in a cell set into its bounding box.
pub fn decode_all<'a, I>(cells: I) -> Result<Vec<Rect>>
where
    I: IntoIterator<Item = &'a String>,
{
    cells.into_iter().map(|code| codec::cell_rect(code)).collect()
}

/// Union the bounding boxes of a cell set into a single display geometry.
///
/// Adjacent cells share exact boundary coordinates, so contiguous covers
/// dissolve into a single polygon.
///
/// # Examples
///
/// ```rust
/// use geocover::{cells_to_polygon, children};
///
/// let cells = children("9q8y")?;
/// let merged = cells_to_polygon(&cells)?;
/// assert_eq!(merged.0.len(), 1);
/// # Ok::<(), geocover::GeocoverError>(())
/// ```
pub fn cells_to_polygon<'a, I>(cells: I) -> Result<MultiPolygon>
where
    I: IntoIterator<Item = &'a String>,
{
    let polygons: Vec<Polygon> = cells
        .into_iter()
        .map(|code| codec::cell_polygon(code))
        .collect::<Result<_>>()?;
    Ok(unary_union(polygons.iter()))
}
