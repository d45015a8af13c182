//! Polygon rasterization: flood-filling the geohash grid over a polygon.

use crate::codec;
use crate::error::{GeocoverError, Result};
use geo::{BoundingRect, Centroid, Contains, Intersects, MultiPolygon, Polygon};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// A set of geohash codes. Uniqueness is guaranteed; iteration order is not
/// semantically meaningful.
pub type CellSet = FxHashSet<String>;

/// How a grid cell qualifies for membership in a polygon's cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverageMode {
    /// Accept only cells whose box lies fully inside the polygon.
    Inner,
    /// Accept any cell whose box intersects the polygon.
    #[default]
    Intersecting,
}

impl CoverageMode {
    /// Cheap envelope gate: cells failing this are out of the region of
    /// interest and are neither classified nor expanded.
    fn pre_filter(self, envelope: &Polygon, cell: &Polygon) -> bool {
        match self {
            CoverageMode::Inner => envelope.contains(cell),
            CoverageMode::Intersecting => envelope.intersects(cell),
        }
    }

    /// Precise test against the actual polygon.
    fn accepts(self, polygon: &Polygon, cell: &Polygon) -> bool {
        match self {
            CoverageMode::Inner => polygon.contains(cell),
            CoverageMode::Intersecting => polygon.intersects(cell),
        }
    }
}

/// Compute the set of geohash codes at `precision` that cover the polygon.
///
/// Runs a breadth-first flood fill over the grid, seeded at the cell
/// containing the polygon's centroid. Each popped cell is gated against the
/// polygon's envelope, then classified against the polygon itself; the
/// neighbors of every classified cell (accepted or rejected) are enqueued,
/// so the search expands across the whole extent reachable from the seed.
///
/// A polygon whose centroid falls outside its own boundary (concave shapes)
/// is still covered, because expansion continues through rejected cells. A
/// disconnected shape with parts not reachable through grid adjacency from
/// the seed cell will be under-covered; use [`multi_polygon_to_cells`] for
/// multi-part geometries.
///
/// # Errors
///
/// `InvalidPrecision` for an unsupported precision, `InvalidInput` for a
/// degenerate polygon with no centroid or bounding rect.
///
/// # Examples
///
/// ```rust
/// use geo::polygon;
/// use geocover::{CoverageMode, polygon_to_cells};
///
/// let zone = polygon![
///     (x: -122.45, y: 37.75),
///     (x: -122.40, y: 37.75),
///     (x: -122.40, y: 37.78),
///     (x: -122.45, y: 37.78),
/// ];
/// let cells = polygon_to_cells(&zone, 6, CoverageMode::Intersecting)?;
/// assert!(!cells.is_empty());
/// # Ok::<(), geocover::GeocoverError>(())
/// ```
pub fn polygon_to_cells(polygon: &Polygon, precision: usize, mode: CoverageMode) -> Result<CellSet> {
    let envelope = polygon
        .bounding_rect()
        .ok_or_else(|| GeocoverError::InvalidInput("Polygon has no bounding rect".to_string()))?
        .to_polygon();
    let centroid = polygon
        .centroid()
        .ok_or_else(|| GeocoverError::InvalidInput("Polygon has no centroid".to_string()))?;

    let mut accepted = CellSet::default();
    let mut rejected = CellSet::default();
    let mut queue: VecDeque<String> = VecDeque::new();
    queue.push_back(codec::encode(centroid, precision)?);

    while let Some(code) = queue.pop_front() {
        if accepted.contains(&code) || rejected.contains(&code) {
            continue;
        }
        let cell = codec::cell_polygon(&code)?;
        if !mode.pre_filter(&envelope, &cell) {
            continue;
        }
        if mode.accepts(polygon, &cell) {
            accepted.insert(code.clone());
        } else {
            rejected.insert(code.clone());
        }
        for neighbor in codec::neighbors(&code)? {
            if !accepted.contains(&neighbor) && !rejected.contains(&neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    log::debug!(
        "covered polygon with {} cells at precision {} ({} examined)",
        accepted.len(),
        precision,
        accepted.len() + rejected.len()
    );
    Ok(accepted)
}

/// Cover a multi-polygon by flood-filling each part independently and
/// unioning the results. This is the multi-part counterpart of
/// [`polygon_to_cells`]: each part gets its own centroid seed, so parts that
/// are not adjacent on the grid are still covered.
pub fn multi_polygon_to_cells(
    multi_polygon: &MultiPolygon,
    precision: usize,
    mode: CoverageMode,
) -> Result<CellSet> {
    let mut cells = CellSet::default();
    for polygon in &multi_polygon.0 {
        cells.extend(polygon_to_cells(polygon, precision, mode)?);
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(min_x: f64, min_y: f64, size: f64) -> Polygon {
        polygon![
            (x: min_x, y: min_y),
            (x: min_x + size, y: min_y),
            (x: min_x + size, y: min_y + size),
            (x: min_x, y: min_y + size),
        ]
    }

    #[test]
    fn test_square_cover_intersecting() {
        let zone = square(0.0, 0.0, 0.2);
        let cells = polygon_to_cells(&zone, 5, CoverageMode::Intersecting).unwrap();
        assert!(!cells.is_empty());
        for code in &cells {
            assert_eq!(code.len(), 5);
            let cell = codec::cell_polygon(code).unwrap();
            assert!(zone.intersects(&cell));
        }
    }

    #[test]
    fn test_square_cover_inner() {
        let zone = square(0.0, 0.0, 0.2);
        let cells = polygon_to_cells(&zone, 5, CoverageMode::Inner).unwrap();
        assert!(!cells.is_empty());
        for code in &cells {
            let cell = codec::cell_polygon(code).unwrap();
            assert!(zone.contains(&cell));
        }
    }

    #[test]
    fn test_inner_is_subset_of_intersecting() {
        let zone = square(10.0, 48.0, 0.3);
        let inner = polygon_to_cells(&zone, 5, CoverageMode::Inner).unwrap();
        let intersecting = polygon_to_cells(&zone, 5, CoverageMode::Intersecting).unwrap();
        assert!(inner.len() <= intersecting.len());
        assert!(inner.is_subset(&intersecting));
    }

    #[test]
    fn test_concave_polygon_with_outside_centroid() {
        // Horseshoe: two vertical arms joined by a thin bottom bar. The
        // centroid lands in the gap between the arms, outside the polygon.
        let zone: Polygon = polygon![
            (x: 0.0, y: 0.0),
            (x: 0.3, y: 0.0),
            (x: 0.3, y: 0.3),
            (x: 0.28, y: 0.3),
            (x: 0.28, y: 0.02),
            (x: 0.02, y: 0.02),
            (x: 0.02, y: 0.3),
            (x: 0.0, y: 0.3),
        ];
        let cells = polygon_to_cells(&zone, 6, CoverageMode::Intersecting).unwrap();
        assert!(!cells.is_empty());

        // Both arms are reached
        let west_arm = codec::encode(geo::Point::new(0.01, 0.25), 6).unwrap();
        let east_arm = codec::encode(geo::Point::new(0.29, 0.25), 6).unwrap();
        assert!(cells.contains(&west_arm));
        assert!(cells.contains(&east_arm));

        // The gap is not covered
        let gap = codec::encode(geo::Point::new(0.15, 0.2), 6).unwrap();
        assert!(!cells.contains(&gap));
    }

    #[test]
    fn test_multi_polygon_covers_disjoint_parts() {
        let parts = MultiPolygon::new(vec![square(0.0, 0.0, 0.1), square(1.0, 1.0, 0.1)]);
        let cells = multi_polygon_to_cells(&parts, 5, CoverageMode::Intersecting).unwrap();

        let first = codec::encode(geo::Point::new(0.05, 0.05), 5).unwrap();
        let second = codec::encode(geo::Point::new(1.05, 1.05), 5).unwrap();
        assert!(cells.contains(&first));
        assert!(cells.contains(&second));
    }

    #[test]
    fn test_degenerate_polygon() {
        let empty = Polygon::new(geo::LineString::new(vec![]), vec![]);
        assert!(matches!(
            polygon_to_cells(&empty, 5, CoverageMode::Intersecting),
            Err(GeocoverError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_precision_propagates() {
        let zone = square(0.0, 0.0, 0.1);
        assert!(matches!(
            polygon_to_cells(&zone, 0, CoverageMode::Intersecting),
            Err(GeocoverError::InvalidPrecision(0))
        ));
    }
}
