//! Geohash codec: bidirectional point/box <-> code mapping and grid adjacency.
//!
//! A code is a string over a 32-character alphabet; its length is its
//! precision. Each character carries 5 bits of an interleaved binary
//! subdivision of the longitude/latitude ranges (longitude bit first), so
//! the 32 children of a code exactly tile its bounding box.

use crate::error::{GeocoverError, Result};
use geo::{LineString, Point, Polygon, Rect};
use once_cell::sync::Lazy;
use smallvec::SmallVec;

/// The base32 alphabet used for geohash encoding.
pub const GEOHASH_ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Shortest supported code length.
pub const MIN_PRECISION: usize = 1;

/// Longest supported code length (~3.7cm cells).
pub const MAX_PRECISION: usize = 12;

/// Reverse lookup: ASCII byte -> alphabet index, -1 for alien characters.
static ALPHABET_INDEX: Lazy<[i8; 128]> = Lazy::new(|| {
    let mut table = [-1i8; 128];
    for (i, &b) in GEOHASH_ALPHABET.iter().enumerate() {
        table[b as usize] = i as i8;
    }
    table
});

/// A decoded geohash cell: center point plus half-widths in each axis.
///
/// The box is exact given the alphabet's 5-bits-per-character resolution;
/// there is no rounding error beyond floating point itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedCell {
    /// Cell center (x = longitude, y = latitude).
    pub center: Point,
    /// Half the cell height in degrees of latitude.
    pub lat_error: f64,
    /// Half the cell width in degrees of longitude.
    pub lng_error: f64,
}

impl DecodedCell {
    /// The cell's axis-aligned bounding box.
    pub fn rect(&self) -> Rect {
        Rect::new(
            geo::coord! {
                x: self.center.x() - self.lng_error,
                y: self.center.y() - self.lat_error,
            },
            geo::coord! {
                x: self.center.x() + self.lng_error,
                y: self.center.y() + self.lat_error,
            },
        )
    }

    /// The cell's box as a closed polygon ring: lower-left, lower-right,
    /// upper-right, upper-left.
    pub fn polygon(&self) -> Polygon {
        let min_x = self.center.x() - self.lng_error;
        let max_x = self.center.x() + self.lng_error;
        let min_y = self.center.y() - self.lat_error;
        let max_y = self.center.y() + self.lat_error;

        Polygon::new(
            LineString::from(vec![
                (min_x, min_y),
                (max_x, min_y),
                (max_x, max_y),
                (min_x, max_y),
                (min_x, min_y),
            ]),
            vec![],
        )
    }
}

/// Validate that a code is non-empty, within the supported precision range,
/// and drawn entirely from the geohash alphabet.
pub fn validate_code(code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(GeocoverError::InvalidGeohash(code.to_string()));
    }
    if code.len() > MAX_PRECISION {
        return Err(GeocoverError::InvalidPrecision(code.len()));
    }
    for b in code.bytes() {
        if b >= 128 || ALPHABET_INDEX[b as usize] < 0 {
            return Err(GeocoverError::InvalidGeohash(code.to_string()));
        }
    }
    Ok(())
}

/// Encode a point into a geohash code of the given precision.
///
/// Recursively halves the longitude and latitude ranges, keeping the half
/// containing the point, alternating longitude/latitude bits and emitting
/// one alphabet character per 5 bits.
///
/// # Errors
///
/// `InvalidPrecision` outside 1..=12, `InvalidInput` for non-finite or
/// out-of-range coordinates.
///
/// # Examples
///
/// ```rust
/// use geo::Point;
///
/// let code = geocover::encode(Point::new(-5.603, 42.605), 5)?;
/// assert_eq!(code, "ezs42");
/// # Ok::<(), geocover::GeocoverError>(())
/// ```
pub fn encode(point: Point, precision: usize) -> Result<String> {
    if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        return Err(GeocoverError::InvalidPrecision(precision));
    }
    let (lng, lat) = (point.x(), point.y());
    if !lng.is_finite()
        || !lat.is_finite()
        || !(-180.0..=180.0).contains(&lng)
        || !(-90.0..=90.0).contains(&lat)
    {
        return Err(GeocoverError::InvalidInput(format!(
            "Coordinates out of range: ({}, {})",
            lng, lat
        )));
    }

    let mut lat_range = (-90.0f64, 90.0f64);
    let mut lng_range = (-180.0f64, 180.0f64);
    let mut code = String::with_capacity(precision);
    let mut bits: usize = 0;
    let mut bit_count = 0;
    let mut even = true; // longitude bit next

    while code.len() < precision {
        let (range, value) = if even {
            (&mut lng_range, lng)
        } else {
            (&mut lat_range, lat)
        };
        // A point exactly on a midline belongs to the upper half.
        let mid = (range.0 + range.1) / 2.0;
        bits <<= 1;
        if value >= mid {
            bits |= 1;
            range.0 = mid;
        } else {
            range.1 = mid;
        }
        even = !even;
        bit_count += 1;
        if bit_count == 5 {
            code.push(GEOHASH_ALPHABET[bits] as char);
            bits = 0;
            bit_count = 0;
        }
    }
    Ok(code)
}

/// Decode a geohash code into its cell center and half-widths.
///
/// Exact inverse of [`encode`]: replays the bit interleaving against the
/// full latitude/longitude ranges.
///
/// # Examples
///
/// ```rust
/// let cell = geocover::decode("ezs42")?;
/// assert!((cell.center.y() - 42.605).abs() < 0.03);
/// assert!((cell.center.x() + 5.603).abs() < 0.03);
/// # Ok::<(), geocover::GeocoverError>(())
/// ```
pub fn decode(code: &str) -> Result<DecodedCell> {
    validate_code(code)?;

    let mut lat_range = (-90.0f64, 90.0f64);
    let mut lng_range = (-180.0f64, 180.0f64);
    let mut even = true;

    for b in code.bytes() {
        let idx = ALPHABET_INDEX[b as usize];
        for shift in (0..5).rev() {
            let range = if even { &mut lng_range } else { &mut lat_range };
            let mid = (range.0 + range.1) / 2.0;
            if (idx >> shift) & 1 == 1 {
                range.0 = mid;
            } else {
                range.1 = mid;
            }
            even = !even;
        }
    }

    Ok(DecodedCell {
        center: Point::new(
            (lng_range.0 + lng_range.1) / 2.0,
            (lat_range.0 + lat_range.1) / 2.0,
        ),
        lat_error: (lat_range.1 - lat_range.0) / 2.0,
        lng_error: (lng_range.1 - lng_range.0) / 2.0,
    })
}

/// The bounding box of a code.
pub fn cell_rect(code: &str) -> Result<Rect> {
    Ok(decode(code)?.rect())
}

/// The bounding box of a code as a closed polygon ring.
pub fn cell_polygon(code: &str) -> Result<Polygon> {
    Ok(decode(code)?.polygon())
}

/// Compute the adjacent codes of equal precision.
///
/// Steps one full cell width/height from the decoded center in the eight
/// compass directions and re-encodes. Longitude wraps across the
/// antimeridian; steps past a pole are dropped, so cells in the top or
/// bottom latitude band have fewer than eight neighbors.
///
/// # Examples
///
/// ```rust
/// let ring = geocover::neighbors("ezs42")?;
/// assert_eq!(ring.len(), 8);
/// # Ok::<(), geocover::GeocoverError>(())
/// ```
pub fn neighbors(code: &str) -> Result<SmallVec<[String; 8]>> {
    let cell = decode(code)?;
    let precision = code.len();
    let lat_step = cell.lat_error * 2.0;
    let lng_step = cell.lng_error * 2.0;

    let mut ring = SmallVec::new();
    for dy in [-1i8, 0, 1] {
        for dx in [-1i8, 0, 1] {
            if dx == 0 && dy == 0 {
                continue;
            }
            let lat = cell.center.y() + f64::from(dy) * lat_step;
            if !(-90.0..=90.0).contains(&lat) {
                continue;
            }
            let mut lng = cell.center.x() + f64::from(dx) * lng_step;
            if lng > 180.0 {
                lng -= 360.0;
            } else if lng < -180.0 {
                lng += 360.0;
            }
            ring.push(encode(Point::new(lng, lat), precision)?);
        }
    }
    Ok(ring)
}

/// The parent code (one precision level coarser), or `None` at the top level.
pub fn parent(code: &str) -> Option<&str> {
    if code.len() > 1 {
        Some(&code[..code.len() - 1])
    } else {
        None
    }
}

/// The 32 child codes one precision level finer, one per alphabet character.
///
/// # Errors
///
/// `InvalidPrecision` if the children would exceed [`MAX_PRECISION`].
pub fn children(code: &str) -> Result<Vec<String>> {
    validate_code(code)?;
    if code.len() + 1 > MAX_PRECISION {
        return Err(GeocoverError::InvalidPrecision(code.len() + 1));
    }
    Ok(GEOHASH_ALPHABET
        .iter()
        .map(|&b| {
            let mut child = String::with_capacity(code.len() + 1);
            child.push_str(code);
            child.push(b as char);
            child
        })
        .collect())
}
