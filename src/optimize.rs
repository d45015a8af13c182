//! Cell-set optimization: merging sibling groups into parent cells.
//!
//! The optimizer walks a cell set through a bounded number of merge cycles.
//! In each cycle every code is grouped with its 31 siblings; a group is
//! replaced by its parent when the group is complete, or, on the first
//! cycle only, when enough siblings are present to stay within the
//! configured error tolerance.

use crate::codec::{self, GEOHASH_ALPHABET, MAX_PRECISION, MIN_PRECISION};
use crate::cover::CellSet;
use crate::error::{GeocoverError, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Number of sibling codes sharing a parent.
pub const SIBLING_GROUP_SIZE: usize = 32;

/// Parameters controlling cell-set optimization.
///
/// `largest_size` is the coarsest (shortest) code length the optimizer may
/// merge up to; `smallest_size` is the finest (longest) length retained when
/// forced upscaling is on; `input_precision` is the precision of the cell
/// set entering the optimizer and bounds the cycle count.
///
/// # Examples
///
/// ```rust
/// use geocover::OptimizeOptions;
///
/// let options = OptimizeOptions::new(4, 6, 6)
///     .with_error_percent(5.0)
///     .with_forced_upscale(true);
/// assert_eq!(options.largest_size, 4);
/// assert_eq!(options.error_percent, 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeOptions {
    /// Coarsest allowed code length (shortest string).
    pub largest_size: usize,
    /// Finest allowed code length (longest string).
    pub smallest_size: usize,
    /// Precision of the input cell set.
    pub input_precision: usize,
    /// Fraction of missing siblings tolerated when merging, 0-100.
    #[serde(default = "OptimizeOptions::default_error_percent")]
    pub error_percent: f64,
    /// Truncate unmerged codes to `smallest_size` instead of keeping them.
    #[serde(default)]
    pub forced_upscale: bool,
}

impl OptimizeOptions {
    const fn default_error_percent() -> f64 {
        10.0
    }

    pub fn new(largest_size: usize, smallest_size: usize, input_precision: usize) -> Self {
        Self {
            largest_size,
            smallest_size,
            input_precision,
            error_percent: Self::default_error_percent(),
            forced_upscale: false,
        }
    }

    pub fn with_error_percent(mut self, error_percent: f64) -> Self {
        self.error_percent = error_percent;
        self
    }

    pub fn with_forced_upscale(mut self, forced_upscale: bool) -> Self {
        self.forced_upscale = forced_upscale;
        self
    }

    fn validate(&self) -> Result<()> {
        for size in [self.largest_size, self.smallest_size, self.input_precision] {
            if !(MIN_PRECISION..=MAX_PRECISION).contains(&size) {
                return Err(GeocoverError::InvalidPrecision(size));
            }
        }
        if self.largest_size > self.smallest_size {
            return Err(GeocoverError::InvalidRange {
                largest: self.largest_size,
                smallest: self.smallest_size,
            });
        }
        if !(0.0..=100.0).contains(&self.error_percent) {
            return Err(GeocoverError::InvalidParameter(format!(
                "error_percent ({}) must be between 0 and 100",
                self.error_percent
            )));
        }
        Ok(())
    }

    /// Worst-case merge cycles: the number of precision levels that must be
    /// traversed from the input precision down to `largest_size`.
    fn cycle_budget(&self) -> usize {
        if self.smallest_size < self.input_precision {
            (self.input_precision - self.smallest_size) + (self.smallest_size - self.largest_size)
        } else {
            self.smallest_size - self.largest_size
        }
    }
}

/// Reduce a cell set toward `largest_size` by iteratively merging sibling
/// groups into their parent code.
///
/// Returns `Ok(None)` when the input set is empty: "no input" stays
/// distinguishable from any populated result, which matters because merging
/// never empties a non-empty set. A group merges when all 32 siblings are
/// present, or, on the first cycle only, when the surviving fraction is
/// within `error_percent` of complete. Unmerged codes are kept as-is, or
/// truncated to `smallest_size` when `forced_upscale` is set. Cycles stop
/// once every surviving code has reached `largest_size`, or the cycle
/// budget is exhausted; at least one cycle always runs.
///
/// # Errors
///
/// `InvalidRange` when `largest_size > smallest_size`, `InvalidParameter`
/// for an `error_percent` outside 0-100, `InvalidPrecision` for sizes
/// outside the supported range, `InvalidGeohash` for malformed codes.
///
/// # Examples
///
/// ```rust
/// use geocover::{CellSet, OptimizeOptions, children, optimize};
///
/// // A complete sibling group collapses into its parent.
/// let cells: CellSet = children("9q8")?.into_iter().collect();
/// let options = OptimizeOptions::new(3, 5, 4).with_error_percent(0.0);
/// let optimized = optimize(&cells, &options)?.expect("non-empty input");
/// assert_eq!(optimized.len(), 1);
/// assert!(optimized.contains("9q8"));
/// # Ok::<(), geocover::GeocoverError>(())
/// ```
pub fn optimize(cells: &CellSet, options: &OptimizeOptions) -> Result<Option<CellSet>> {
    options.validate()?;
    if cells.is_empty() {
        return Ok(None);
    }
    for code in cells {
        codec::validate_code(code)?;
    }

    let budget = options.cycle_budget();
    let threshold = SIBLING_GROUP_SIZE as f64 * (1.0 - options.error_percent / 100.0);
    let mut working = cells.clone();
    let mut cycle = 0usize;

    loop {
        let mut next = CellSet::default();
        let mut handled: FxHashSet<String> = FxHashSet::default();

        for code in &working {
            if code.len() < options.largest_size {
                // Coarser than the merge floor; carried through untouched
                next.insert(code.clone());
                continue;
            }
            let group_parent = &code[..code.len() - 1];
            if handled.contains(group_parent) || handled.contains(code.as_str()) {
                continue;
            }

            let overlap = sibling_group(group_parent)
                .filter(|sibling| working.contains(sibling))
                .count();
            let complete = overlap == SIBLING_GROUP_SIZE;

            if complete || (overlap as f64 >= threshold && cycle == 0) {
                handled.insert(group_parent.to_string());
                next.insert(group_parent.to_string());
            } else {
                handled.insert(code.clone());
                if options.forced_upscale && code.len() >= options.smallest_size {
                    next.insert(code[..options.smallest_size].to_string());
                } else {
                    next.insert(code.clone());
                }
            }
        }

        cycle += 1;
        let target_reached = next.iter().all(|c| c.len() == options.largest_size);
        log::trace!("merge cycle {} produced {} cells", cycle, next.len());
        working = next;
        if target_reached || cycle >= budget {
            break;
        }
    }

    Ok(Some(working))
}

/// The 32 codes sharing `group_parent` as their prefix.
fn sibling_group(group_parent: &str) -> impl Iterator<Item = String> + '_ {
    GEOHASH_ALPHABET.iter().map(move |&b| {
        let mut sibling = String::with_capacity(group_parent.len() + 1);
        sibling.push_str(group_parent);
        sibling.push(b as char);
        sibling
    })
}
