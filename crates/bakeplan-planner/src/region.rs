use std::ops::Range;

use bakeplan_solver::LinearProgram;
use bakeplan_solver::tolerance::{DEFAULT_TOLERANCE, approx_le, snap_zero};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegionError {
    #[error("Feasible region can only be drawn for 2 products, found {0}")]
    Dimension(usize),
    #[error("Invalid sweep {start}..{end}: expected finite 0 <= start < end")]
    InvalidSweep { start: f64, end: f64 },
    #[error("At least 2 samples are needed, got {0}")]
    TooFewSamples(usize),
    #[error("At most {max} samples are supported, got {0}", max = MAX_SAMPLES)]
    TooManySamples(usize),
    #[error("Every constraint needs one coefficient per product")]
    ShapeMismatch,
}

/// Upper limit on sampled points per sweep
pub const MAX_SAMPLES: usize = 1_000_000;

/// Samples of the feasible region of a two-product LP, for plotting.
///
/// `x` is the quantity of the first product, `y` of the second.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibleRegionSample {
    pub xs: Vec<f64>,
    /// One line per resource constraint
    pub lines: Vec<BoundaryLine>,
    /// Top edge of the feasible area at each `x`; `None` where nothing is feasible,
    /// infinite where no constraint bounds `y`
    pub envelope: Vec<Option<f64>>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLine {
    pub name: String,
    /// `y` on the constraint line at each `x`; `None` when the constraint does not involve `y`
    pub ys: Vec<Option<f64>>,
}

impl FeasibleRegionSample {
    /// `(x, envelope)` pairs of the samples that belong to the filled area
    pub fn filled(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs
            .iter()
            .zip(&self.envelope)
            .filter_map(|(&x, y)| y.map(|y| (x, y)))
    }
}

/// Sweeps the first product's quantity and bounds the second one
#[derive(Debug, Clone)]
pub struct Projector {
    samples: usize,
    tolerance: f64,
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            samples: 400,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Projector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn project(&self, lp: &LinearProgram, sweep: Range<f64>) -> Result<FeasibleRegionSample, RegionError> {
        if lp.num_variables() != 2 {
            return Err(RegionError::Dimension(lp.num_variables()));
        }
        if !sweep.start.is_finite() || !sweep.end.is_finite() || sweep.start < 0.0 || sweep.start >= sweep.end {
            return Err(RegionError::InvalidSweep {
                start: sweep.start,
                end: sweep.end,
            });
        }
        if !lp.is_well_formed() {
            return Err(RegionError::ShapeMismatch);
        }
        if self.samples < 2 {
            return Err(RegionError::TooFewSamples(self.samples));
        }
        if self.samples > MAX_SAMPLES {
            return Err(RegionError::TooManySamples(self.samples));
        }

        let xs = linspace(&sweep, self.samples);

        let lines = lp
            .constraints
            .iter()
            .map(|c| {
                let [a, b] = [c.coefficients[0], c.coefficients[1]];
                let ys = xs
                    .iter()
                    .map(|&x| {
                        if snap_zero(b, self.tolerance) == 0.0 {
                            None
                        } else {
                            Some((c.rhs - a * x) / b)
                        }
                    })
                    .collect();
                BoundaryLine {
                    name: c.name.clone(),
                    ys,
                }
            })
            .collect();

        let envelope = xs.iter().map(|&x| self.envelope_at(lp, x)).collect();

        Ok(FeasibleRegionSample { xs, lines, envelope })
    }

    /// Largest feasible `y` at `x`, or `None` if no `y >= 0` works
    fn envelope_at(&self, lp: &LinearProgram, x: f64) -> Option<f64> {
        let mut upper = f64::INFINITY;
        let mut lower = 0.0_f64;

        for c in &lp.constraints {
            let [a, b] = [c.coefficients[0], c.coefficients[1]];
            if snap_zero(b, self.tolerance) == 0.0 {
                // Vertical line: either all of this x is allowed or none of it
                if !approx_le(a * x, c.rhs, self.tolerance) {
                    return None;
                }
                continue;
            }

            let bound = (c.rhs - a * x) / b;
            if b > 0.0 {
                upper = upper.min(bound);
            } else {
                lower = lower.max(bound);
            }
        }

        if approx_le(lower, upper, self.tolerance) {
            Some(snap_zero(upper, self.tolerance).max(lower))
        } else {
            None
        }
    }
}

/// `count` evenly spaced points over the sweep, both ends included
fn linspace(sweep: &Range<f64>, count: usize) -> Vec<f64> {
    let step = (sweep.end - sweep.start) / (count - 1) as f64;
    (0..count)
        .map(|i| if i + 1 == count { sweep.end } else { sweep.start + step * i as f64 })
        .collect()
}
