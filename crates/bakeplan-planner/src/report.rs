use bakeplan_solver::tolerance::{DEFAULT_TOLERANCE, approx_eq};
use bakeplan_solver::{Solution, SolutionStatus};
use log::error;
use thiserror::Error;

use crate::model::ProductSpec;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    #[error("Solution has {found} quantities for {expected} products")]
    ShapeMismatch { expected: usize, found: usize },
    /// The solver returned an objective that its own quantities do not add up to
    #[error("Profit contributions sum to {actual} but the solver reported {expected}")]
    Inconsistent { expected: f64, actual: f64 },
}

/// Per-product breakdown of an optimal production plan
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub status: SolutionStatus,
    /// Empty unless the solve was optimal
    pub lines: Vec<ReportLine>,
    pub total_profit: Option<f64>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub product: String,
    pub quantity: f64,
    pub profit_per_unit: f64,
    pub profit_contribution: f64,
}

impl Report {
    fn status_only(status: SolutionStatus) -> Self {
        Self {
            status,
            lines: Vec::new(),
            total_profit: None,
        }
    }
}

/// Combine a solution with the per-unit economics it was solved from
pub fn aggregate(products: &[ProductSpec], solution: &Solution) -> Result<Report, ReportError> {
    if solution.status != SolutionStatus::Optimal {
        return Ok(Report::status_only(solution.status));
    }

    if solution.quantities.len() != products.len() {
        return Err(ReportError::ShapeMismatch {
            expected: products.len(),
            found: solution.quantities.len(),
        });
    }

    let lines: Vec<ReportLine> = products
        .iter()
        .zip(&solution.quantities)
        .map(|(product, &quantity)| ReportLine {
            product: product.name.clone(),
            quantity,
            profit_per_unit: product.profit_per_unit,
            profit_contribution: quantity * product.profit_per_unit,
        })
        .collect();

    let total: f64 = lines.iter().map(|l| l.profit_contribution).sum();
    if !approx_eq(total, solution.objective_value, DEFAULT_TOLERANCE) {
        error!(
            "profit contributions {} disagree with objective {}",
            total, solution.objective_value
        );
        return Err(ReportError::Inconsistent {
            expected: solution.objective_value,
            actual: total,
        });
    }

    Ok(Report {
        status: SolutionStatus::Optimal,
        lines,
        total_profit: Some(total),
    })
}
