use bakeplan_solver::{SolveError, Solution, Solver};
use log::info;
use thiserror::Error;

use crate::model::{ModelError, build};
use crate::region::{FeasibleRegionSample, Projector, RegionError};
use crate::report::{Report, ReportError, aggregate};
use crate::scenario::Scenario;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Region(#[from] RegionError),
}

/// Solver output plus everything derived from it for presentation
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub solution: Solution,
    pub report: Report,
    /// Present for two-product scenarios only
    pub region: Option<FeasibleRegionSample>,
    /// Chart marker for the optimum, when there is one and it can be drawn
    pub optimum: Option<(f64, f64)>,
}

/// Build, solve, aggregate and (for two products) project a scenario
pub fn plan(scenario: &Scenario) -> Result<Plan, PlanError> {
    plan_with(scenario, &Solver::new())
}

pub fn plan_with(scenario: &Scenario, solver: &Solver) -> Result<Plan, PlanError> {
    let lp = build(&scenario.products, &scenario.resources)?;
    let solution = solver.solve(&lp)?;
    let report = aggregate(&scenario.products, &solution)?;

    let (region, optimum) = if lp.num_variables() == 2 {
        let region = Projector::new()
            .with_samples(scenario.samples)
            .with_tolerance(solver.tolerance())
            .project(&lp, 0.0..scenario.horizon)?;
        let optimum = match solution.quantities.as_slice() {
            [x, y] => Some((*x, *y)),
            _ => None,
        };
        (Some(region), optimum)
    } else {
        (None, None)
    };

    info!("planned {} products with status {:?}", lp.num_variables(), solution.status);

    Ok(Plan {
        solution,
        report,
        region,
        optimum,
    })
}

#[cfg(test)]
mod tests {
    use bakeplan_solver::SolutionStatus;

    use super::*;
    use crate::model::{ProductSpec, ResourceLimit};

    #[test]
    fn test_default_scenario() {
        let plan = plan(&Scenario::default()).unwrap();

        assert_eq!(plan.solution.status, SolutionStatus::Optimal);
        assert!((plan.report.total_profit.unwrap() - 170000.0).abs() < 1e-6);
        let (x, y) = plan.optimum.unwrap();
        assert!((x - 15.0).abs() < 1e-9);
        assert!((y - 10.0).abs() < 1e-9);
        assert_eq!(plan.region.unwrap().xs.len(), 400);
    }

    #[test]
    fn test_infeasible_plan_has_no_marker() {
        let mut scenario = Scenario::default();
        scenario.resources[0].capacity = -100.0;
        let plan = plan(&scenario).unwrap();

        assert_eq!(plan.report.status, SolutionStatus::Infeasible);
        assert_eq!(plan.optimum, None);
        // The chart is still drawn: the constraint lines exist, the area is empty
        let region = plan.region.unwrap();
        assert_eq!(region.filled().count(), 0);
    }

    #[test]
    fn test_three_products_skip_region() {
        let scenario = Scenario {
            products: vec![
                ProductSpec::new("Cokelat", 6000.0, vec![200.0, 2.0]),
                ProductSpec::new("Keju", 8000.0, vec![300.0, 1.0]),
                ProductSpec::new("Pandan", 7000.0, vec![250.0, 1.5]),
            ],
            resources: vec![ResourceLimit::new("Tepung", 6000.0), ResourceLimit::new("Jam Kerja", 40.0)],
            ..Scenario::default()
        };
        let plan = plan(&scenario).unwrap();

        assert_eq!(plan.solution.status, SolutionStatus::Optimal);
        assert_eq!(plan.report.lines.len(), 3);
        assert!(plan.region.is_none());
        assert!(plan.optimum.is_none());
    }

    #[test]
    fn test_model_errors_propagate() {
        let scenario = Scenario {
            products: vec![],
            ..Scenario::default()
        };
        assert!(matches!(plan(&scenario), Err(PlanError::Model(ModelError::ShapeMismatch(_)))));
    }

    #[test]
    fn test_bad_horizon_is_rejected() {
        let scenario = Scenario::default().with_horizon(0.0);
        assert!(matches!(
            plan(&scenario),
            Err(PlanError::Region(RegionError::InvalidSweep { .. }))
        ));
    }

    #[test]
    fn test_stalled_simplex_propagates() {
        let scenario = Scenario {
            products: vec![
                ProductSpec::new("Cokelat", 6000.0, vec![200.0, 2.0]),
                ProductSpec::new("Keju", 8000.0, vec![300.0, 1.0]),
                ProductSpec::new("Pandan", 7000.0, vec![250.0, 1.5]),
            ],
            ..Scenario::default()
        };
        let solver = Solver::new().with_max_iterations(0);
        assert_eq!(
            plan_with(&scenario, &solver).unwrap_err(),
            PlanError::Solve(SolveError::NumericalStall { iterations: 0 })
        );
    }
}
