use log::{info, warn};

use crate::error::SolveError;
use crate::problem::LinearProgram;
use crate::solution::{Solution, SolutionStatus};
use crate::tolerance::DEFAULT_TOLERANCE;

/// Production LP solver.
///
/// Two-variable problems are solved exactly by enumerating the corners of the
/// feasible polygon; anything larger goes through the tableau simplex.
#[derive(Debug, Clone)]
pub struct Solver {
    /// Maximum simplex pivots before giving up
    pub(crate) max_iterations: usize,
    /// Relative tolerance for floating point comparisons
    pub(crate) tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Solve the LP, picking the algorithm by variable count
    pub fn solve(&self, problem: &LinearProgram) -> Result<Solution, SolveError> {
        let solution = if problem.num_variables() == 2 {
            self.solve_vertices(problem)?
        } else {
            self.solve_simplex(problem)?
        };

        match solution.status {
            SolutionStatus::Optimal => info!(
                "{:?} found optimum {} at {:?} after {} iterations",
                solution.method, solution.objective_value, solution.quantities, solution.iterations
            ),
            status => warn!("{:?} finished with status {:?}", solution.method, status),
        }

        Ok(solution)
    }

    /// Rejects rows that do not line up with the variables, and NaN/infinite data
    pub(crate) fn check_problem(&self, problem: &LinearProgram) -> Result<(), SolveError> {
        let n = problem.num_variables();
        if n == 0 {
            return Err(SolveError::ShapeMismatch("problem has no variables".to_string()));
        }
        if problem.objective.len() != n {
            return Err(SolveError::ShapeMismatch(format!(
                "objective has {} coefficients for {} variables",
                problem.objective.len(),
                n
            )));
        }
        if problem.objective.iter().any(|c| !c.is_finite()) {
            return Err(SolveError::NonFinite("objective".to_string()));
        }

        for c in &problem.constraints {
            if c.coefficients.len() != n {
                return Err(SolveError::ShapeMismatch(format!(
                    "constraint {} has {} coefficients for {} variables",
                    c.name,
                    c.coefficients.len(),
                    n
                )));
            }
            if !c.rhs.is_finite() || c.coefficients.iter().any(|a| !a.is_finite()) {
                return Err(SolveError::NonFinite(c.name.clone()));
            }
        }

        Ok(())
    }

    /// Capacities must be non-negative; a negative one leaves nothing feasible
    pub(crate) fn has_negative_capacity(&self, problem: &LinearProgram) -> bool {
        problem.constraints.iter().any(|c| c.rhs < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::Method;

    fn bakery(flour: f64, labor: f64) -> LinearProgram {
        let mut lp = LinearProgram::new(vec!["cokelat".to_string(), "keju".to_string()]);
        lp.set_objective(vec![6000.0, 8000.0]);
        lp.add_constraint("flour", vec![200.0, 300.0], flour);
        lp.add_constraint("labor", vec![2.0, 1.0], labor);
        lp
    }

    #[test]
    fn test_two_variables_use_vertex_enumeration() {
        let solution = Solver::new().solve(&bakery(6000.0, 40.0)).unwrap();
        assert_eq!(solution.method, Method::VertexEnumeration);
        assert!((solution.objective_value - 170000.0).abs() < 1e-6);
    }

    #[test]
    fn test_three_variables_use_simplex() {
        let mut lp = LinearProgram::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        lp.set_objective(vec![1.0, 1.0, 1.0]);
        lp.add_constraint("sum", vec![1.0, 1.0, 1.0], 3.0);
        let solution = Solver::new().solve(&lp).unwrap();
        assert_eq!(solution.method, Method::Simplex);
        assert!((solution.objective_value - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let mut lp = bakery(6000.0, 40.0);
        lp.add_constraint("oven", vec![1.0], 10.0);
        let err = Solver::new().solve(&lp).unwrap_err();
        assert!(matches!(err, SolveError::ShapeMismatch(_)));
    }

    #[test]
    fn test_rejects_nan() {
        let lp = bakery(f64::NAN, 40.0);
        assert_eq!(
            Solver::new().solve(&lp).unwrap_err(),
            SolveError::NonFinite("flour".to_string())
        );
    }

    #[test]
    fn test_solve_is_deterministic() {
        let lp = bakery(6000.0, 40.0);
        let solver = Solver::new();
        let first = solver.solve(&lp).unwrap();
        let second = solver.solve(&lp).unwrap();
        assert_eq!(first.quantities, second.quantities);
        assert_eq!(first.objective_value.to_bits(), second.objective_value.to_bits());
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn random_lp(profit: [f64; 2], usage: [[f64; 2]; 3], capacity: [f64; 3]) -> LinearProgram {
            let mut lp = LinearProgram::new(vec!["cokelat".to_string(), "keju".to_string()]);
            lp.set_objective(profit.to_vec());
            for (i, (row, rhs)) in usage.iter().zip(capacity).enumerate() {
                lp.add_constraint(format!("r{}", i), row.to_vec(), rhs);
            }
            lp
        }

        proptest! {
            #[test]
            fn vertex_enumeration_matches_simplex(
                profit in prop::array::uniform2(0.1f64..10000.0),
                usage in prop::array::uniform3(prop::array::uniform2(0.1f64..500.0)),
                capacity in prop::array::uniform3(0.0f64..10000.0),
            ) {
                let lp = random_lp(profit, usage, capacity);
                let solver = Solver::new();
                let vertices = solver.solve_vertices(&lp).unwrap();
                let simplex = solver.solve_simplex(&lp).unwrap();

                prop_assert_eq!(vertices.status, SolutionStatus::Optimal);
                prop_assert_eq!(simplex.status, SolutionStatus::Optimal);
                prop_assert!(vertices.objective_value >= 0.0);
                let scale = vertices.objective_value.abs().max(1.0);
                prop_assert!((vertices.objective_value - simplex.objective_value).abs() <= 1e-6 * scale);
            }

            #[test]
            fn negative_capacity_is_always_infeasible(
                profit in prop::array::uniform2(0.1f64..10000.0),
                usage in prop::array::uniform3(prop::array::uniform2(0.0f64..500.0)),
                capacity in prop::array::uniform3(0.0f64..10000.0),
                deficit in 0.001f64..1000.0,
            ) {
                let mut lp = random_lp(profit, usage, capacity);
                lp.constraints[1].rhs = -deficit;
                let solution = Solver::new().solve(&lp).unwrap();
                prop_assert_eq!(solution.status, SolutionStatus::Infeasible);
            }

            #[test]
            fn resource_free_product_is_unbounded(
                profit in 0.1f64..10000.0,
                usage in prop::array::uniform3(0.1f64..500.0),
                capacity in prop::array::uniform3(0.0f64..10000.0),
            ) {
                let lp = random_lp(
                    [profit, 1.0],
                    [[0.0, usage[0]], [0.0, usage[1]], [0.0, usage[2]]],
                    capacity,
                );
                let solution = Solver::new().solve(&lp).unwrap();
                prop_assert_eq!(solution.status, SolutionStatus::Unbounded);
            }
        }
    }
}
