use crate::problem::LinearProgram;
use crate::tolerance::{approx_eq, snap_zero};

/// The result of solving an LP problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Optimal production level for each variable (empty unless optimal)
    pub quantities: Vec<f64>,
    /// Maximized objective value (zero unless optimal)
    pub objective_value: f64,
    /// Resource usage at the optimum
    pub analysis: Analysis,
    /// Algorithm that produced this solution
    pub method: Method,
    /// Simplex pivots, or candidate vertices examined
    pub iterations: usize,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// No point satisfies every constraint and non-negativity
    Infeasible,
    /// The objective can grow without limit
    Unbounded,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Exhaustive search over the corners of a two-variable polygon
    VertexEnumeration,
    /// Tableau simplex with Dantzig's pivoting rule
    Simplex,
}

/// How the optimum consumes each resource
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Analysis {
    /// One entry per constraint, in constraint order
    pub resources: Vec<ResourceUsage>,
    /// Which constraints are binding (tight) at optimum
    pub binding_constraints: Vec<String>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceUsage {
    /// Constraint name
    pub constraint: String,
    /// Amount consumed at the optimum
    pub used: f64,
    /// Amount available
    pub capacity: f64,
    /// Unused capacity
    pub slack: f64,
    /// Whether the constraint holds with equality
    pub binding: bool,
}

impl Solution {
    pub fn optimal(
        problem: &LinearProgram,
        quantities: Vec<f64>,
        method: Method,
        iterations: usize,
        tolerance: f64,
    ) -> Self {
        let quantities: Vec<f64> = quantities
            .into_iter()
            .map(|q| snap_zero(q, tolerance).max(0.0))
            .collect();
        let objective_value = problem.evaluate(&quantities);
        let analysis = Analysis::at(problem, &quantities, tolerance);

        Self {
            status: SolutionStatus::Optimal,
            quantities,
            objective_value,
            analysis,
            method,
            iterations,
        }
    }

    pub fn infeasible(method: Method, iterations: usize) -> Self {
        Self::without_point(SolutionStatus::Infeasible, method, iterations)
    }

    pub fn unbounded(method: Method, iterations: usize) -> Self {
        Self::without_point(SolutionStatus::Unbounded, method, iterations)
    }

    fn without_point(status: SolutionStatus, method: Method, iterations: usize) -> Self {
        Self {
            status,
            quantities: Vec::new(),
            objective_value: 0.0,
            analysis: Analysis::default(),
            method,
            iterations,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}

impl Analysis {
    pub fn at(problem: &LinearProgram, values: &[f64], tolerance: f64) -> Self {
        let resources: Vec<ResourceUsage> = problem
            .constraints
            .iter()
            .map(|c| {
                let used = c.usage(values);
                ResourceUsage {
                    constraint: c.name.clone(),
                    used,
                    capacity: c.rhs,
                    slack: snap_zero(c.rhs - used, tolerance).max(0.0),
                    binding: approx_eq(used, c.rhs, tolerance),
                }
            })
            .collect();

        let binding_constraints = resources
            .iter()
            .filter(|r| r.binding)
            .map(|r| r.constraint.clone())
            .collect();

        Self {
            resources,
            binding_constraints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerance::DEFAULT_TOLERANCE;

    #[test]
    fn test_optimal_reports_binding_constraints() {
        let mut lp = LinearProgram::new(vec!["cokelat".to_string(), "keju".to_string()]);
        lp.set_objective(vec![6000.0, 8000.0]);
        lp.add_constraint("flour", vec![200.0, 300.0], 6000.0);
        lp.add_constraint("labor", vec![2.0, 1.0], 40.0);

        let solution = Solution::optimal(&lp, vec![0.0, 20.0], Method::Simplex, 1, DEFAULT_TOLERANCE);

        assert_eq!(solution.objective_value, 160000.0);
        assert_eq!(solution.analysis.binding_constraints, vec!["flour".to_string()]);
        assert_eq!(solution.analysis.resources[1].slack, 20.0);
        assert!(!solution.analysis.resources[1].binding);
    }

    #[test]
    fn test_optimal_snaps_noise_to_zero() {
        let mut lp = LinearProgram::new(vec!["x".to_string()]);
        lp.set_objective(vec![1.0]);
        let solution = Solution::optimal(&lp, vec![-1e-13], Method::Simplex, 0, DEFAULT_TOLERANCE);
        assert_eq!(solution.quantities, vec![0.0]);
    }

    #[test]
    fn test_infeasible_has_no_point() {
        let solution = Solution::infeasible(Method::VertexEnumeration, 0);
        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert!(solution.quantities.is_empty());
        assert!(solution.analysis.resources.is_empty());
    }
}
