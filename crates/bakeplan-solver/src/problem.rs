use crate::tolerance::approx_le;

/// A maximization LP in standard inequality form:
/// `maximize cᵀx subject to Ax ≤ b, x ≥ 0`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    /// Variable names, one per product
    pub variables: Vec<String>,
    /// Objective coefficients (profit per unit) to maximize
    pub objective: Vec<f64>,
    /// Resource constraints, each `coefficients · x <= rhs`
    pub constraints: Vec<Constraint>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Name/label for the constraint (for diagnostics)
    pub name: String,
    /// Usage per unit of each variable
    pub coefficients: Vec<f64>,
    /// Available capacity
    pub rhs: f64,
}

impl LinearProgram {
    pub fn new(variables: Vec<String>) -> Self {
        let n = variables.len();
        Self {
            variables,
            objective: vec![0.0; n],
            constraints: Vec::new(),
        }
    }

    pub fn set_objective(&mut self, coefficients: Vec<f64>) {
        self.objective = coefficients;
    }

    pub fn add_constraint(&mut self, name: impl Into<String>, coefficients: Vec<f64>, rhs: f64) {
        self.constraints.push(Constraint {
            name: name.into(),
            coefficients,
            rhs,
        });
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` when the objective and every row have one coefficient per variable
    pub fn is_well_formed(&self) -> bool {
        let n = self.num_variables();
        self.objective.len() == n && self.constraints.iter().all(|c| c.coefficients.len() == n)
    }

    /// Objective value at `values`
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        dot(&self.objective, values)
    }

    /// Left-hand side of every constraint at `values`
    pub fn usage(&self, values: &[f64]) -> Vec<f64> {
        self.constraints.iter().map(|c| c.usage(values)).collect()
    }

    /// Sum of resource consumption over all constraints
    pub fn total_usage(&self, values: &[f64]) -> f64 {
        self.constraints.iter().map(|c| c.usage(values)).sum()
    }

    /// Checks non-negativity and every constraint within `tolerance`
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        values.iter().all(|&v| approx_le(0.0, v, tolerance))
            && self
                .constraints
                .iter()
                .all(|c| approx_le(c.usage(values), c.rhs, tolerance))
    }
}

impl Constraint {
    pub fn usage(&self, values: &[f64]) -> f64 {
        dot(&self.coefficients, values)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bakery() -> LinearProgram {
        let mut lp = LinearProgram::new(vec!["cokelat".to_string(), "keju".to_string()]);
        lp.set_objective(vec![6000.0, 8000.0]);
        lp.add_constraint("flour", vec![200.0, 300.0], 6000.0);
        lp.add_constraint("labor", vec![2.0, 1.0], 40.0);
        lp
    }

    #[test]
    fn test_evaluate_and_usage() {
        let lp = bakery();
        assert_eq!(lp.evaluate(&[15.0, 10.0]), 170000.0);
        assert_eq!(lp.usage(&[15.0, 10.0]), vec![6000.0, 40.0]);
        assert_eq!(lp.total_usage(&[15.0, 10.0]), 6040.0);
    }

    #[test]
    fn test_feasibility_check() {
        let lp = bakery();
        assert!(lp.is_feasible(&[0.0, 0.0], 1e-9));
        assert!(lp.is_feasible(&[15.0, 10.0], 1e-9));
        assert!(!lp.is_feasible(&[15.0, 11.0], 1e-9));
        assert!(!lp.is_feasible(&[-1.0, 0.0], 1e-9));
    }

    #[test]
    fn test_well_formed() {
        let mut lp = bakery();
        assert!(lp.is_well_formed());
        lp.add_constraint("oven", vec![1.0], 10.0);
        assert!(!lp.is_well_formed());
    }
}
