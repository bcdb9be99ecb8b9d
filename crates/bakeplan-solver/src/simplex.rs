use log::debug;

use crate::error::SolveError;
use crate::problem::LinearProgram;
use crate::solution::{Method, Solution};
use crate::solver::Solver;

impl Solver {
    /// Solve the LP with the tableau simplex method.
    ///
    /// Starts from the all-slack basis at the origin, which is feasible since
    /// every capacity is non-negative.
    pub fn solve_simplex(&self, problem: &LinearProgram) -> Result<Solution, SolveError> {
        self.check_problem(problem)?;

        if self.has_negative_capacity(problem) {
            return Ok(Solution::infeasible(Method::Simplex, 0));
        }

        let mut tableau = Tableau::new(problem);
        let mut iterations = 0;

        while let Some(pivot_col) = self.find_pivot_column(&tableau) {
            if iterations >= self.max_iterations {
                return Err(SolveError::NumericalStall { iterations });
            }
            let Some(pivot_row) = self.find_pivot_row(&tableau, pivot_col) else {
                debug!("{} can grow without limit", tableau.label(problem, pivot_col));
                return Ok(Solution::unbounded(Method::Simplex, iterations));
            };

            debug!(
                "pivot {}: {} enters, {} leaves",
                iterations + 1,
                tableau.label(problem, pivot_col),
                tableau.label(problem, tableau.basic_vars[pivot_row])
            );
            tableau.pivot(pivot_row, pivot_col);
            iterations += 1;
        }

        Ok(Solution::optimal(
            problem,
            tableau.values(),
            Method::Simplex,
            iterations,
            self.tolerance,
        ))
    }

    /// Dantzig's rule: the most negative reduced cost enters
    fn find_pivot_column(&self, tableau: &Tableau) -> Option<usize> {
        let obj_row = tableau.obj_row();

        let mut min_val = -self.tolerance;
        let mut min_col = None;

        for j in 0..tableau.rhs_col() {
            if tableau.data[obj_row][j] < min_val {
                min_val = tableau.data[obj_row][j];
                min_col = Some(j);
            }
        }

        min_col
    }

    /// Minimum-ratio test; the first row wins ties.
    ///
    /// Column entries at or below the absolute tolerance count as zero, so a
    /// product whose usages are all that small is reported unbounded.
    fn find_pivot_row(&self, tableau: &Tableau, col: usize) -> Option<usize> {
        let rhs_col = tableau.rhs_col();

        let mut min_ratio = f64::INFINITY;
        let mut min_row = None;

        for i in 0..tableau.obj_row() {
            let val = tableau.data[i][col];
            if val > self.tolerance {
                let ratio = tableau.data[i][rhs_col] / val;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    min_row = Some(i);
                }
            }
        }

        min_row
    }
}

/// Dense tableau: one row per constraint plus the objective row, columns for
/// the decision variables, one slack per constraint, and the right-hand side.
struct Tableau {
    data: Vec<Vec<f64>>,
    basic_vars: Vec<usize>,
    n_vars: usize,
}

impl Tableau {
    fn new(problem: &LinearProgram) -> Self {
        let n_vars = problem.num_variables();
        let n_constraints = problem.num_constraints();
        let total_cols = n_vars + n_constraints + 1;

        let mut data = vec![vec![0.0; total_cols]; n_constraints + 1];
        let mut basic_vars = Vec::with_capacity(n_constraints);

        for (i, c) in problem.constraints.iter().enumerate() {
            data[i][..n_vars].copy_from_slice(&c.coefficients);
            data[i][n_vars + i] = 1.0;
            data[i][total_cols - 1] = c.rhs;
            basic_vars.push(n_vars + i);
        }

        // Reduced costs start at -c; the RHS cell accumulates the objective value
        for (j, &coef) in problem.objective.iter().enumerate() {
            data[n_constraints][j] = -coef;
        }

        Self {
            data,
            basic_vars,
            n_vars,
        }
    }

    fn obj_row(&self) -> usize {
        self.data.len() - 1
    }

    fn rhs_col(&self) -> usize {
        self.data[0].len() - 1
    }

    fn pivot(&mut self, row: usize, col: usize) {
        self.basic_vars[row] = col;

        let pivot_val = self.data[row][col];
        for value in self.data[row].iter_mut() {
            *value /= pivot_val;
        }

        let pivot_row = self.data[row].clone();
        for (i, current) in self.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = current[col];
            if factor == 0.0 {
                continue;
            }
            for (value, &p) in current.iter_mut().zip(&pivot_row) {
                *value -= factor * p;
            }
        }
    }

    fn values(&self) -> Vec<f64> {
        let rhs_col = self.rhs_col();
        let mut values = vec![0.0; self.n_vars];
        for (i, &basic) in self.basic_vars.iter().enumerate() {
            if basic < self.n_vars {
                values[basic] = self.data[i][rhs_col];
            }
        }
        values
    }

    fn label(&self, problem: &LinearProgram, col: usize) -> String {
        if col < self.n_vars {
            problem.variables[col].clone()
        } else {
            format!("slack({})", problem.constraints[col - self.n_vars].name)
        }
    }
}
