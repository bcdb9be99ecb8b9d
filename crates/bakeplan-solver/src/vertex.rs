use log::debug;

use crate::error::SolveError;
use crate::problem::LinearProgram;
use crate::solution::{Method, Solution};
use crate::solver::Solver;
use crate::tolerance::{approx_eq, snap_zero};

impl Solver {
    /// Solve a two-variable LP by enumerating the corners of its feasible polygon.
    ///
    /// Every pairwise intersection of the constraint lines and the two axes is
    /// a candidate; the feasible candidate with the highest objective wins.
    /// Ties go to the vertex that consumes the least total resource, then to
    /// the lexicographically smallest quantities.
    pub fn solve_vertices(&self, problem: &LinearProgram) -> Result<Solution, SolveError> {
        self.check_problem(problem)?;
        if problem.num_variables() != 2 {
            return Err(SolveError::Dimension(problem.num_variables()));
        }

        if self.has_negative_capacity(problem) {
            return Ok(Solution::infeasible(Method::VertexEnumeration, 0));
        }

        let lines = boundary_lines(problem);
        let mut best: Option<Vertex> = None;
        let mut examined = 0;

        for (i, first) in lines.iter().enumerate() {
            for second in &lines[i + 1..] {
                let Some(point) = first.intersect(second, self.tolerance) else {
                    continue;
                };
                examined += 1;

                if !problem.is_feasible(&point, self.tolerance) {
                    continue;
                }

                let point = point.map(|v| snap_zero(v, self.tolerance).max(0.0));
                let vertex = Vertex {
                    point,
                    objective: problem.evaluate(&point),
                    usage: problem.total_usage(&point),
                };
                debug!("feasible vertex {:?} with objective {}", vertex.point, vertex.objective);

                if best.as_ref().is_none_or(|b| vertex.beats(b, self.tolerance)) {
                    best = Some(vertex);
                }
            }
        }

        let Some(best) = best else {
            return Ok(Solution::infeasible(Method::VertexEnumeration, examined));
        };

        if let Some(ray) = self.improving_ray(problem) {
            debug!("objective grows without limit along {:?}", ray);
            return Ok(Solution::unbounded(Method::VertexEnumeration, examined));
        }

        Ok(Solution::optimal(
            problem,
            best.point.to_vec(),
            Method::VertexEnumeration,
            examined,
            self.tolerance,
        ))
    }

    /// Finds a direction of the (non-empty) feasible region along which the
    /// objective keeps growing.
    ///
    /// The recession cone `{d >= 0, A·d <= 0}` is a planar cone, so it is
    /// spanned by its extreme rays: the axes, or a direction along which some
    /// constraint uses nothing. A linear objective is positive somewhere on the
    /// cone iff it is positive on one of those rays.
    fn improving_ray(&self, problem: &LinearProgram) -> Option<[f64; 2]> {
        let mut rays = vec![[1.0, 0.0], [0.0, 1.0]];
        for c in &problem.constraints {
            let [a, b] = [c.coefficients[0], c.coefficients[1]];
            let norm = a.hypot(b);
            if norm == 0.0 {
                continue;
            }
            rays.push([b / norm, -a / norm]);
            rays.push([-b / norm, a / norm]);
        }

        rays.into_iter()
            .map(|d| d.map(|v| snap_zero(v, self.tolerance)))
            .filter(|d| d.iter().all(|&v| v >= 0.0))
            .filter(|d| {
                problem
                    .constraints
                    .iter()
                    .all(|c| !self.is_positive_along(c.usage(d), &c.coefficients))
            })
            .find(|d| self.is_positive_along(problem.evaluate(d), &problem.objective))
    }

    /// `value = coefficients · d` for a unit ray `d`, compared against the
    /// coefficients' own magnitude so that tiny but non-zero usages still
    /// block the ray.
    fn is_positive_along(&self, value: f64, coefficients: &[f64]) -> bool {
        let norm = coefficients.iter().map(|v| v * v).sum::<f64>().sqrt();
        value > self.tolerance * norm
    }
}

/// A line `a·x = b` bounding the feasible polygon
#[derive(Debug, Clone, Copy)]
struct Line {
    a: [f64; 2],
    b: f64,
}

impl Line {
    fn intersect(&self, other: &Line, tolerance: f64) -> Option<[f64; 2]> {
        let norm = self.a[0].hypot(self.a[1]) * other.a[0].hypot(other.a[1]);
        let det = self.a[0] * other.a[1] - self.a[1] * other.a[0];
        if norm == 0.0 || det.abs() <= tolerance * norm {
            return None;
        }

        let x = (self.b * other.a[1] - self.a[1] * other.b) / det;
        let y = (self.a[0] * other.b - self.b * other.a[0]) / det;
        Some([x, y])
    }
}

/// The two axes followed by every constraint at equality
fn boundary_lines(problem: &LinearProgram) -> Vec<Line> {
    let axes = [
        Line { a: [1.0, 0.0], b: 0.0 },
        Line { a: [0.0, 1.0], b: 0.0 },
    ];
    axes.into_iter()
        .chain(problem.constraints.iter().map(|c| Line {
            a: [c.coefficients[0], c.coefficients[1]],
            b: c.rhs,
        }))
        .collect()
}

#[derive(Debug, Clone)]
struct Vertex {
    point: [f64; 2],
    objective: f64,
    usage: f64,
}

impl Vertex {
    fn beats(&self, other: &Vertex, tolerance: f64) -> bool {
        if !approx_eq(self.objective, other.objective, tolerance) {
            return self.objective > other.objective;
        }
        if !approx_eq(self.usage, other.usage, tolerance) {
            return self.usage < other.usage;
        }
        for (mine, theirs) in self.point.iter().zip(&other.point) {
            if !approx_eq(*mine, *theirs, tolerance) {
                return mine < theirs;
            }
        }
        false
    }
}
