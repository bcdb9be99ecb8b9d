mod error;
mod problem;
mod simplex;
mod solution;
mod solver;
pub mod tolerance;
mod vertex;

pub use error::SolveError;
pub use problem::{Constraint, LinearProgram};
pub use solution::{Analysis, Method, ResourceUsage, Solution, SolutionStatus};
pub use solver::Solver;
