mod error;
mod problem;
mod simplex;
mod solution;
mod standardize;
mod tableau;

pub use error::LpError;
pub use problem::{ConstraintOp, RawLp, Sense, VariableSign};
pub use simplex::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, Solver, TableauEngine};
pub use solution::{SolveResult, SolveStatus};
pub use standardize::{CanonicalLp, ColumnKind, DEFAULT_BIG_M, standardize};
pub use tableau::Tableau;
