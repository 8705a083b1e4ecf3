//! Newton iteration over whole grids.
//!
//! A [`Solver`] maps one [`IterationState`] to a later one. [`NewtonSolver`]
//! does the arithmetic; [`crate::threads::ThreadedSolver`] fans the same work
//! out over row bands.

pub mod newton;
pub mod state;

pub use newton::NewtonSolver;
pub use state::IterationState;

pub trait Solver<T> {
    fn solve(&self, state: &T) -> T;
}
