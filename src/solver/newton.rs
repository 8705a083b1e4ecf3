use std::sync::Arc;

use ndarray::Zip;

use crate::complex::*;
use crate::polynomial::Cubic;
use crate::solver::{IterationState, Solver};

#[derive(Clone, Debug)]
pub struct NewtonSolver {
    iterations: usize,
    radius: f64,
    function: Cubic,
}

impl NewtonSolver {
    pub fn new(radius: f64, iterations: usize) -> Self {
        Self {
            iterations,
            radius,
            function: Cubic,
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Advances one point, returning `None` once it leaves the disc of
    /// `radius` or stops being finite.
    fn step(&self, z: C<f64>) -> Option<C<f64>> {
        let next = self.function.newton_step(z);
        if next.is_finite() && next.norm() <= self.radius {
            Some(next)
        } else {
            None
        }
    }

    fn orbit(&self, z: &mut C<f64>, invalid: &mut bool) {
        if *invalid {
            return;
        }
        for _ in 0..self.iterations {
            match self.step(*z) {
                Some(next) => *z = next,
                None => {
                    *z = crate::complex::invalid();
                    *invalid = true;
                    return;
                }
            }
        }
    }
}

impl Default for NewtonSolver {
    fn default() -> Self {
        Self::new(1e6, 100)
    }
}

impl Solver<IterationState> for NewtonSolver {
    fn solve(&self, state: &IterationState) -> IterationState {
        let mut za = state.za.as_ref().clone();
        let mut ia = state.invalid.as_ref().clone();

        Zip::from(&mut za)
            .and(&mut ia)
            .for_each(|zv, iv| self.orbit(zv, iv));

        IterationState {
            width: state.width,
            height: state.height,
            iteration: state.iteration.saturating_add(self.iterations),
            za: Arc::new(za),
            invalid: Arc::new(ia),
        }
    }
}

#[cfg(test)]
mod test {
    use ndarray::array;

    use super::*;
    use crate::coord::Viewport;
    use crate::grid::ComplexGrid;
    use crate::threads::{Threaded, ThreadedSolver};

    const REAL_ROOT: f64 = -1.769_292_354_238_631_4;

    fn state_of(points: ndarray::Array2<C<f64>>) -> IterationState {
        IterationState::from(&ComplexGrid::from_array(points))
    }

    #[test]
    fn test_zero_steps_is_identity() {
        let grid = ComplexGrid::initialize(4, 4, &Viewport::from_nums(-1.0, 1.0, -1.0, 1.0)).unwrap();
        let initial = IterationState::from(&grid);
        let solved = NewtonSolver::new(1e6, 0).solve(&initial);
        assert_eq!(solved.values(), grid.points());
        assert_eq!(solved.invalid_count(), 0);
        assert_eq!(solved.iteration(), 0);
    }

    #[test]
    fn test_iteration_count_saturates() {
        let mut state = state_of(array![[cr(-1.7)]]);
        state.iteration = usize::MAX - 1;
        let solved = NewtonSolver::new(1e6, 5).solve(&state);
        assert_eq!(solved.iteration(), usize::MAX);
    }

    #[test]
    fn test_basin_point_converges() {
        let solved = NewtonSolver::new(1e6, 100).solve(&state_of(array![[cr(-1.7), c(1.0, 0.6)]]));
        assert!((solved.value(0, 0) - cr(REAL_ROOT)).norm() < 1e-9);
        assert!(Cubic.value(solved.value(1, 0)).norm() < 1e-5);
        assert_eq!(solved.invalid_count(), 0);
    }

    #[test]
    fn test_cycle_point_never_diverges() {
        let solved = NewtonSolver::new(1e6, 100).solve(&state_of(array![[cr(0.0), cr(1.0)]]));
        assert_eq!(solved.value(0, 0), cr(0.0));
        assert_eq!(solved.value(1, 0), cr(1.0));
    }

    #[test]
    fn test_critical_point_is_invalid() {
        let critical = cr((2.0f64 / 3.0).sqrt());
        let solved = NewtonSolver::new(1e6, 3).solve(&state_of(array![[critical, cr(-1.7)]]));
        assert!(solved.is_invalid(0, 0));
        assert!(is_invalid(solved.value(0, 0)));
        assert!(!solved.is_invalid(1, 0));
        assert_eq!(solved.invalid_count(), 1);
    }

    #[test]
    fn test_invalid_points_stay_invalid() {
        let critical = cr((2.0f64 / 3.0).sqrt());
        let solver = NewtonSolver::new(1e6, 1);
        let once = solver.solve(&state_of(array![[critical]]));
        let twice = solver.solve(&once);
        assert!(twice.is_invalid(0, 0));
        assert_eq!(twice.iteration(), 2);
    }

    #[test]
    fn test_small_radius_invalidates() {
        let solved = NewtonSolver::new(0.5, 1).solve(&state_of(array![[cr(-1.7)]]));
        assert!(solved.is_invalid(0, 0));
    }

    #[test]
    fn test_threaded_matches_single() {
        let grid = ComplexGrid::initialize(40, 23, &Viewport::from_nums(-2.0, 2.0, -2.0, 2.0)).unwrap();
        let initial = IterationState::from(&grid);
        let solver = NewtonSolver::new(1e6, 7);
        let single = solver.solve(&initial);
        let pool: ThreadedSolver<IterationState> = solver.threaded(4);
        let threaded = pool.solve(&initial);
        assert_eq!(single.invalid_mask(), threaded.invalid_mask());
        for y in 0..23 {
            for x in 0..40 {
                let (a, b) = (single.value(x, y), threaded.value(x, y));
                assert!(a == b || (is_invalid(a) && is_invalid(b)));
            }
        }
    }
}
