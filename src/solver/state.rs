use std::sync::Arc;

use ndarray::{concatenate, s, Array, Array2, Axis};

use crate::complex::*;
use crate::grid::ComplexGrid;
use crate::threads::{ranges, Split};

/// Grid values after `iteration` Newton steps.
///
/// `invalid` marks points that diverged; their value is the NaN sentinel from
/// [`crate::complex::invalid`] and no later step touches them.
#[derive(Clone, Debug)]
pub struct IterationState {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) iteration: usize,
    pub(crate) za: Arc<Array2<C<f64>>>,
    pub(crate) invalid: Arc<Array2<bool>>,
}

impl From<&ComplexGrid> for IterationState {
    fn from(grid: &ComplexGrid) -> Self {
        let width = grid.width();
        let height = grid.height();
        let za = grid.points().clone();
        let invalid: Array2<bool> = Array::from_elem((height, width), false);
        Self {
            width,
            height,
            iteration: 0,
            za: Arc::new(za),
            invalid: Arc::new(invalid),
        }
    }
}

impl IterationState {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn values(&self) -> &Array2<C<f64>> {
        &self.za
    }

    pub fn invalid_mask(&self) -> &Array2<bool> {
        &self.invalid
    }

    pub fn value(&self, x: usize, y: usize) -> C<f64> {
        self.za[[y, x]]
    }

    pub fn is_invalid(&self, x: usize, y: usize) -> bool {
        self.invalid[[y, x]]
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid.iter().filter(|&&i| i).count()
    }
}

impl Split for IterationState {
    fn split_parts(&self, n: usize) -> Vec<Self> {
        ranges(self.height, n)
            .into_iter()
            .map(|(m, n)| {
                let slice = s![m..n, ..];
                Self {
                    width: self.width,
                    height: n - m,
                    iteration: self.iteration,
                    za: Arc::new(self.za.slice(slice).to_owned()),
                    invalid: Arc::new(self.invalid.slice(slice).to_owned()),
                }
            })
            .collect()
    }

    fn join_parts(&self, parts: &[Self]) -> Self {
        let mut height = self.height;
        let mut zas = vec![self.za.view()];
        let mut invalids = vec![self.invalid.view()];

        for part in parts {
            assert!(part.width == self.width, "different width");
            assert!(part.iteration == self.iteration, "different iteration");
            height += part.height;
            zas.push(part.za.view());
            invalids.push(part.invalid.view());
        }

        let za = concatenate(Axis(0), &zas).expect("row bands share a width");
        let invalid = concatenate(Axis(0), &invalids).expect("row bands share a width");
        Self {
            width: self.width,
            height,
            iteration: self.iteration,
            za: Arc::new(za),
            invalid: Arc::new(invalid),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord::Viewport;
    use crate::threads::SplitPart;

    #[test]
    fn test_initial_state_is_the_grid() {
        let grid = ComplexGrid::initialize(6, 4, &Viewport::default()).unwrap();
        let state = IterationState::from(&grid);
        assert_eq!(state.iteration(), 0);
        assert_eq!(state.invalid_count(), 0);
        assert_eq!(state.values(), grid.points());
    }

    #[test]
    fn test_split_join_rows() {
        let grid = ComplexGrid::initialize(5, 11, &Viewport::default()).unwrap();
        let state = IterationState::from(&grid);
        for n in [1, 2, 3, 11, 16] {
            let parts = state.parts(n);
            assert_eq!(parts.len(), n);
            let joined = SplitPart::join(parts).unwrap();
            assert_eq!(joined.height(), 11);
            assert_eq!(joined.width(), 5);
            assert_eq!(joined.values(), state.values());
        }
    }
}
