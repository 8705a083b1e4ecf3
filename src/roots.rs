// Locate the roots of the cubic by running Newton-Raphson from a ring of
// seeds around the origin.
//
// Discovery order matters: the index a root gets here is the palette slot
// it is painted with.

use std::f64::consts::PI;

use log::{debug, trace};

use crate::complex::*;
use crate::config::Config;
use crate::polynomial::Cubic;

/// Distinct roots in the order they were first found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roots {
    separation: f64,
    roots: Vec<C<f64>>,
}

impl Roots {
    pub fn new(separation: f64) -> Self {
        Self {
            separation,
            roots: Vec::new(),
        }
    }

    /// Index of `root`, appending it unless an already known root lies
    /// within the separation distance.
    pub fn add_root(&mut self, root: C<f64>) -> usize {
        for (i, z) in self.roots.iter().enumerate() {
            if (root - z).norm() < self.separation {
                return i;
            }
        }
        self.roots.push(root);
        self.roots.len() - 1
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn as_slice(&self) -> &[C<f64>] {
        &self.roots
    }

    pub fn into_vec(self) -> Vec<C<f64>> {
        self.roots
    }
}

#[derive(Clone, Debug)]
pub struct RootFinder {
    seeds: usize,
    seed_radius: f64,
    max_steps: usize,
    derivative_epsilon: f64,
    tolerance: f64,
    separation: f64,
    function: Cubic,
}

impl RootFinder {
    pub fn new(config: &Config) -> Self {
        Self {
            seeds: config.seed_count,
            seed_radius: config.seed_radius,
            max_steps: config.root_search_steps,
            derivative_epsilon: config.derivative_epsilon,
            tolerance: config.root_tolerance,
            separation: config.root_separation,
            function: Cubic,
        }
    }

    /// Starting guesses evenly spaced in angle, the first on the positive
    /// real axis.
    pub fn seeds(&self) -> Vec<C<f64>> {
        (0..self.seeds)
            .map(|k| {
                let angle = 2.0 * PI * k as f64 / self.seeds as f64;
                C::<f64>::from_polar(self.seed_radius, angle)
            })
            .collect()
    }

    /// Newton-Raphson from `seed`, stopping early when the slope gets too
    /// flat to trust. `None` if the end point is not a root.
    pub fn converge(&self, seed: C<f64>) -> Option<C<f64>> {
        let mut z = seed;
        for _ in 0..self.max_steps {
            let slope = self.function.slope(z);
            if slope.norm() < self.derivative_epsilon {
                break;
            }
            z -= self.function.value(z) / slope;
        }
        if self.function.value(z).norm() < self.tolerance {
            Some(z)
        } else {
            None
        }
    }

    pub fn find(&self) -> Roots {
        let mut roots = Roots::new(self.separation);
        for seed in self.seeds() {
            match self.converge(seed) {
                Some(root) => {
                    let known = roots.len();
                    let index = roots.add_root(root);
                    if index == known {
                        debug!("root {} at {} from seed {}", index, root, seed);
                    }
                }
                None => trace!("seed {} did not converge", seed),
            }
        }
        debug!("found {} roots from {} seeds", roots.len(), self.seeds);
        roots
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const REAL_ROOT: f64 = -1.769_292_354_238_631_4;
    const PAIR_RE: f64 = 0.884_646_177_119_315_7;
    const PAIR_IM: f64 = 0.589_742_805_022_205_6;

    #[test]
    fn test_finds_all_three_roots() {
        let roots = RootFinder::new(&Config::default()).find();
        let roots = roots.as_slice();
        assert_eq!(roots.len(), 3);
        assert!((roots[0] - cr(REAL_ROOT)).norm() < 1e-6);
        assert!((roots[1] - c(PAIR_RE, PAIR_IM)).norm() < 1e-6);
        assert!((roots[2] - c(PAIR_RE, -PAIR_IM)).norm() < 1e-6);
        for root in roots {
            assert!(Cubic.value(*root).norm() < 1e-5);
        }
    }

    #[test]
    fn test_roots_are_separated() {
        let config = Config::default();
        let roots = RootFinder::new(&config).find();
        let roots = roots.as_slice();
        for (i, a) in roots.iter().enumerate() {
            for b in &roots[i + 1..] {
                assert!((a - b).norm() >= config.root_separation);
            }
        }
    }

    #[test]
    fn test_find_is_deterministic() {
        let finder = RootFinder::new(&Config::default());
        assert_eq!(finder.find(), finder.find());
    }

    #[test]
    fn test_cycle_seed_is_rejected() {
        let finder = RootFinder::new(&Config::default());
        assert_eq!(finder.converge(cr(0.0)), None);
        assert!(finder.converge(cr(-2.0)).is_some());
    }

    #[test]
    fn test_flat_slope_stops_search() {
        let finder = RootFinder::new(&Config::default());
        assert_eq!(finder.converge(cr((2.0f64 / 3.0).sqrt())), None);
    }

    #[test]
    fn test_seed_ring() {
        let config = Config {
            seed_count: 4,
            seed_radius: 2.0,
            ..Config::default()
        };
        let seeds = RootFinder::new(&config).seeds();
        assert_eq!(seeds.len(), 4);
        assert_eq!(seeds[0], cr(2.0));
        assert!((seeds[1] - ci(2.0)).norm() < 1e-12);
        assert!((seeds[2] - cr(-2.0)).norm() < 1e-12);
    }

    #[test]
    fn test_duplicates_keep_first_index() {
        let mut roots = Roots::new(1e-3);
        assert_eq!(roots.add_root(cr(1.0)), 0);
        assert_eq!(roots.add_root(ci(1.0)), 1);
        assert_eq!(roots.add_root(c(1.0, 1e-4)), 0);
        assert_eq!(roots.as_slice(), &[cr(1.0), ci(1.0)]);
    }

    #[test]
    fn test_no_seeds_no_roots() {
        let config = Config {
            seed_count: 0,
            ..Config::default()
        };
        assert!(RootFinder::new(&config).find().is_empty());
    }
}
