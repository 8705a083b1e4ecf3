use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use image::RgbImage;
use log::{debug, info};

use crate::complex::C;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::grid::ComplexGrid;
use crate::painter::{DistancePainter, Painter};
use crate::roots::RootFinder;
use crate::solver::{IterationState, NewtonSolver, Solver};
use crate::threads::make_solver;

/// Renders one image per requested iteration count from a shared grid and
/// reference set.
pub struct FrameRenderer {
    config: Config,
    grid: ComplexGrid,
    painter: DistancePainter,
}

impl FrameRenderer {
    /// Validates `config` and paints against `references` in the given order.
    pub fn new(config: &Config, references: Vec<C<f64>>) -> Result<Self> {
        config.validate()?;
        config.check_palette(references.len())?;
        let grid = ComplexGrid::initialize(config.width, config.height, &config.viewport)?;
        Ok(Self {
            config: config.clone(),
            grid,
            painter: DistancePainter::from_config(config, references),
        })
    }

    /// Validates `config`, searches for the roots and builds the reference set
    /// from them and the configured attractors.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let roots = RootFinder::new(config).find();
        info!("found {} roots", roots.len());
        let references = config.reference_points(roots.as_slice());
        Self::new(config, references)
    }

    pub fn grid(&self) -> &ComplexGrid {
        &self.grid
    }

    pub fn references(&self) -> &[C<f64>] {
        self.painter.references()
    }

    /// Runs `iterations` Newton steps from the base grid.
    pub fn solve(&self, iterations: usize) -> IterationState {
        let solver: Box<dyn Solver<IterationState>> = make_solver(
            NewtonSolver::new(self.config.divergence_radius, iterations),
            self.config.threads,
        );
        solver.solve(&IterationState::from(&self.grid))
    }

    pub fn render(&self, iterations: usize) -> RgbImage {
        let start = Instant::now();
        let state = self.solve(iterations);
        debug!(
            "{} iterations: {} of {} points diverged",
            iterations,
            state.invalid_count(),
            state.width() * state.height()
        );
        let img = self.painter.paint(&state);
        debug!("rendered {} iterations in {:?}", iterations, start.elapsed());
        img
    }

    pub fn save_frame(&self, iterations: usize) -> Result<PathBuf> {
        let path = self.config.frame_path(iterations);
        self.render(iterations)
            .save(&path)
            .map_err(|source| Error::Image {
                path: path.clone(),
                source,
            })?;
        info!("Saved {}", path.display());
        Ok(path)
    }

    /// Writes every configured frame, creating the output directory first.
    /// Paths come back in the order of the configured iteration counts.
    pub fn render_all(&self) -> Result<Vec<PathBuf>> {
        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|source| Error::OutputDir {
            path: dir.clone(),
            source,
        })?;
        self.config
            .iterations
            .iter()
            .map(|&n| self.save_frame(n))
            .collect()
    }
}
