//! Newton-fractal basin renderer for f(z) = z³ − 2z + 2.
//!
//! Roots are located by Newton-Raphson from a ring of seeds, a grid of the
//! complex plane is pushed through the Newton map for each requested number
//! of steps, and every point is coloured by inverse-distance weighting
//! against the roots (plus any configured attractors). Diverged points are
//! black.
//!
//! ```no_run
//! let config = newtox::Config::default().with_attractors();
//! let paths = newtox::render_frames(&config)?;
//! # Ok::<(), newtox::Error>(())
//! ```

use std::path::PathBuf;

pub mod bench;
pub mod complex;
pub mod config;
pub mod coord;
mod error;
pub mod grid;
pub mod painter;
pub mod polynomial;
pub mod render;
pub mod roots;
pub mod solver;
pub mod threads;

pub use config::Config;
pub use error::{Error, Result};
pub use render::FrameRenderer;

/// Validates `config`, finds the roots and writes one image per iteration
/// count. Returns the written paths in iteration-list order.
pub fn render_frames(config: &Config) -> Result<Vec<PathBuf>> {
    FrameRenderer::from_config(config)?.render_all()
}
