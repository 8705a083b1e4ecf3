use std::path::PathBuf;
use std::process;

use log::error;
use structopt::StructOpt;

use newtox::Config;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "newtox-imagegen",
    about = "Render Newton basins of z^3 - 2z + 2, one image per iteration count"
)]
struct Opt {
    /// JSON config file; flags below override its values
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Directory the frames are written to
    #[structopt(short, long, parse(from_os_str))]
    output_dir: Option<PathBuf>,

    /// File name prefix, followed by the iteration count
    #[structopt(long)]
    prefix: Option<String>,

    #[structopt(long)]
    width: Option<usize>,

    #[structopt(long)]
    height: Option<usize>,

    /// Iteration counts to render
    #[structopt(short, long)]
    iterations: Vec<usize>,

    /// Also colour by the 0 <-> 1 cycle of the Newton map
    #[structopt(short, long)]
    attractors: bool,

    /// Solver threads, 0 for the main thread
    #[structopt(short, long)]
    threads: Option<usize>,

    /// One solver thread per physical core
    #[structopt(long, conflicts_with = "threads")]
    auto_threads: bool,
}

impl Opt {
    fn into_config(self) -> newtox::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(prefix) = self.prefix {
            config.file_prefix = prefix;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if !self.iterations.is_empty() {
            config.iterations = self.iterations;
        }
        if self.attractors {
            config = config.with_attractors();
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if self.auto_threads {
            config.threads = num_cpus::get_physical();
        }
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = Opt::from_args()
        .into_config()
        .and_then(|config| newtox::render_frames(&config));
    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
