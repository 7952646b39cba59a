use clap::Parser;
use coursenum::cli::{self, CommonArgs};
use coursenum::diffusion::{DiffusionConfig, HeatPlate};
use coursenum::domain::Edge;
use coursenum::image;
use coursenum::npy;
use coursenum::plot_log::Colormap;
use std::path::PathBuf;

/// Heat a plate from one edge with an explicit finite difference scheme
/// and save the final temperature field as `.npy`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file with the physical setup, flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Plate size along the first axis, mm.
    #[arg(long)]
    plate_width: Option<f64>,

    /// Plate size along the second axis, mm.
    #[arg(long)]
    plate_height: Option<f64>,

    /// Cell spacing along the first axis, mm.
    #[arg(long)]
    dx: Option<f64>,

    /// Cell spacing along the second axis, mm.
    #[arg(long)]
    dy: Option<f64>,

    /// Thermal diffusivity, mm^2/s.
    #[arg(long)]
    diffusivity: Option<f64>,

    #[arg(long)]
    t_cool: Option<f64>,

    #[arg(long)]
    t_hot: Option<f64>,

    /// Number of time steps.
    #[arg(short, long)]
    steps: Option<usize>,

    #[arg(long, value_enum)]
    hot_edge: Option<Edge>,

    /// Where the final field is written.
    #[arg(short, long, default_value = "diffusion.npy")]
    output: PathBuf,

    /// Directory for PNG frames, none are written without it.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Steps between frames.
    #[arg(long, default_value = "1000")]
    frame_every: usize,

    #[command(flatten)]
    common: CommonArgs,
}

impl Args {
    fn diffusion_config(&self) -> anyhow::Result<DiffusionConfig> {
        let mut config = match &self.config {
            Some(path) => DiffusionConfig::load(path)?,
            None => DiffusionConfig::default(),
        };
        let overrides = [
            (&mut config.plate_width, self.plate_width),
            (&mut config.plate_height, self.plate_height),
            (&mut config.dx, self.dx),
            (&mut config.dy, self.dy),
            (&mut config.diffusivity, self.diffusivity),
            (&mut config.t_cool, self.t_cool),
            (&mut config.t_hot, self.t_hot),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(hot_edge) = self.hot_edge {
            config.hot_edge = hot_edge;
        }
        config.validate()?;
        Ok(config)
    }

    fn frame_name(&self, i: usize) -> Option<PathBuf> {
        let mut result = self.frames_dir.as_ref()?.clone();
        result.push(format!("frame_{:04}.png", i));
        Some(result)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let session = cli::setup("diffusion", &args.common)?;
    let config = args.diffusion_config()?;
    anyhow::ensure!(args.frame_every > 0, "frame interval must be positive");

    if let Some(dir) = &args.frames_dir {
        cli::ensure_dir_exists(dir)?;
    }
    let range = Some((config.t_cool.min(config.t_hot), config.t_cool.max(config.t_hot)));

    let mut plate = HeatPlate::new(config, args.common.chunk_size)?;
    let mut frame = 0;
    if let Some(path) = args.frame_name(frame) {
        image::write_png(plate.state(), &path, Colormap::Turbo, range)?;
        frame += 1;
    }
    plate.run_with(|t, state| {
        if t % args.frame_every == 0 {
            if let Some(path) = args.frame_name(frame) {
                image::write_png(state, &path, Colormap::Turbo, range)?;
                frame += 1;
            }
        }
        profiling::finish_frame!();
        Ok(())
    })?;

    npy::write_npy(&args.output, plate.state())?;
    session.finish();
    Ok(())
}
