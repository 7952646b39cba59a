use clap::Parser;
use coursenum::blur;
use coursenum::cli::{self, CommonArgs};
use coursenum::domain::DomainView;
use coursenum::image;
use coursenum::plot_log::PngRenderer;
use std::path::PathBuf;

/// Blur one channel of an image with a five point neighbor operator and
/// compare it to a 3x3 box filter. Panels: blur, original, box filter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Image to read.
    #[arg(short, long, default_value = "lena_100.png")]
    input: PathBuf,

    /// RGB channel to blur.
    #[arg(long, default_value = "0")]
    channel: usize,

    /// Weight of the pixel itself.
    #[arg(short, default_value = "0.2")]
    a: f64,

    /// Weight of each of the four neighbors.
    #[arg(short, default_value = "0.2")]
    b: f64,

    /// Where the three panel comparison is written.
    #[arg(short, long, default_value = "blur.png")]
    output: PathBuf,

    /// Panel edge length in pixels.
    #[arg(long, default_value = "320")]
    panel_size: u32,

    /// Images with more pixels skip the dense operator.
    #[arg(long, default_value = "10000")]
    max_dense_pixels: usize,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let session = cli::setup("blur", &args.common)?;
    anyhow::ensure!(args.panel_size > 16, "panel size must be larger than 16");

    let channel = image::load_channel(&args.input, args.channel)?;
    let [rows, cols] = channel.aabb().shape();
    let n = channel.aabb().buffer_size();
    log::info!("Channel {} is {rows} x {cols}, a: {}, b: {}", args.channel, args.a, args.b);

    let blurred = if n <= args.max_dense_pixels {
        let operator = blur::neighbor_operator([rows, cols], args.a, args.b);
        blur::apply_operator(&operator, &channel)?
    } else {
        log::info!(
            "{n} pixels is above {}, applying the operator matrix free",
            args.max_dense_pixels
        );
        blur::apply_neighbor_blur(&channel, args.a, args.b, args.common.chunk_size)?
    };
    let boxed = blur::uniform_filter(&channel, args.common.chunk_size);

    let figure = blur::blur_figure(&channel, &blurred, &boxed);
    let renderer = PngRenderer::new(".").with_panel_size(args.panel_size, args.panel_size);
    log::info!("Writing: {:?}", args.output);
    renderer.rasterize(&figure)?.save(&args.output)?;

    session.finish();
    Ok(())
}
