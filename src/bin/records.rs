use clap::Parser;
use coursenum::cli::{self, CommonArgs};
use coursenum::plot_log::{self, Axes, Figure, PngRenderer, Snapshot, Style};
use coursenum::records::{self, Field, Record};
use std::path::PathBuf;

/// Load a JSON dataset and summarise its fields.
/// With `--plot`, build a time series figure step by step and replay
/// every captured step as a PNG.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON document holding one object.
    path: PathBuf,

    /// Keep every field as decoded, `date` included.
    #[arg(long)]
    passthrough: bool,

    /// Numeric field to plot against `date`.
    #[arg(long, conflicts_with("passthrough"))]
    plot: Option<String>,

    /// Directory for the replayed snapshots.
    #[arg(short, long, default_value = "snapshots")]
    output_dir: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

fn describe(field: &Field) -> String {
    match field {
        Field::Timestamps(t) => match (t.first(), t.last()) {
            (Some(first), Some(last)) => {
                format!("{} timestamps, {first} to {last}", t.len())
            }
            _ => "no timestamps".to_string(),
        },
        Field::Json(serde_json::Value::Array(a)) => format!("array of {}", a.len()),
        Field::Json(serde_json::Value::Object(o)) => format!("object with {} keys", o.len()),
        Field::Json(v) => v.to_string(),
    }
}

/// Days since the first date on x, `field` on y, captured after every change.
fn plot_series(record: &Record, field: &str) -> anyhow::Result<Vec<Snapshot>> {
    let dates = record
        .timestamps("date")
        .ok_or_else(|| anyhow::anyhow!("`date` was not read as timestamps"))?;
    let y: Vec<f64> = record.deserialize_field(field)?;
    anyhow::ensure!(
        dates.len() == y.len(),
        "`date` has {} entries, `{field}` has {}",
        dates.len(),
        y.len()
    );
    let x: Vec<f64> = match dates.first() {
        Some(start) => dates
            .iter()
            .map(|d| (*d - *start).num_seconds() as f64 / 86400.0)
            .collect(),
        None => Vec::new(),
    };

    let mut snapshots = Vec::new();
    let mut axes = Axes::titled(field).labels("days", field);
    plot_log::capture(&mut snapshots, &Figure::new().with_panel(axes.clone()), "axes")?;

    axes = axes.line(x.clone(), y.clone(), Style::default());
    plot_log::capture(&mut snapshots, &Figure::new().with_panel(axes.clone()), "series")?;

    let extremes = y
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .fold(None, |acc: Option<(usize, usize)>, (i, v)| match acc {
            None => Some((i, i)),
            Some((lo, hi)) => Some((
                if *v < y[lo] { i } else { lo },
                if *v > y[hi] { i } else { hi },
            )),
        });
    if let Some((lo, hi)) = extremes {
        axes = axes.scatter(
            vec![x[lo], x[hi]],
            vec![y[lo], y[hi]],
            Style {
                color: [214, 39, 40],
                width: 4,
            },
        );
        plot_log::capture(&mut snapshots, &Figure::new().with_panel(axes), "extremes")?;
    }
    Ok(snapshots)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let session = cli::setup("records", &args.common)?;

    let record = if args.passthrough {
        records::load_vortex_data(&args.path)?
    } else {
        records::load_dated_records(&args.path)?
    };
    log::info!("Read {} fields from {:?}", record.len(), args.path);
    for key in record.keys() {
        if let Some(field) = record.get(key) {
            println!("{key}: {}", describe(field));
        }
    }

    if let Some(field) = &args.plot {
        let snapshots = plot_series(&record, field)?;
        cli::ensure_dir_exists(&args.output_dir)?;
        let mut renderer = PngRenderer::new(args.output_dir.clone());
        plot_log::replay(&snapshots, &mut renderer)?;
    }

    session.finish();
    Ok(())
}
