//! Checkpoint a figure while it is being built, replay the steps later.
//!
//! Snapshots hold plotting instructions (data plus style) encoded as
//! versioned JSON, never a serialized object graph, so a log written by one
//! process can be replayed by another.

mod figure;
mod render;

pub use figure::*;
pub use render::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Bumped whenever `Figure` changes shape.
pub const FIGURE_FORMAT_VERSION: u32 = 1;

/// One captured figure state and its description.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub label: String,
    pub blob: Vec<u8>,
}

#[derive(Serialize)]
struct EncodeEnvelope<'a> {
    version: u32,
    figure: &'a Figure,
}

#[derive(Deserialize)]
struct DecodeEnvelope {
    version: u32,
    figure: serde_json::Value,
}

impl Snapshot {
    pub fn new(figure: &Figure, label: &str) -> Result<Self> {
        let blob = serde_json::to_vec(&EncodeEnvelope {
            version: FIGURE_FORMAT_VERSION,
            figure,
        })?;
        Ok(Snapshot {
            label: label.to_string(),
            blob,
        })
    }

    /// Decode the captured figure, checking the format version first.
    pub fn figure(&self) -> Result<Figure> {
        let envelope: DecodeEnvelope = serde_json::from_slice(&self.blob)?;
        if envelope.version != FIGURE_FORMAT_VERSION {
            return Err(Error::IncompatibleSnapshot {
                label: self.label.clone(),
                found: envelope.version,
                expected: FIGURE_FORMAT_VERSION,
            });
        }
        Ok(serde_json::from_value(envelope.figure)?)
    }
}

/// Append the current state of `figure` to `snapshots`.
pub fn capture(snapshots: &mut Vec<Snapshot>, figure: &Figure, label: &str) -> Result<()> {
    snapshots.push(Snapshot::new(figure, label)?);
    log::debug!("Captured snapshot {}: {label}", snapshots.len() - 1);
    Ok(())
}

/// Show every snapshot in capture order, each one fully rendered
/// before the next is decoded.
pub fn replay<R: Renderer>(snapshots: &[Snapshot], renderer: &mut R) -> Result<()> {
    for snapshot in snapshots {
        println!("{}", snapshot.label);
        let figure = snapshot.figure()?;
        renderer.render(&snapshot.label, &figure)?;
    }
    Ok(())
}
