use crate::domain::Edge;
use crate::error::{Error, Result};
use crate::util::*;
use serde::{Deserialize, Serialize};

/// Physical setup of a diffusion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffusionConfig {
    /// Plate size along the first axis, mm.
    pub plate_width: f64,

    /// Plate size along the second axis, mm.
    pub plate_height: f64,

    /// Cell spacing along the first axis, mm.
    pub dx: f64,

    /// Cell spacing along the second axis, mm.
    pub dy: f64,

    /// Thermal diffusivity, mm^2/s.
    pub diffusivity: f64,

    pub t_cool: f64,
    pub t_hot: f64,

    /// Number of time steps, no early termination.
    pub steps: usize,

    /// Border line pinned to `t_hot` every step.
    pub hot_edge: Edge,
}

impl Default for DiffusionConfig {
    /// 10x10 mm steel plate at 0.1 mm resolution.
    fn default() -> Self {
        DiffusionConfig {
            plate_width: 10.0,
            plate_height: 10.0,
            dx: 0.1,
            dy: 0.1,
            diffusivity: 110.0,
            t_cool: 300.0,
            t_hot: 700.0,
            steps: 10000,
            hot_edge: Edge::LastRow,
        }
    }
}

impl DiffusionConfig {
    /// Number of cells along each axis, truncating like `int(w / dx)`.
    pub fn cells(&self) -> (usize, usize) {
        (
            (self.plate_width / self.dx) as usize,
            (self.plate_height / self.dy) as usize,
        )
    }

    pub fn aabb(&self) -> AABB<2> {
        let (nx, ny) = self.cells();
        AABB::from_shape([nx, ny])
    }

    /// Largest stable time step for the explicit scheme,
    /// `dx^2 dy^2 / (2 D (dx^2 + dy^2))`.
    pub fn dt(&self) -> f64 {
        let dx2 = self.dx * self.dx;
        let dy2 = self.dy * self.dy;
        dx2 * dy2 / (2.0 * self.diffusivity * (dx2 + dy2))
    }

    /// Simulated time after all steps.
    pub fn duration(&self) -> f64 {
        self.dt() * self.steps as f64
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("plate_width", self.plate_width),
            ("plate_height", self.plate_height),
            ("dx", self.dx),
            ("dy", self.dy),
            ("diffusivity", self.diffusivity),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.t_cool.is_finite() && self.t_hot.is_finite()) {
            return Err(Error::Config("temperatures must be finite".to_string()));
        }
        let (nx, ny) = self.cells();
        if nx < 3 || ny < 3 {
            return Err(Error::Config(format!(
                "grid must be at least 3x3 cells, got {nx}x{ny}"
            )));
        }
        if AABB::checked_from_shape([nx, ny]).is_none() {
            return Err(Error::Config(format!(
                "grid of {nx}x{ny} cells is too large"
            )));
        }
        Ok(())
    }

    /// Read a JSON config, missing keys take the default values.
    pub fn load<P: AsRef<std::path::Path>>(path: &P) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::file(path.as_ref(), e))?;
        let config: DiffusionConfig = serde_json::from_str(&text)?;
        Ok(config)
    }
}
