use crate::domain::DomainView;
use serde::{Deserialize, Serialize};

/// Plotting instructions for one figure, panels laid out left to right.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Figure {
    pub panels: Vec<Axes>,
}

impl Figure {
    pub fn new() -> Self {
        Figure::default()
    }

    pub fn with_panel(mut self, axes: Axes) -> Self {
        self.panels.push(axes);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Axes {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub layers: Vec<Layer>,
}

impl Axes {
    pub fn new() -> Self {
        Axes::default()
    }

    pub fn titled(title: &str) -> Self {
        Axes {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    pub fn labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = Some(x_label.to_string());
        self.y_label = Some(y_label.to_string());
        self
    }

    pub fn line(mut self, x: Vec<f64>, y: Vec<f64>, style: Style) -> Self {
        self.layers.push(Layer::Line { x, y, style });
        self
    }

    pub fn scatter(mut self, x: Vec<f64>, y: Vec<f64>, style: Style) -> Self {
        self.layers.push(Layer::Scatter { x, y, style });
        self
    }

    /// Show a 2D field, rows top to bottom like `imshow`.
    pub fn image<DomainType: DomainView<2>>(
        mut self,
        domain: &DomainType,
        colormap: Colormap,
    ) -> Self {
        let [rows, cols] = domain.aabb().shape();
        self.layers.push(Layer::Image {
            rows,
            cols,
            data: domain.buffer().to_vec(),
            colormap,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    Line {
        x: Vec<f64>,
        y: Vec<f64>,
        style: Style,
    },
    Scatter {
        x: Vec<f64>,
        y: Vec<f64>,
        style: Style,
    },
    /// Row-major values, normalised to their own min/max when drawn.
    Image {
        rows: usize,
        cols: usize,
        data: Vec<f64>,
        colormap: Colormap,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub color: [u8; 3],
    /// Stroke width in pixels.
    pub width: u32,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            color: [31, 119, 180],
            width: 1,
        }
    }
}

impl Style {
    pub fn color(color: [u8; 3]) -> Self {
        Style {
            color,
            ..Default::default()
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Colormap {
    #[default]
    Gray,
    Turbo,
    Viridis,
    Inferno,
}

impl Colormap {
    /// Color for `t` in [0, 1], values outside are clamped.
    pub fn rgb(&self, t: f64) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Colormap::Gray => {
                let v = (t * 255.0).round() as u8;
                [v, v, v]
            }
            Colormap::Turbo => colorous::TURBO.eval_continuous(t).as_array(),
            Colormap::Viridis => colorous::VIRIDIS.eval_continuous(t).as_array(),
            Colormap::Inferno => colorous::INFERNO.eval_continuous(t).as_array(),
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::domain::OwnedDomain;
    use crate::util::*;

    #[test]
    fn gray_ramp() {
        assert_eq!(Colormap::Gray.rgb(0.0), [0, 0, 0]);
        assert_eq!(Colormap::Gray.rgb(1.0), [255, 255, 255]);
        assert_eq!(Colormap::Gray.rgb(2.0), [255, 255, 255]);
        assert_eq!(Colormap::Gray.rgb(f64::NAN), [0, 0, 0]);
        assert_ne!(Colormap::Turbo.rgb(0.0), Colormap::Turbo.rgb(1.0));
    }

    #[test]
    fn image_layer_from_domain() {
        let mut domain = OwnedDomain::new(AABB::from_shape([2, 3]));
        domain.par_set_values(|c| c[1] as f64, 2);
        let axes = Axes::titled("field").image(&domain, Colormap::Viridis);
        match &axes.layers[0] {
            Layer::Image {
                rows, cols, data, ..
            } => {
                assert_eq!((*rows, *cols), (2, 3));
                assert_eq!(data, &vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
            }
            other => panic!("unexpected layer {other:?}"),
        }
    }

    #[test]
    fn layer_json_shape() {
        let layer = Layer::Line {
            x: vec![0.0],
            y: vec![1.0],
            style: Style::default(),
        };
        let v = serde_json::to_value(&layer).unwrap();
        assert_eq!(v["kind"], "line");
    }
}
