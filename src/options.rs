use serde::Deserialize;

/// Options for rendering the map image.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderOptions {
    /// Page width in `unit` (default: 16)
    #[serde(default = "default_width")]
    pub width: f64,

    /// Page height in `unit` (default: 12)
    #[serde(default = "default_height")]
    pub height: f64,

    /// Page size unit (default: cm)
    #[serde(default)]
    pub unit: SizeUnit,

    /// Output resolution in dots per inch (default: 300)
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Bounding-box margin as a fraction of each axis span; negative
    /// values widen the frame (default: -0.05)
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Draw the group legend (default: true)
    #[serde(default = "default_true")]
    pub show_legend: bool,

    /// Draw the graticule and axis labels (default: true)
    #[serde(default = "default_true")]
    pub show_axes: bool,

    /// Optional map title
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            unit: SizeUnit::default(),
            dpi: default_dpi(),
            margin: default_margin(),
            show_legend: true,
            show_axes: true,
            title: None,
        }
    }
}

impl RenderOptions {
    /// Output size in device pixels, derived from page size and dpi.
    pub fn pixel_size(&self) -> (u32, u32) {
        let width = (self.unit.to_inches(self.width) * self.dpi as f64)
            .round()
            .max(1.0) as u32;
        let height = (self.unit.to_inches(self.height) * self.dpi as f64)
            .round()
            .max(1.0) as u32;
        (width, height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    Mm,
    #[default]
    Cm,
    In,
}

impl SizeUnit {
    pub fn to_inches(self, value: f64) -> f64 {
        match self {
            SizeUnit::Mm => value / 25.4,
            SizeUnit::Cm => value / 2.54,
            SizeUnit::In => value,
        }
    }
}

fn default_width() -> f64 {
    16.0
}

fn default_height() -> f64 {
    12.0
}

fn default_dpi() -> u32 {
    300
}

fn default_margin() -> f64 {
    -0.05
}

fn default_true() -> bool {
    true
}
