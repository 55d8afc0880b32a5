use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PathviewError, PathviewResult};

/// How a path's sampled points become pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Connect consecutive samples into one stroked polyline.
    Lines,
    /// Fill a small square of side `line_width` at each sample.
    Dots,
}

impl DrawMode {
    /// Stable lowercase name, the inverse of [`DrawMode::from_str`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Dots => "dots",
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrawMode {
    type Err = PathviewError;

    /// Parse a draw-mode name. Anything outside `lines`/`dots` is the
    /// unsupported-draw-mode fault: a configuration error, not a runtime
    /// condition to retry. The closed enum makes the render-time dispatch
    /// exhaustive, so the fault surfaces here, at construction time.
    fn from_str(s: &str) -> PathviewResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lines" => Ok(Self::Lines),
            "dots" => Ok(Self::Dots),
            other => Err(PathviewError::unsupported_draw_mode(other)),
        }
    }
}

/// Visual parameters for drawing one registered path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawingStyle {
    /// Stroke a polyline or fill dots.
    pub mode: DrawMode,
    /// Stroke color for `Lines`, fill color for `Dots`.
    pub color: Rgba8,
    /// Stroke width for `Lines`; dot square side for `Dots`. Must be positive.
    pub line_width: f64,
    /// Dash pattern for `Lines`; empty means solid. Ignored by `Dots`.
    #[serde(default)]
    pub line_dash: Vec<f64>,
}

impl DrawingStyle {
    /// A solid line style.
    pub fn line(color: Rgba8, line_width: f64) -> Self {
        Self {
            mode: DrawMode::Lines,
            color,
            line_width,
            line_dash: Vec::new(),
        }
    }

    /// A dotted style; `dot_size` is the square side in device pixels.
    pub fn dots(color: Rgba8, dot_size: f64) -> Self {
        Self {
            mode: DrawMode::Dots,
            color,
            line_width: dot_size,
            line_dash: Vec::new(),
        }
    }

    /// Replace the dash pattern.
    pub fn with_dash(mut self, line_dash: Vec<f64>) -> Self {
        self.line_dash = line_dash;
        self
    }

    /// Check numeric sanity of width and dash entries.
    pub fn validate(&self) -> PathviewResult<()> {
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(PathviewError::validation(format!(
                "line_width must be positive and finite, got {}",
                self.line_width
            )));
        }
        if self.line_dash.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(PathviewError::validation(
                "line_dash entries must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

impl Default for DrawingStyle {
    /// Gray solid line of width 1, the default style for newly added paths.
    fn default() -> Self {
        Self::line(Rgba8::GRAY, 1.0)
    }
}
