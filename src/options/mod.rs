// ============================================================================
// spark-spyglass - Options
//
// The spyglass's visual configuration as an immutable value. Updates arrive
// as an `OptionsPatch`; `SpyglassOptions::merge` validates and clamps it and
// returns a new value together with exactly what was accepted.
// ============================================================================

pub mod patch;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::constants::*;

pub use patch::OptionsPatch;

// =============================================================================
// SHAPE
// =============================================================================

/// Outline the spy map is clipped to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Circle,
    Square,
}

impl Shape {
    pub const fn as_str(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
        }
    }

    /// Border radius that produces this shape.
    pub const fn border_radius(self) -> &'static str {
        match self {
            Shape::Circle => RADIUS_ROUND,
            Shape::Square => RADIUS_SQUARE,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown shape name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown spyglass shape '{0}' (expected 'circle' or 'square')")]
pub struct ParseShapeError(pub String);

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(Shape::Circle),
            "square" => Ok(Shape::Square),
            other => Err(ParseShapeError(other.to_string())),
        }
    }
}

// =============================================================================
// SPYGLASS OPTIONS
// =============================================================================

/// Validated spyglass configuration.
///
/// Every value held here is already clamped: `border_width >= 0`,
/// `0 <= opacity <= 1`, `size >= 1`.
///
/// # Example
///
/// ```
/// use spark_spyglass::{patch, Shape, SpyglassOptions};
///
/// let opts = SpyglassOptions::default();
/// assert_eq!(opts.shape, Shape::Circle);
///
/// let merged = opts.merge(&patch!(opacity: 5.0, size: 400.0));
/// assert_eq!(merged.options.opacity, 1.0);
/// assert_eq!(merged.options.size, 400.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpyglassOptions {
    /// Any CSS color. Passed through to the border untouched.
    pub border_color: String,

    /// Border width in pixels.
    pub border_width: f64,

    /// Opacity of the spy map.
    pub opacity: f64,

    pub shape: Shape,

    /// Width and height of the glass in pixels.
    pub size: f64,
}

impl Default for SpyglassOptions {
    fn default() -> Self {
        Self {
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            border_width: DEFAULT_BORDER_WIDTH,
            opacity: DEFAULT_OPACITY,
            shape: Shape::Circle,
            size: DEFAULT_SIZE,
        }
    }
}

/// Outcome of [`SpyglassOptions::merge`].
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    /// The new options value.
    pub options: SpyglassOptions,

    /// The fields that were accepted, holding their clamped values.
    /// Rejected fields are `None` even if the incoming patch set them.
    pub applied: OptionsPatch,
}

impl SpyglassOptions {
    /// Merge `patch` into a copy of these options.
    ///
    /// Fields absent from the patch keep their value. Numbers are clamped;
    /// non-finite numbers are ignored.
    pub fn merge(&self, patch: &OptionsPatch) -> Merged {
        let mut options = self.clone();
        let mut applied = OptionsPatch::default();

        if let Some(shape) = patch.shape {
            options.shape = shape;
            applied.shape = Some(shape);
        }

        // Written before size so the centering offset sees the new width
        if let Some(width) = patch.border_width.and_then(|w| finite("borderWidth", w)) {
            let width = width.max(MIN_BORDER_WIDTH);
            options.border_width = width;
            applied.border_width = Some(width);
        }

        if let Some(color) = &patch.border_color {
            options.border_color = color.clone();
            applied.border_color = Some(color.clone());
        }

        if let Some(opacity) = patch.opacity.and_then(|o| finite("opacity", o)) {
            let opacity = opacity.clamp(MIN_OPACITY, MAX_OPACITY);
            options.opacity = opacity;
            applied.opacity = Some(opacity);
        }

        if let Some(size) = patch.size.and_then(|s| finite("size", s)) {
            let size = size.max(MIN_SIZE);
            options.size = size;
            applied.size = Some(size);
        }

        Merged { options, applied }
    }

    /// Distance from the anchor point to the container's top-left corner.
    pub fn center_offset(&self) -> f64 {
        self.size / 2.0 + self.border_width
    }

    /// These options as a patch that sets every field.
    pub fn to_patch(&self) -> OptionsPatch {
        OptionsPatch {
            border_color: Some(self.border_color.clone()),
            border_width: Some(self.border_width),
            opacity: Some(self.opacity),
            shape: Some(self.shape),
            size: Some(self.size),
        }
    }
}

fn finite(field: &'static str, value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        warn!(field, value, "Ignoring non-finite spyglass option");
        None
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch;

    #[test]
    fn defaults_match_documented_values() {
        let opts = SpyglassOptions::default();

        assert_eq!(opts.border_color, "#555555");
        assert_eq!(opts.border_width, 5.0);
        assert_eq!(opts.opacity, 1.0);
        assert_eq!(opts.shape, Shape::Circle);
        assert_eq!(opts.size, 350.0);
    }

    #[test]
    fn merge_leaves_unset_fields_alone() {
        let opts = SpyglassOptions::default();
        let merged = opts.merge(&patch!(border_color: "red"));

        assert_eq!(merged.options.border_color, "red");
        assert_eq!(merged.options.size, opts.size);
        assert_eq!(merged.applied, patch!(border_color: "red"));
    }

    #[test]
    fn merge_does_not_touch_the_original() {
        let opts = SpyglassOptions::default();
        let _ = opts.merge(&patch!(size: 10.0));

        assert_eq!(opts.size, 350.0);
    }

    #[test]
    fn opacity_is_clamped_to_unit_range() {
        let opts = SpyglassOptions::default();

        assert_eq!(opts.merge(&patch!(opacity: 5.0)).options.opacity, 1.0);
        assert_eq!(opts.merge(&patch!(opacity: -3.0)).options.opacity, 0.0);
        assert_eq!(opts.merge(&patch!(opacity: 0.25)).options.opacity, 0.25);
    }

    #[test]
    fn border_width_and_size_have_lower_bounds() {
        let merged = SpyglassOptions::default().merge(&patch!(border_width: -4.0, size: 0.0));

        assert_eq!(merged.options.border_width, 0.0);
        assert_eq!(merged.options.size, 1.0);
        assert_eq!(merged.applied.border_width, Some(0.0));
        assert_eq!(merged.applied.size, Some(1.0));
    }

    #[test]
    fn non_finite_numbers_are_ignored() {
        let opts = SpyglassOptions::default();
        let merged = opts.merge(&patch!(opacity: f64::NAN, size: f64::INFINITY));

        assert_eq!(merged.options, opts);
        assert!(merged.applied.is_empty());
    }

    #[test]
    fn center_offset_uses_border_from_same_patch() {
        let merged = SpyglassOptions::default().merge(&patch!(size: 400.0, border_width: 10.0));

        assert_eq!(merged.options.center_offset(), 210.0);
    }

    #[test]
    fn shape_parses_and_displays() {
        assert_eq!("circle".parse::<Shape>(), Ok(Shape::Circle));
        assert_eq!("square".parse::<Shape>(), Ok(Shape::Square));
        assert_eq!(
            "hexagon".parse::<Shape>(),
            Err(ParseShapeError("hexagon".into()))
        );
        assert_eq!(Shape::Square.to_string(), "square");
        assert_eq!(Shape::Circle.border_radius(), "50%");
        assert_eq!(Shape::Square.border_radius(), "0");
    }

    #[test]
    fn options_round_trip_through_camel_case_json() {
        let json = serde_json::json!({
            "borderColor": "teal",
            "borderWidth": 2.0,
            "shape": "square"
        });
        let opts: SpyglassOptions = serde_json::from_value(json).unwrap();

        assert_eq!(opts.border_color, "teal");
        assert_eq!(opts.border_width, 2.0);
        assert_eq!(opts.shape, Shape::Square);
        // Missing fields fall back to defaults
        assert_eq!(opts.size, 350.0);
    }
}
