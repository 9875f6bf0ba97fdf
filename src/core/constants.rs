// ============================================================================
// spark-spyglass - Constants
// Option defaults, clamping bounds and style property names
// ============================================================================

// =============================================================================
// OPTION DEFAULTS
// =============================================================================

/// Default border color (dark grey)
pub const DEFAULT_BORDER_COLOR: &str = "#555555";

/// Default border width in pixels
pub const DEFAULT_BORDER_WIDTH: f64 = 5.0;

/// Default opacity of the spy map canvas
pub const DEFAULT_OPACITY: f64 = 1.0;

/// Default width/height of the spyglass in pixels
pub const DEFAULT_SIZE: f64 = 350.0;

// =============================================================================
// CLAMPING BOUNDS
// =============================================================================

/// Smallest accepted border width
pub const MIN_BORDER_WIDTH: f64 = 0.0;

/// Opacity lower bound (fully transparent)
pub const MIN_OPACITY: f64 = 0.0;

/// Opacity upper bound (fully opaque)
pub const MAX_OPACITY: f64 = 1.0;

/// Smallest accepted spyglass size
pub const MIN_SIZE: f64 = 1.0;

// =============================================================================
// STYLE PROPERTIES
// =============================================================================

pub const POSITION: &str = "position";
pub const BORDER_RADIUS: &str = "border-radius";
pub const BORDER_STYLE: &str = "border-style";
pub const BORDER_WIDTH: &str = "border-width";
pub const BORDER_COLOR: &str = "border-color";
pub const OPACITY: &str = "opacity";
pub const LEFT: &str = "left";
pub const TOP: &str = "top";

/// Border radius that clips the glass to a circle
pub const RADIUS_ROUND: &str = "50%";

/// Border radius that leaves the glass square
pub const RADIUS_SQUARE: &str = "0";

// =============================================================================
// SYNCHRONIZATION
// =============================================================================

/// Index of the participant that seeds the initial synchronization pass
pub const PRIMARY_INDEX: usize = 0;

/// Fewest participants a synchronizer accepts
pub const MIN_PARTICIPANTS: usize = 2;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_within_bounds() {
        assert!(DEFAULT_BORDER_WIDTH >= MIN_BORDER_WIDTH);
        assert!((MIN_OPACITY..=MAX_OPACITY).contains(&DEFAULT_OPACITY));
        assert!(DEFAULT_SIZE >= MIN_SIZE);
    }

    #[test]
    fn style_properties_are_distinct() {
        let props = [
            POSITION,
            BORDER_RADIUS,
            BORDER_STYLE,
            BORDER_WIDTH,
            BORDER_COLOR,
            OPACITY,
            LEFT,
            TOP,
        ];

        for (i, a) in props.iter().enumerate() {
            for (j, b) in props.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Properties at index {} and {} collide", i, j);
                }
            }
        }
    }
}
