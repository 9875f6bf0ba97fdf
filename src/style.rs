// ============================================================================
// spark-spyglass - Style Plan
//
// Turns the accepted part of an options update into the style writes and
// resize the spy map needs. Planning is pure; `StylePlan::apply` performs it.
// ============================================================================

use crate::core::constants::*;
use crate::core::error::{MapError, Result};
use crate::core::types::StyleTarget;
use crate::map::MapView;
use crate::options::{OptionsPatch, SpyglassOptions};

// =============================================================================
// STYLE DECLARATION
// =============================================================================

/// One property write on one element of the spy map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    pub target: StyleTarget,
    pub property: &'static str,
    pub value: String,
}

impl StyleDeclaration {
    fn new(target: StyleTarget, property: &'static str, value: impl Into<String>) -> Self {
        Self {
            target,
            property,
            value: value.into(),
        }
    }
}

// =============================================================================
// STYLE PLAN
// =============================================================================

/// Everything needed to bring the spy map in line with an options update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePlan {
    pub declarations: Vec<StyleDeclaration>,

    /// Edge length to resize the spy map to, if the size changed
    pub resize: Option<f64>,
}

impl StylePlan {
    /// Plan the writes for `applied` (the accepted fields of a merge),
    /// reading derived values such as the centering offset from `options`
    /// (the merged result).
    pub fn for_update(applied: &OptionsPatch, options: &SpyglassOptions) -> Self {
        let mut plan = Self::default();
        let decls = &mut plan.declarations;

        if let Some(shape) = applied.shape {
            decls.push(StyleDeclaration::new(
                StyleTarget::Container,
                BORDER_RADIUS,
                shape.border_radius(),
            ));
            decls.push(StyleDeclaration::new(
                StyleTarget::CanvasContainer,
                BORDER_RADIUS,
                shape.border_radius(),
            ));
        }

        if let Some(width) = applied.border_width {
            decls.push(StyleDeclaration::new(StyleTarget::Container, BORDER_STYLE, "solid"));
            decls.push(StyleDeclaration::new(
                StyleTarget::Container,
                BORDER_WIDTH,
                px(width),
            ));
        }

        if let Some(color) = &applied.border_color {
            decls.push(StyleDeclaration::new(
                StyleTarget::Container,
                BORDER_COLOR,
                color.as_str(),
            ));
        }

        if let Some(opacity) = applied.opacity {
            decls.push(StyleDeclaration::new(
                StyleTarget::CanvasContainer,
                OPACITY,
                opacity.to_string(),
            ));
        }

        // The offset depends on both, so either one moves the container
        if applied.size.is_some() || applied.border_width.is_some() {
            let position = format!("calc(50% - {})", px(options.center_offset()));
            decls.push(StyleDeclaration::new(StyleTarget::Container, LEFT, position.clone()));
            decls.push(StyleDeclaration::new(StyleTarget::Container, TOP, position));
        }

        plan.resize = applied.size;
        plan
    }

    /// Resize, then write every declaration.
    ///
    /// Style writes cannot fail, so a failed resize leaves the map untouched.
    pub fn apply(&self, map: &dyn MapView) -> Result<(), MapError> {
        if let Some(size) = self.resize {
            map.resize(size, size)?;
        }
        for decl in &self.declarations {
            map.set_style(decl.target, decl.property, &decl.value);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.resize.is_none()
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

// =============================================================================
// TESTS
// =============================================================================
