// ============================================================================
// spark-spyglass - Options Patch
// Partial option updates, strict (serde) or lenient (per-field JSON)
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::Shape;

/// A partial update to [`SpyglassOptions`](super::SpyglassOptions).
///
/// `None` means "leave as is". Build one with the [`patch!`](crate::patch)
/// macro, deserialize it strictly with serde, or read it leniently from
/// untrusted JSON with [`OptionsPatch::from_json`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl OptionsPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.border_color.is_none()
            && self.border_width.is_none()
            && self.opacity.is_none()
            && self.shape.is_none()
            && self.size.is_none()
    }

    /// Read a patch from loosely-typed JSON.
    ///
    /// Unlike `serde_json::from_value`, a field holding the wrong kind of
    /// value (or an unknown shape name) is skipped instead of failing the
    /// whole patch. Anything that is not an object yields an empty patch.
    ///
    /// # Example
    ///
    /// ```
    /// use spark_spyglass::OptionsPatch;
    ///
    /// let patch = OptionsPatch::from_json(&serde_json::json!({
    ///     "opacity": "x",
    ///     "size": 200
    /// }));
    ///
    /// assert_eq!(patch.opacity, None);
    /// assert_eq!(patch.size, Some(200.0));
    /// ```
    pub fn from_json(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            warn!(kind = json_kind(value), "Spyglass options must be an object");
            return Self::default();
        };

        let mut patch = Self::default();

        for (key, value) in fields {
            let accepted = match key.as_str() {
                "borderColor" => value
                    .as_str()
                    .map(|s| patch.border_color = Some(s.to_string()))
                    .is_some(),
                "borderWidth" => value.as_f64().map(|n| patch.border_width = Some(n)).is_some(),
                "opacity" => value.as_f64().map(|n| patch.opacity = Some(n)).is_some(),
                "shape" => value
                    .as_str()
                    .and_then(|s| s.parse::<Shape>().ok())
                    .map(|s| patch.shape = Some(s))
                    .is_some(),
                "size" => value.as_f64().map(|n| patch.size = Some(n)).is_some(),
                _ => {
                    warn!(key = key.as_str(), "Ignoring unknown spyglass option");
                    continue;
                }
            };

            if !accepted {
                warn!(
                    key = key.as_str(),
                    kind = json_kind(value),
                    "Ignoring spyglass option with invalid value"
                );
            }
        }

        patch
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
