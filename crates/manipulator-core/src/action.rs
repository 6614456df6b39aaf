//! Declarative manipulation actions.
//!
//! An [`Action`] is one geometric edit. On the wire each action is an object
//! with a single key naming the edit, which is exactly serde's externally
//! tagged enum representation:
//!
//! ```text
//! { "crop":   { "originX": 0, "originY": 0, "width": 10, "height": 10 } }
//! { "extent": { "backgroundColor": "#ff0000", "width": 20, "height": 20 } }
//! { "resize": { "width": 100 } }
//! { "flip":   "horizontal" }
//! { "rotate": 90 }
//! ```
//!
//! Callers that receive loosely-typed input (JavaScript objects) should go
//! through [`parse_actions`], which skips entries naming no known action.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors produced while interpreting loosely-typed action entries.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The entry names a known action but its parameters don't parse.
    #[error("Invalid parameters for '{action}' action: {source}")]
    InvalidParams {
        action: &'static str,
        source: serde_json::Error,
    },
}

/// A single geometric edit and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Keep only a sub-rectangle of the surface.
    Crop(CropParams),
    /// Resize the canvas around the image, padding with a background colour.
    Extent(ExtentParams),
    /// Scale the image, preserving aspect ratio when one side is omitted.
    Resize(ResizeParams),
    /// Mirror along one or both axes.
    Flip(FlipParams),
    /// Rotate by the given number of degrees, clockwise when positive.
    Rotate(f64),
}

impl Action {
    /// The wire name of this action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Crop(_) => "crop",
            Action::Extent(_) => "extent",
            Action::Resize(_) => "resize",
            Action::Flip(_) => "flip",
            Action::Rotate(_) => "rotate",
        }
    }
}

/// Crop region in source pixels. Missing fields default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropParams {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Target canvas for an extent operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtentParams {
    /// CSS colour for the padding; `None` means transparent.
    #[serde(default)]
    pub background_color: Option<String>,
    /// Horizontal offset into the source image. Negative values move the
    /// image right within the new canvas.
    #[serde(default)]
    pub origin_x: f64,
    /// Vertical offset into the source image.
    #[serde(default)]
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Resize target. At least one side is normally given.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// A single flip axis, as written in the current API (`"horizontal"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipType {
    Horizontal,
    Vertical,
}

/// Flip axes.
///
/// Accepts either a [`FlipType`] string or the older object form
/// `{ "horizontal": bool, "vertical": bool }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "FlipRepr")]
pub struct FlipParams {
    pub horizontal: bool,
    pub vertical: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlipRepr {
    Axis(FlipType),
    Axes {
        #[serde(default)]
        horizontal: bool,
        #[serde(default)]
        vertical: bool,
    },
}

impl From<FlipRepr> for FlipParams {
    fn from(repr: FlipRepr) -> Self {
        match repr {
            FlipRepr::Axis(axis) => axis.into(),
            FlipRepr::Axes {
                horizontal,
                vertical,
            } => FlipParams {
                horizontal,
                vertical,
            },
        }
    }
}

impl From<FlipType> for FlipParams {
    fn from(axis: FlipType) -> Self {
        FlipParams {
            horizontal: axis == FlipType::Horizontal,
            vertical: axis == FlipType::Vertical,
        }
    }
}

/// Keys recognised in a loosely-typed entry, in precedence order.
const ACTION_KEYS: [&str; 5] = ["crop", "extent", "resize", "flip", "rotate"];

/// Interpret one loosely-typed action entry.
///
/// The first known key present (in the order crop, extent, resize, flip,
/// rotate) selects the action, and any other keys are ignored. Entries that
/// are not objects or carry none of the keys yield `Ok(None)`.
pub fn parse_action(entry: &Value) -> Result<Option<Action>, ActionError> {
    let Some(object) = entry.as_object() else {
        return Ok(None);
    };

    for key in ACTION_KEYS {
        if let Some(params) = object.get(key) {
            let mut tagged = serde_json::Map::with_capacity(1);
            tagged.insert(key.to_string(), params.clone());
            return serde_json::from_value(Value::Object(tagged))
                .map(Some)
                .map_err(|source| ActionError::InvalidParams {
                    action: key,
                    source,
                });
        }
    }

    Ok(None)
}

/// Interpret a list of loosely-typed action entries, skipping unknown ones.
pub fn parse_actions(entries: &[Value]) -> Result<Vec<Action>, ActionError> {
    let mut actions = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match parse_action(entry)? {
            Some(action) => actions.push(action),
            None => log::debug!("Skipping unrecognized action at index {index}"),
        }
    }
    Ok(actions)
}
