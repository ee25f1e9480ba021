//! Wire schema of a UI document.
//!
//! A document is a JSON array of components:
//!
//! ```json
//! [
//!   { "viewType": "TopBar",   "data": { "viewType": "TopBar", "title": "Server Driven UI", "data": [] } },
//!   { "viewType": "GridView", "data": { "viewType": "GridView", "title": "",
//!       "data": [ { "shape": "circle", "color": "#00ff00", "name": "Item0",
//!                   "cardHeight": 180, "fontSize": 32 } ] } }
//! ]
//! ```
//!
//! Parsing is strict only at the top level.  A component or item that does
//! not fit the schema is isolated so the rest of the document still renders.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::component::Component;

/// Card height used when an item omits `cardHeight` or gives a bad value.
pub const DEFAULT_CARD_HEIGHT: f32 = 180.0;
/// Label size used when an item omits `fontSize` or gives a bad value.
pub const DEFAULT_FONT_SIZE: f32 = 32.0;

// ───────────────────────────────────────── wire types ────────

/// One entry of the document's top-level array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentToRender {
    pub view_type: String,
    #[serde(default)]
    pub data: ElementData,
}

/// Type-specific payload of a component.
///
/// `view_type` repeats the outer tag; it is carried for compatibility with
/// existing documents and otherwise ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementData {
    #[serde(default)]
    pub view_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub data: Vec<ItemSlot>,
}

/// An entry of a grid's item list, kept even when it doesn't match the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemSlot {
    Item(ItemData),
    Malformed(Value),
}

/// One grid tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    #[serde(default, deserialize_with = "lenient_shape")]
    pub shape: Shape,
    /// Raw colour text; anything that isn't a string decodes as empty.
    #[serde(default, deserialize_with = "lenient_color")]
    pub color: String,
    #[serde(default)]
    pub name: String,
    /// Logical pixels.
    #[serde(default = "default_card_height", deserialize_with = "finite_px")]
    pub card_height: f32,
    /// Logical pixels.
    #[serde(default = "default_font_size", deserialize_with = "finite_px")]
    pub font_size: f32,
}

fn default_card_height() -> f32 {
    DEFAULT_CARD_HEIGHT
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn lenient_shape<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Shape, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Shape::from(s),
        _ => Shape::Rectangle,
    })
}

fn lenient_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Sizes beyond `f32` range saturate instead of becoming infinite, which
/// JSON cannot represent.
fn finite_px<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    let px = f64::deserialize(deserializer)?;
    Ok(px.clamp(-f32::MAX as f64, f32::MAX as f64) as f32)
}

/// Tile outline.  Only the literal `"circle"` selects [`Shape::Circle`];
/// every other string, including the empty one, is a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Shape {
    Circle,
    #[default]
    Rectangle,
}

impl From<&str> for Shape {
    fn from(s: &str) -> Self {
        if s == "circle" {
            Shape::Circle
        } else {
            Shape::Rectangle
        }
    }
}

impl From<String> for Shape {
    fn from(s: String) -> Self {
        Shape::from(s.as_str())
    }
}

impl From<Shape> for String {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Circle => "circle".into(),
            Shape::Rectangle => "rectangle".into(),
        }
    }
}

impl ItemData {
    pub fn new(shape: &str, color: &str, name: &str, card_height: f32, font_size: f32) -> Self {
        Self {
            shape: Shape::from(shape),
            color: color.to_string(),
            name: name.to_string(),
            card_height,
            font_size,
        }
    }
}

// ───────────────────────────────────────── document ──────────

/// A parsed, immutable UI document: components in vertical rendering order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    components: Vec<Component>,
}

/// Just enough of a component to find its tag; the payload is decoded per tag.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    view_type: String,
    #[serde(default)]
    data: Value,
}

impl Document {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// Build from already-typed wire values (e.g. a built-in document).
    pub fn from_wire(wire: Vec<ComponentToRender>) -> Self {
        Self::new(wire.into_iter().map(Component::from).collect())
    }

    /// Parse a JSON document.
    ///
    /// Fails only if the text is not a JSON array.  Entries that are not
    /// `{ viewType, data }` objects become [`Component::Invalid`].
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<Value> = serde_json::from_str(text)?;
        let components = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| match serde_json::from_value::<Envelope>(entry) {
                Ok(envelope) => Component::from_payload(envelope.view_type, envelope.data),
                Err(err) => {
                    tracing::warn!("document entry {i} is not a component: {err}");
                    Component::Invalid {
                        view_type: String::new(),
                        reason: err.to_string(),
                    }
                }
            })
            .collect();
        Ok(Self { components })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Normalised wire form: malformed items are gone, unknown components
    /// keep only their tag.
    pub fn to_wire(&self) -> Vec<ComponentToRender> {
        self.components.iter().map(Component::to_wire).collect()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_wire())
    }
}
