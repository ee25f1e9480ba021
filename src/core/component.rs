//! The closed set of view types a document can contain.
//!
//! Tags are resolved exactly once, when the document is parsed.  Past this
//! point nothing matches on strings: an unrecognised tag is an explicit
//! [`Component::Unknown`] that renders as nothing.

use serde_json::Value;

use super::document::{ComponentToRender, ElementData, ItemData, ItemSlot};

/// Recognised `viewType` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    TopBar,
    GridView,
}

impl ViewType {
    pub const fn tag(self) -> &'static str {
        match self {
            ViewType::TopBar => "TopBar",
            ViewType::GridView => "GridView",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "TopBar" => Some(ViewType::TopBar),
            "GridView" => Some(ViewType::GridView),
            _ => None,
        }
    }
}

/// One renderable unit of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    TitleBar { title: String },
    /// Malformed item entries have already been dropped.
    Grid { items: Vec<ItemData> },
    /// A tag this client doesn't know; kept so documents stay forward-compatible.
    Unknown { view_type: String },
    /// A known tag whose payload could not be decoded, or an entry with no tag.
    Invalid { view_type: String, reason: String },
}

impl Component {
    /// Decode the payload of a component according to its (outer) tag.
    pub fn from_payload(view_type: String, data: Value) -> Self {
        let Some(kind) = ViewType::from_tag(&view_type) else {
            tracing::debug!("skipping unknown view type {view_type:?}");
            return Component::Unknown { view_type };
        };

        let element = if data.is_null() {
            Ok(ElementData::default())
        } else {
            serde_json::from_value::<ElementData>(data)
        };

        match element {
            Ok(element) => Self::from_element(kind, element),
            Err(err) => {
                tracing::warn!("invalid {view_type} payload: {err}");
                Component::Invalid {
                    view_type,
                    reason: err.to_string(),
                }
            }
        }
    }

    fn from_element(kind: ViewType, element: ElementData) -> Self {
        match kind {
            ViewType::TopBar => Component::TitleBar {
                title: element.title,
            },
            ViewType::GridView => {
                let mut items = Vec::with_capacity(element.data.len());
                for (i, slot) in element.data.into_iter().enumerate() {
                    match slot {
                        ItemSlot::Item(item) => items.push(item),
                        ItemSlot::Malformed(value) => {
                            tracing::warn!("dropping malformed grid item {i}: {value}");
                        }
                    }
                }
                Component::Grid { items }
            }
        }
    }

    /// The tag this component was built from.
    pub fn view_type(&self) -> &str {
        match self {
            Component::TitleBar { .. } => ViewType::TopBar.tag(),
            Component::Grid { .. } => ViewType::GridView.tag(),
            Component::Unknown { view_type } | Component::Invalid { view_type, .. } => view_type,
        }
    }

    pub fn to_wire(&self) -> ComponentToRender {
        let view_type = self.view_type().to_string();
        let data = match self {
            Component::TitleBar { title } => ElementData {
                view_type: view_type.clone(),
                title: title.clone(),
                data: Vec::new(),
            },
            Component::Grid { items } => ElementData {
                view_type: view_type.clone(),
                title: String::new(),
                data: items.iter().cloned().map(ItemSlot::Item).collect(),
            },
            Component::Unknown { .. } | Component::Invalid { .. } => ElementData::default(),
        };
        ComponentToRender { view_type, data }
    }
}

/// The outer tag wins; `data.view_type` is never consulted.
impl From<ComponentToRender> for Component {
    fn from(wire: ComponentToRender) -> Self {
        match ViewType::from_tag(&wire.view_type) {
            Some(kind) => Self::from_element(kind, wire.data),
            None => {
                tracing::debug!("skipping unknown view type {:?}", wire.view_type);
                Component::Unknown {
                    view_type: wire.view_type,
                }
            }
        }
    }
}
