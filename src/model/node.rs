//! Nested source nodes accepted by the flattener.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node of nested application data.
///
/// Implementors expose their ordered children, an optional stable identifier,
/// and the payload that the flattened item will own.
pub trait TreeNode: Sized {
    /// Payload stored on the flattened item.
    type Data;

    fn children(&self) -> &[Self];

    /// Stable identifier, used as the item identifier when present.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Copy of this node's own data, without its children.
    fn to_data(&self) -> Self::Data;
}

/// A node read from a JSON document.
///
/// `id` and `children` are structural; every other field is payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SourceNode>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SourceNode {
    /// Leaf node with a single `name` field.
    pub fn named(name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.into()));
        Self {
            id: None,
            children: Vec::new(),
            fields,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_children(mut self, children: Vec<SourceNode>) -> Self {
        self.children = children;
        self
    }
}

impl TreeNode for SourceNode {
    type Data = NodeData;

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn to_data(&self) -> NodeData {
        NodeData {
            id: self.id.clone(),
            fields: self.fields.clone(),
        }
    }
}

/// Payload of a flattened [`SourceNode`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NodeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NodeData {
    const LABEL_FIELDS: [&'static str; 3] = ["name", "label", "title"];

    /// Display text: the first string among `name`, `label`, `title`, else the id.
    pub fn label(&self) -> &str {
        Self::LABEL_FIELDS
            .iter()
            .find_map(|key| self.fields.get(*key).and_then(Value::as_str))
            .or(self.id.as_deref())
            .unwrap_or("")
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
