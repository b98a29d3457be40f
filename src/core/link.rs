use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ROOT_REL: &str = "root";
pub const PARENT_REL: &str = "parent";
pub const CHILD_REL: &str = "child";
pub const ITEM_REL: &str = "item";
pub const SELF_REL: &str = "self";

/// A relationship from one STAC object to another entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,

    pub rel: String,

    /// Media type of the referenced entity.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl Link {
    pub fn new(href: impl ToString, rel: impl ToString) -> Link {
        Link {
            href: href.to_string(),
            rel: rel.to_string(),
            r#type: None,
            title: None,
            additional_fields: Map::new(),
        }
    }

    pub fn root(href: impl ToString) -> Link {
        Link::new(href, ROOT_REL).with_type(crate::media_type::JSON)
    }

    pub fn parent(href: impl ToString) -> Link {
        Link::new(href, PARENT_REL).with_type(crate::media_type::JSON)
    }

    pub fn child(href: impl ToString) -> Link {
        Link::new(href, CHILD_REL).with_type(crate::media_type::JSON)
    }

    pub fn item(href: impl ToString) -> Link {
        Link::new(href, ITEM_REL).with_type(crate::media_type::GEOJSON)
    }

    pub fn self_(href: impl ToString) -> Link {
        Link::new(href, SELF_REL).with_type(crate::media_type::JSON)
    }

    pub fn with_type(mut self, media_type: impl ToString) -> Link {
        self.r#type = Some(media_type.to_string());
        self
    }

    pub fn is_root(&self) -> bool {
        self.rel == ROOT_REL
    }

    pub fn is_parent(&self) -> bool {
        self.rel == PARENT_REL
    }

    pub fn is_child(&self) -> bool {
        self.rel == CHILD_REL
    }

    pub fn is_item(&self) -> bool {
        self.rel == ITEM_REL
    }

    pub fn is_self(&self) -> bool {
        self.rel == SELF_REL
    }

    /// Structural links define the shape of a catalog tree and are rebuilt by a layout.
    pub fn is_structural(&self) -> bool {
        self.is_root() || self.is_parent() || self.is_child() || self.is_item() || self.is_self()
    }
}
