use crate::catalog::{Catalog, CATALOG_TYPE};
use crate::collection::{Collection, COLLECTION_TYPE};
use crate::error::{Error, Result};
use crate::href::Href;
use crate::item::{Item, ITEM_TYPE};
use crate::link::Link;
use serde_json::Value;

/// Any of the three STAC object types.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum Object {
    Catalog(Catalog),
    Collection(Collection),
    Item(Item),
}

/// An [`Object`] together with the href it was read from, or will be written to.
#[derive(Debug, Clone, PartialEq)]
pub struct HrefObject {
    pub object: Object,
    pub href: Href,
}

/// An object and its optional href, the input of most tree operations.
pub type ObjectHrefTuple = (Object, Option<Href>);

impl Object {
    pub fn id(&self) -> &str {
        match self {
            Object::Catalog(catalog) => &catalog.id,
            Object::Collection(collection) => &collection.id,
            Object::Item(item) => &item.id,
        }
    }

    /// Catalogs and collections carry a top-level title, items carry it in their properties.
    pub fn title(&self) -> Option<&str> {
        match self {
            Object::Catalog(catalog) => catalog.title.as_deref(),
            Object::Collection(collection) => collection.title.as_deref(),
            Object::Item(item) => item.title(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Catalog(_) => CATALOG_TYPE,
            Object::Collection(_) => COLLECTION_TYPE,
            Object::Item(_) => ITEM_TYPE,
        }
    }

    pub fn links(&self) -> &[Link] {
        match self {
            Object::Catalog(catalog) => &catalog.links,
            Object::Collection(collection) => &collection.links,
            Object::Item(item) => &item.links,
        }
    }

    pub fn links_mut(&mut self) -> &mut Vec<Link> {
        match self {
            Object::Catalog(catalog) => &mut catalog.links,
            Object::Collection(collection) => &mut collection.links,
            Object::Item(item) => &mut item.links,
        }
    }

    pub fn add_link(&mut self, link: Link) {
        self.links_mut().push(link);
    }

    pub fn root_link(&self) -> Option<&Link> {
        self.links().iter().find(|link| link.is_root())
    }

    pub fn parent_link(&self) -> Option<&Link> {
        self.links().iter().find(|link| link.is_parent())
    }

    pub fn child_links(&self) -> impl Iterator<Item = &Link> {
        self.links().iter().filter(|link| link.is_child())
    }

    pub fn item_links(&self) -> impl Iterator<Item = &Link> {
        self.links().iter().filter(|link| link.is_item())
    }

    pub fn is_catalog(&self) -> bool {
        matches!(self, Object::Catalog(_))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Object::Collection(_))
    }

    pub fn is_item(&self) -> bool {
        matches!(self, Object::Item(_))
    }

    pub fn as_catalog(&self) -> Option<&Catalog> {
        match self {
            Object::Catalog(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Object::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Object::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        let value = match self {
            Object::Catalog(catalog) => serde_json::to_value(catalog),
            Object::Collection(collection) => serde_json::to_value(collection),
            Object::Item(item) => serde_json::to_value(item),
        };
        value.map_err(|e| {
            Error::internal_json(e.to_string(), Some(format!("serialize {}", self.id())))
        })
    }
}

impl TryFrom<Value> for Object {
    type Error = Error;

    fn try_from(value: Value) -> Result<Object> {
        let expected = [CATALOG_TYPE, COLLECTION_TYPE, ITEM_TYPE];
        let r#type = match value.get("type") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => return Err(Error::object_invalid_type(other.clone(), &expected)),
            None => return Err(Error::object_missing_type()),
        };
        match r#type.as_str() {
            CATALOG_TYPE => Ok(Object::Catalog(serde_json::from_value(value)?)),
            COLLECTION_TYPE => Ok(Object::Collection(serde_json::from_value(value)?)),
            ITEM_TYPE => Ok(Object::Item(serde_json::from_value(value)?)),
            _ => Err(Error::object_invalid_type(Value::String(r#type), &expected)),
        }
    }
}

impl From<Catalog> for Object {
    fn from(catalog: Catalog) -> Object {
        Object::Catalog(catalog)
    }
}

impl From<Collection> for Object {
    fn from(collection: Collection) -> Object {
        Object::Collection(collection)
    }
}

impl From<Item> for Object {
    fn from(item: Item) -> Object {
        Object::Item(item)
    }
}

impl HrefObject {
    pub fn new(object: impl Into<Object>, href: impl Into<Href>) -> HrefObject {
        HrefObject {
            object: object.into(),
            href: href.into(),
        }
    }
}

impl From<HrefObject> for ObjectHrefTuple {
    fn from(href_object: HrefObject) -> ObjectHrefTuple {
        (href_object.object, Some(href_object.href))
    }
}

impl From<Object> for ObjectHrefTuple {
    fn from(object: Object) -> ObjectHrefTuple {
        (object, None)
    }
}

impl From<Catalog> for ObjectHrefTuple {
    fn from(catalog: Catalog) -> ObjectHrefTuple {
        (catalog.into(), None)
    }
}

impl From<Collection> for ObjectHrefTuple {
    fn from(collection: Collection) -> ObjectHrefTuple {
        (collection.into(), None)
    }
}

impl From<Item> for ObjectHrefTuple {
    fn from(item: Item) -> ObjectHrefTuple {
        (item.into(), None)
    }
}
