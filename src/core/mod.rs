// Public modules
pub mod asset;
pub mod catalog;
pub mod collection;
pub mod config;
pub mod error;
pub mod href;
pub mod item;
pub mod layout;
pub mod link;
pub mod media_type;
pub mod object;
pub mod read;
pub mod stac;
pub mod write;

// Re-export common types for convenience
pub use asset::Asset;
pub use catalog::{Catalog, CATALOG_TYPE};
pub use collection::{Collection, Extent, Provider, SpatialExtent, TemporalExtent, COLLECTION_TYPE};
pub use config::Config;
pub use error::{Error, ErrorCode, Result};
pub use href::Href;
pub use item::{Item, Properties, ITEM_TYPE};
pub use layout::{BestPractices, Layout, NextHref, Rebase};
pub use link::Link;
pub use object::{HrefObject, Object, ObjectHrefTuple};
pub use read::{Read, Reader};
pub use stac::{BorrowedWalk, Handle, OwnedWalk, Stac, Walk};
pub use write::{Write, Writer};

/// The STAC version written by this library.
pub const STAC_VERSION: &str = "1.0.0";

/// Reads a STAC object with the default [`Reader`].
pub fn read(href: impl Into<Href>) -> Result<HrefObject> {
    Reader::default().read(href)
}

/// Reads an item, failing if the href holds another object type.
pub fn read_item(href: &Href) -> Result<Item> {
    match read(href.clone())?.object {
        Object::Item(item) => Ok(item),
        other => Err(Error::object_invalid_type(
            serde_json::Value::String(other.type_name().to_string()),
            &[ITEM_TYPE],
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_item_from_fixture() {
        let item = read_item(&Href::new("data/simple-item.json")).unwrap();
        assert_eq!(item.id, "simple-item");
    }

    #[test]
    fn read_item_rejects_catalog() {
        let err = read_item(&Href::new("data/catalog.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ObjectInvalidType);
    }
}
