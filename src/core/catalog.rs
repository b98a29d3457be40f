use crate::link::Link;
use crate::STAC_VERSION;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const CATALOG_TYPE: &str = "Catalog";

/// A logical group of other catalogs, collections, and items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "type", deserialize_with = "deserialize_type")]
    pub r#type: String,

    pub stac_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stac_extensions: Option<Vec<String>>,

    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl Catalog {
    pub fn new(id: impl ToString) -> Catalog {
        Catalog {
            r#type: CATALOG_TYPE.to_string(),
            stac_version: STAC_VERSION.to_string(),
            stac_extensions: None,
            id: id.to_string(),
            title: None,
            description: String::new(),
            links: Vec::new(),
            additional_fields: Map::new(),
        }
    }
}

fn deserialize_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let r#type = String::deserialize(deserializer)?;
    if r#type != CATALOG_TYPE {
        return Err(de::Error::invalid_value(
            de::Unexpected::Str(&r#type),
            &CATALOG_TYPE,
        ));
    }
    Ok(r#type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_has_defaults() {
        let catalog = Catalog::new("an-id");
        assert_eq!(catalog.r#type, "Catalog");
        assert_eq!(catalog.stac_version, STAC_VERSION);
        assert!(catalog.links.is_empty());
    }

    #[test]
    fn rejects_other_types() {
        let value = json!({
            "type": "Collection",
            "stac_version": "1.0.0",
            "id": "not-a-catalog",
            "description": "",
            "links": []
        });
        assert!(serde_json::from_value::<Catalog>(value).is_err());
    }
}
