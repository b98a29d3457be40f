use crate::asset::Asset;
use crate::error::{Error, Result};
use crate::link::Link;
use crate::STAC_VERSION;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const ITEM_TYPE: &str = "Feature";

/// A GeoJSON Feature augmented with STAC members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "type", deserialize_with = "deserialize_type")]
    pub r#type: String,

    pub stac_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stac_extensions: Option<Vec<String>>,

    pub id: String,

    /// GeoJSON geometry, `null` for items without a location.
    pub geometry: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,

    pub properties: Properties,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    pub assets: BTreeMap<String, Asset>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

/// Additional metadata for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    /// RFC 3339 acquisition time, `null` when a start/end range is given instead.
    pub datetime: Option<String>,

    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl Item {
    /// Creates an item stamped with the current time.
    pub fn new(id: impl ToString) -> Item {
        Item {
            r#type: ITEM_TYPE.to_string(),
            stac_version: STAC_VERSION.to_string(),
            stac_extensions: None,
            id: id.to_string(),
            geometry: None,
            bbox: None,
            properties: Properties::default(),
            links: Vec::new(),
            assets: BTreeMap::new(),
            collection: None,
            additional_fields: Map::new(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.properties
            .additional_fields
            .get("title")
            .and_then(Value::as_str)
    }

    pub fn datetime(&self) -> Result<Option<DateTime<FixedOffset>>> {
        self.properties
            .datetime
            .as_deref()
            .map(|s| {
                DateTime::parse_from_rfc3339(s).map_err(|e| {
                    Error::validation_invalid_argument(
                        "properties.datetime",
                        format!("'{}' is not an RFC 3339 datetime: {}", s, e),
                        None,
                    )
                })
            })
            .transpose()
    }
}

impl Default for Properties {
    fn default() -> Properties {
        Properties {
            datetime: Some(Utc::now().to_rfc3339()),
            additional_fields: Map::new(),
        }
    }
}

fn deserialize_type<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let r#type = String::deserialize(deserializer)?;
    if r#type != ITEM_TYPE {
        return Err(de::Error::invalid_value(
            de::Unexpected::Str(&r#type),
            &ITEM_TYPE,
        ));
    }
    Ok(r#type)
}
