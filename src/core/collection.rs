use crate::asset::Asset;
use crate::link::Link;
use crate::STAC_VERSION;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const COLLECTION_TYPE: &str = "Collection";

const DEFAULT_LICENSE: &str = "proprietary";

/// A catalog that also describes the dataset as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    pub license: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<Vec<Provider>>,

    pub extent: Extent,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summaries: Option<Map<String, Value>>,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub assets: BTreeMap<String, Asset>,

    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

/// Spatial and temporal extents of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub spatial: SpatialExtent,
    pub temporal: TemporalExtent,

    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialExtent {
    /// The first box is the overall extent; any others describe clusters within it.
    pub bbox: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalExtent {
    /// Open ends are `None`.
    pub interval: Vec<[Option<String>; 2]>,
}

/// An organization that captures or processes the data of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl Collection {
    pub fn new(id: impl ToString) -> Collection {
        Collection {
            r#type: COLLECTION_TYPE.to_string(),
            stac_version: STAC_VERSION.to_string(),
            stac_extensions: None,
            id: id.to_string(),
            title: None,
            description: String::new(),
            keywords: None,
            license: DEFAULT_LICENSE.to_string(),
            providers: None,
            extent: Extent::default(),
            summaries: None,
            links: Vec::new(),
            assets: BTreeMap::new(),
            additional_fields: Map::new(),
        }
    }
}

impl Default for Extent {
    fn default() -> Extent {
        Extent {
            spatial: SpatialExtent::default(),
            temporal: TemporalExtent::default(),
            additional_fields: Map::new(),
        }
    }
}

impl Default for SpatialExtent {
    fn default() -> SpatialExtent {
        SpatialExtent {
            bbox: vec![vec![-180.0, -90.0, 180.0, 90.0]],
        }
    }
}

impl Default for TemporalExtent {
    fn default() -> TemporalExtent {
        TemporalExtent {
            interval: vec![[None, None]],
        }
    }
}

impl Provider {
    pub fn new(name: impl ToString) -> Provider {
        Provider {
            name: name.to_string(),
            description: None,
            roles: None,
            url: None,
            additional_fields: Map::new(),
        }
    }
}

fn deserialize_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let r#type = String::deserialize(deserializer)?;
    if r#type != COLLECTION_TYPE {
        return Err(de::Error::invalid_value(
            de::Unexpected::Str(&r#type),
            &COLLECTION_TYPE,
        ));
    }
    Ok(r#type)
}
