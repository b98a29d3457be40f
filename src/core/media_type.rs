//! Media types commonly found in STAC links and assets.

pub const JSON: &str = "application/json";
pub const GEOJSON: &str = "application/geo+json";
pub const GEOTIFF: &str = "image/tiff; application=geotiff";
pub const COG: &str = "image/tiff; application=geotiff; profile=cloud-optimized";
pub const PNG: &str = "image/png";
pub const JPEG: &str = "image/jpeg";
pub const XML: &str = "application/xml";
pub const TEXT: &str = "text/plain";
pub const HTML: &str = "text/html";
