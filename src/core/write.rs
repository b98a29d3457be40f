use crate::config::Config;
use crate::error::{Error, Result};
use crate::object::HrefObject;
use std::fs;
use std::path::Path;

/// Writes STAC objects to their hrefs.
pub trait Write {
    fn write(&self, href_object: HrefObject) -> Result<()>;
}

/// Writes objects to the local filesystem. URLs are rejected.
#[derive(Debug, Clone)]
pub struct Writer {
    pub pretty: bool,
}

impl Writer {
    pub fn new(config: &Config) -> Writer {
        Writer {
            pretty: config.pretty,
        }
    }

    fn serialize(&self, href_object: &HrefObject) -> Result<String> {
        let value = href_object.object.to_value()?;
        let result = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        result.map_err(|e| Error::internal_json(e.to_string(), Some("serialize object".to_string())))
    }
}

impl Default for Writer {
    fn default() -> Self {
        Writer { pretty: true }
    }
}

impl Write for Writer {
    fn write(&self, href_object: HrefObject) -> Result<()> {
        if href_object.href.is_url() {
            return Err(Error::write_unsupported_href(href_object.href.as_str()));
        }
        let content = self.serialize(&href_object)?;
        let path = Path::new(href_object.href.as_str());
        log_status!("write", "{}", path.display());
        write_atomic(path, &content)
    }
}

/// Writes to a sibling temp file, then renames over the target.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let filename = path.file_name().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some("write file".to_string()),
        )
    })?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| {
                Error::internal_io(e.to_string(), Some("create directory".to_string()))
            })?;
            parent.to_path_buf()
        }
        _ => std::path::PathBuf::from("."),
    };

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some("write temp file".to_string())))?;

    fs::rename(&tmp_path, path)
        .map_err(|e| Error::internal_io(e.to_string(), Some("rename temp file".to_string())))?;

    Ok(())
}
