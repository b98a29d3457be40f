//! Reading STAC objects from local paths and URLs.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::href::Href;
use crate::object::{HrefObject, Object};
use reqwest::blocking::Client;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;

/// Turns hrefs into STAC objects.
///
/// Implement this to plug a custom source (an object store, an in-memory fixture set)
/// into a [`Stac`](crate::Stac) tree.
pub trait Read {
    fn read(&self, href: impl Into<Href>) -> Result<HrefObject>;
}

/// Reads paths with the standard library and URLs with a blocking HTTP client.
#[derive(Debug)]
pub struct Reader {
    config: Config,
    client: OnceLock<Client>,
}

impl Reader {
    pub fn new(config: &Config) -> Reader {
        Reader {
            config: config.clone(),
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.http_timeout_secs))
            .user_agent(self.config.user_agent.clone())
            .build()?;
        let _ = self.client.set(client);
        self.client
            .get()
            .ok_or_else(|| Error::internal_unexpected("HTTP client was not initialized"))
    }

    fn read_url(&self, href: &Href) -> Result<Value> {
        let response = self.client()?.get(href.as_str()).send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::remote_request_failed(
                href.as_str(),
                Some(status.as_u16()),
                body,
            ));
        }
        serde_json::from_str(&body)
            .map_err(|e| Error::validation_invalid_json(e, Some(href.to_string())))
    }

    fn read_path(&self, href: &Href) -> Result<Value> {
        let content = std::fs::read_to_string(href.as_str()).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::internal_io(
                    format!("File not found: {}", href),
                    Some("read file".to_string()),
                )
            } else {
                Error::internal_io(e.to_string(), Some("read file".to_string()))
            }
        })?;
        serde_json::from_str(&content)
            .map_err(|e| Error::validation_invalid_json(e, Some(href.to_string())))
    }
}

impl Default for Reader {
    fn default() -> Self {
        Reader::new(&Config::default())
    }
}

impl Read for Reader {
    fn read(&self, href: impl Into<Href>) -> Result<HrefObject> {
        let href = href.into();
        log_status!("read", "{}", href);
        let value = if href.is_url() {
            self.read_url(&href)?
        } else {
            self.read_path(&href)?
        };
        let object = Object::try_from(value)?;
        Ok(HrefObject { object, href })
    }
}
