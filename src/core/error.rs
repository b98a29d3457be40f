use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ObjectMissingType,
    ObjectInvalidType,

    HrefInvalid,
    HrefMissing,
    HrefNotUnderRoot,

    TreeCannotRemoveRoot,
    TreeUnresolvableNode,
    TreeCycle,

    WriteUnsupportedHref,
    RemoteRequestFailed,

    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,
    ValidationInvalidJson,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ObjectMissingType => "object.missing_type",
            ErrorCode::ObjectInvalidType => "object.invalid_type",

            ErrorCode::HrefInvalid => "href.invalid",
            ErrorCode::HrefMissing => "href.missing",
            ErrorCode::HrefNotUnderRoot => "href.not_under_root",

            ErrorCode::TreeCannotRemoveRoot => "tree.cannot_remove_root",
            ErrorCode::TreeUnresolvableNode => "tree.unresolvable_node",
            ErrorCode::TreeCycle => "tree.cycle",

            ErrorCode::WriteUnsupportedHref => "write.unsupported_href",
            ErrorCode::RemoteRequestFailed => "remote.request_failed",

            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",
            ErrorCode::ValidationInvalidJson => "validation.invalid_json",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidTypeDetails {
    pub value: Value,
    pub expected: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HrefNotUnderRootDetails {
    pub href: String,
    pub root: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn object_missing_type() -> Self {
        Self::new(
            ErrorCode::ObjectMissingType,
            "STAC object has no 'type' field",
            Value::Object(serde_json::Map::new()),
        )
    }

    pub fn object_invalid_type(value: Value, expected: &[&str]) -> Self {
        let message = match value.as_str() {
            Some(s) => format!("Unsupported STAC object type '{}'", s),
            None => "STAC object 'type' must be a string".to_string(),
        };
        Self::new(
            ErrorCode::ObjectInvalidType,
            message,
            to_details(InvalidTypeDetails {
                value,
                expected: expected.iter().map(|s| s.to_string()).collect(),
            }),
        )
    }

    pub fn href_invalid(href: impl Into<String>, problem: impl Into<String>) -> Self {
        let href = href.into();
        Self::new(
            ErrorCode::HrefInvalid,
            format!("Invalid href: {}", href),
            serde_json::json!({ "href": href, "problem": problem.into() }),
        )
    }

    pub fn href_missing() -> Self {
        Self::new(
            ErrorCode::HrefMissing,
            "Object has no href",
            Value::Object(serde_json::Map::new()),
        )
        .with_hint("Set an href on the object or lay the tree out with best practices")
    }

    pub fn href_not_under_root(href: impl Into<String>, root: impl Into<String>) -> Self {
        let href = href.into();
        let root = root.into();
        Self::new(
            ErrorCode::HrefNotUnderRoot,
            format!("'{}' is not under '{}'", href, root),
            to_details(HrefNotUnderRootDetails { href, root }),
        )
    }

    pub fn tree_cannot_remove_root() -> Self {
        Self::new(
            ErrorCode::TreeCannotRemoveRoot,
            "Cannot remove the root of a STAC tree",
            Value::Object(serde_json::Map::new()),
        )
    }

    pub fn tree_unresolvable_node(handle: usize) -> Self {
        Self::new(
            ErrorCode::TreeUnresolvableNode,
            "Node has neither an object nor an href",
            serde_json::json!({ "handle": handle }),
        )
    }

    pub fn tree_cycle(parent: usize, child: usize) -> Self {
        Self::new(
            ErrorCode::TreeCycle,
            "Connecting these nodes would create a cycle",
            serde_json::json!({ "parent": parent, "child": child }),
        )
    }

    pub fn write_unsupported_href(href: impl Into<String>) -> Self {
        let href = href.into();
        Self::new(
            ErrorCode::WriteUnsupportedHref,
            format!("Cannot write to '{}'", href),
            serde_json::json!({ "href": href }),
        )
        .with_hint("Only local filesystem paths can be written")
    }

    pub fn remote_request_failed(
        url: impl Into<String>,
        status: Option<u16>,
        body: impl Into<String>,
    ) -> Self {
        let url = url.into();
        let message = match status {
            Some(status) => format!("GET {} failed: HTTP {}", url, status),
            None => format!("GET {} failed", url),
        };
        let mut err = Self::new(
            ErrorCode::RemoteRequestFailed,
            message,
            serde_json::json!({ "url": url, "status": status, "body": body.into() }),
        );
        err.retryable = Some(status.map(|s| s >= 500).unwrap_or(true));
        err
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            to_details(ConfigInvalidJsonDetails {
                path: path.into(),
                error: err.to_string(),
            }),
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            to_details(ConfigInvalidValueDetails {
                key: key.into(),
                value,
                problem: problem.into(),
            }),
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            to_details(InvalidArgumentDetails {
                field: field.into(),
                problem: problem.into(),
                tried,
            }),
        )
    }

    pub fn validation_invalid_json(err: serde_json::Error, context: Option<String>) -> Self {
        let details = serde_json::json!({
            "error": err.to_string(),
            "context": context,
        });

        Self::new(ErrorCode::ValidationInvalidJson, "Invalid JSON", details)
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            "IO error",
            to_details(InternalIoErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            to_details(InternalJsonErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::internal_io(err.to_string(), None)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::validation_invalid_json(err, None)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::href_invalid("", err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        let status = err.status().map(|s| s.as_u16());
        Error::remote_request_failed(url, status, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_dotted() {
        assert_eq!(ErrorCode::TreeCannotRemoveRoot.as_str(), "tree.cannot_remove_root");
        assert_eq!(ErrorCode::HrefNotUnderRoot.as_str(), "href.not_under_root");
    }

    #[test]
    fn invalid_type_names_the_value() {
        let err = Error::object_invalid_type(Value::String("panda".into()), &["Catalog"]);
        assert_eq!(err.code, ErrorCode::ObjectInvalidType);
        assert!(err.message.contains("panda"));
        assert_eq!(err.details["expected"][0], "Catalog");
    }

    #[test]
    fn server_errors_are_retryable() {
        let err = Error::remote_request_failed("http://example.com/catalog.json", Some(503), "");
        assert_eq!(err.retryable, Some(true));
        let err = Error::remote_request_failed("http://example.com/catalog.json", Some(404), "");
        assert_eq!(err.retryable, Some(false));
    }

    #[test]
    fn with_hint_appends() {
        let err = Error::internal_unexpected("boom").with_hint("try again");
        assert_eq!(err.hints.len(), 1);
        assert_eq!(err.hints[0].message, "try again");
    }
}
