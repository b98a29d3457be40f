//! The `stac` command envelope.
//!
//! A command prints exactly one JSON document to stdout: `{"success": true, "data": …}`
//! or `{"success": false, "error": …}`. The error's code family picks the exit status.

use serde::Serialize;
use serde_json::Value;
use stac::error::Hint;
use stac::{Error, ErrorCode, Result};

/// Exit status for an error code family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitFamily {
    Internal = 1,
    Input = 2,
    Tree = 4,
    Io = 20,
}

impl From<ErrorCode> for ExitFamily {
    fn from(code: ErrorCode) -> ExitFamily {
        match code {
            ErrorCode::ObjectMissingType
            | ErrorCode::ObjectInvalidType
            | ErrorCode::HrefInvalid
            | ErrorCode::HrefMissing
            | ErrorCode::HrefNotUnderRoot
            | ErrorCode::ConfigInvalidJson
            | ErrorCode::ConfigInvalidValue
            | ErrorCode::ValidationInvalidArgument
            | ErrorCode::ValidationInvalidJson => ExitFamily::Input,

            ErrorCode::TreeCannotRemoveRoot
            | ErrorCode::TreeUnresolvableNode
            | ErrorCode::TreeCycle => ExitFamily::Tree,

            ErrorCode::WriteUnsupportedHref | ErrorCode::RemoteRequestFailed => ExitFamily::Io,

            ErrorCode::InternalIoError
            | ErrorCode::InternalJsonError
            | ErrorCode::InternalUnexpected => ExitFamily::Internal,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody<'a>>,
}

/// The serialized face of a [`stac::Error`].
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub code: &'static str,
    pub message: &'a str,
    pub details: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<&'a [Hint]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl<'a> Envelope<'a> {
    pub fn new(result: &'a Result<Value>) -> Envelope<'a> {
        match result {
            Ok(data) => Envelope {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(err) => Envelope {
                success: false,
                data: None,
                error: Some(ErrorBody {
                    code: err.code.as_str(),
                    message: &err.message,
                    details: &err.details,
                    hints: (!err.hints.is_empty()).then_some(err.hints.as_slice()),
                    retryable: err.retryable,
                }),
            },
        }
    }
}

/// Serializes a command's output, pairing failures with their exit status.
pub fn map_cmd_result_to_json<T: Serialize>(result: Result<(T, i32)>) -> (Result<Value>, i32) {
    let (data, exit_code) = match result {
        Ok(ok) => ok,
        Err(err) => {
            let family = ExitFamily::from(err.code);
            return (Err(err), family as i32);
        }
    };
    match serde_json::to_value(data) {
        Ok(value) => (Ok(value), exit_code),
        Err(e) => (
            Err(Error::internal_json(
                e.to_string(),
                Some("serialize command output".to_string()),
            )),
            ExitFamily::Internal as i32,
        ),
    }
}

pub fn print_json_result(result: Result<Value>) -> Result<()> {
    use std::io::{self, Write};

    let payload = serde_json::to_string_pretty(&Envelope::new(&result))
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize envelope".to_string())))?;
    let mut stdout = io::stdout().lock();
    match writeln!(stdout, "{}", payload) {
        Ok(()) => Ok(()),
        // The reader went away (`stac walk … | head`).
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(Error::internal_io(e.to_string(), Some("write stdout".to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_exit_codes() {
        let (result, code) = map_cmd_result_to_json::<()>(Err(Error::href_missing()));
        assert!(result.is_err());
        assert_eq!(code, 2);

        let (_, code) = map_cmd_result_to_json::<()>(Err(Error::tree_cycle(1, 2)));
        assert_eq!(code, 4);

        let (_, code) =
            map_cmd_result_to_json::<()>(Err(Error::write_unsupported_href("http://x.test/a.json")));
        assert_eq!(code, 20);

        let (_, code) = map_cmd_result_to_json::<()>(Err(Error::internal_unexpected("boom")));
        assert_eq!(code, 1);
    }

    #[test]
    fn success_keeps_command_exit_code() {
        let (result, code) = map_cmd_result_to_json(Ok((serde_json::json!({"count": 6}), 0)));
        assert_eq!(code, 0);
        assert_eq!(result.unwrap()["count"], 6);
    }

    #[test]
    fn error_envelope_carries_code_and_hints() {
        let result: Result<Value> = Err(Error::href_missing());
        let value = serde_json::to_value(Envelope::new(&result)).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "href.missing");
        assert!(value["error"]["hints"].is_array());
        assert!(value.get("data").is_none());
    }

    #[test]
    fn hintless_errors_omit_hints() {
        let result: Result<Value> = Err(Error::tree_cannot_remove_root());
        let value = serde_json::to_value(Envelope::new(&result)).unwrap();
        assert!(value["error"].get("hints").is_none());
        assert!(value["error"].get("retryable").is_none());
    }

    #[test]
    fn success_envelope_wraps_data() {
        let result: Result<Value> = Ok(serde_json::json!({"id": "examples"}));
        let value = serde_json::to_value(Envelope::new(&result)).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["id"], "examples");
        assert!(value.get("error").is_none());
    }
}
