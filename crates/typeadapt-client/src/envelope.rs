use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use typeadapt_adapter::ErrorKind;
use typeadapt_router::Router;

use crate::error::{ClientError, Result};

/// Failure payload carried in a [`Reply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Wire reply: `{"ok": <value>}` or `{"error": {"kind": .., "message": ..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
    Ok(Value),
    Error(RemoteError),
}

impl Reply {
    pub fn into_result(self) -> Result<Value> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::Error(RemoteError { kind, message }) => {
                Err(ClientError::Remote { kind, message })
            }
        }
    }
}

/// Server half of a call: decode `request`, dispatch it, encode the reply.
///
/// Failures of the call itself are reported inside the reply; the outer
/// error only covers encoding the reply.
pub async fn serve(router: &Router, path: &str, request: &[u8]) -> serde_json::Result<Vec<u8>> {
    let reply = match serde_json::from_slice::<Value>(request) {
        Ok(input) => match router.call(path, input).await {
            Ok(output) => Reply::Ok(output),
            Err(err) => {
                debug!(path, kind = %err.kind(), "call failed");
                Reply::Error(RemoteError {
                    kind: err.kind(),
                    message: err.to_string(),
                })
            }
        },
        Err(err) => Reply::Error(RemoteError {
            kind: ErrorKind::InvalidInput,
            message: format!("request is not valid JSON: {err}"),
        }),
    };
    serde_json::to_vec(&reply)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reply_wire_format() {
        assert_eq!(
            serde_json::to_value(Reply::Ok(json!(3))).unwrap(),
            json!({ "ok": 3 })
        );
        assert_eq!(
            serde_json::to_value(Reply::Error(RemoteError {
                kind: ErrorKind::NotFound,
                message: "no procedure at path x".to_string(),
            }))
            .unwrap(),
            json!({ "error": { "kind": "not_found", "message": "no procedure at path x" } })
        );
    }

    #[test]
    fn error_reply_becomes_remote_error() {
        let reply: Reply = serde_json::from_value(
            json!({ "error": { "kind": "handler", "message": "boom" } }),
        )
        .unwrap();
        let err = reply.into_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Handler);
    }
}
