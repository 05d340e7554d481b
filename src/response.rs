//! Classification of the JSON envelope every API response shares.
//!
//! A response body looks like `{"result": "success" | "error", "msg": "...",
//! ...}`. A non-success `result` or a non-empty `msg` is a failure whatever the
//! HTTP status said. On success the bookkeeping keys are stripped and the rest
//! is decoded into the caller's payload type.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result, DEFAULT_API_ERROR};

/// Splits a raw response into its success payload or an error.
pub fn classify(status: u16, body: &str) -> Result<Map<String, Value>> {
    let mut object = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => object,
        _ => {
            return Err(Error::UnparseableResponse {
                status,
                body: body.to_string(),
            })
        }
    };

    let result = object.remove("result");
    let msg = match object.remove("msg") {
        Some(Value::String(msg)) => msg,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    let success = matches!(&result, Some(Value::String(r)) if r == "success");

    if !success || !msg.is_empty() {
        let message = if msg.is_empty() {
            DEFAULT_API_ERROR.to_string()
        } else {
            msg
        };
        let code = object
            .get("code")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Err(Error::Api { message, code });
    }

    Ok(object)
}

/// Decodes a classified payload into `T`.
pub fn decode<T: DeserializeOwned>(payload: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(payload)).map_err(|e| Error::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn strips_bookkeeping_on_success() {
        let payload = classify(200, r#"{"result":"success","msg":"","queue_id":"q1"}"#).unwrap();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload["queue_id"], "q1");
    }

    #[test]
    fn error_result_carries_server_message() {
        let err = classify(200, r#"{"result":"error","msg":"bad queue id","code":"BAD_EVENT_QUEUE_ID"}"#)
            .unwrap_err();
        match err {
            Error::Api { message, code } => {
                assert_eq!(message, "bad queue id");
                assert_eq!(code.as_deref(), Some("BAD_EVENT_QUEUE_ID"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_empty_msg_is_an_error_even_on_success() {
        let err = classify(200, r#"{"result":"success","msg":"stream does not exist"}"#).unwrap_err();
        assert_eq!(err.api_message(), Some("stream does not exist"));
    }

    #[test]
    fn missing_message_falls_back_to_default() {
        let err = classify(500, r#"{"result":"error"}"#).unwrap_err();
        assert_eq!(err.api_message(), Some(DEFAULT_API_ERROR));

        let err = classify(200, r#"{"queue_id":"q1"}"#).unwrap_err();
        assert_eq!(err.api_message(), Some(DEFAULT_API_ERROR));
    }

    #[test]
    fn non_json_body_is_unparseable() {
        let err = classify(502, "<html>Bad Gateway</html>").unwrap_err();
        match err {
            Error::UnparseableResponse { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "<html>Bad Gateway</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            classify(200, "[1, 2]"),
            Err(Error::UnparseableResponse { .. })
        ));
    }

    #[derive(Debug, Deserialize)]
    struct Rendered {
        rendered: String,
    }

    #[test]
    fn decode_reports_missing_fields() {
        let payload = classify(200, r#"{"result":"success","msg":""}"#).unwrap();
        let err = decode::<Rendered>(payload).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));

        let payload = classify(200, r#"{"result":"success","msg":"","rendered":"<p>hi</p>"}"#).unwrap();
        assert_eq!(decode::<Rendered>(payload).unwrap().rendered, "<p>hi</p>");
    }
}
