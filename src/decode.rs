//! Content-type driven body decoding for successful responses.

use crate::{Error, Result};
use http::{header, HeaderMap, StatusCode};
use serde::de::{
    value::{StringDeserializer, UnitDeserializer},
    DeserializeOwned, IntoDeserializer,
};

/// Returns `true` when the `content-type` header declares JSON.
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

/// Decodes a 2xx body.
///
/// JSON content types are parsed with `serde_json` straight from the bytes, so a
/// body that is not valid UTF-8 fails to decode. Anything else, including a
/// missing `content-type`, is handed to `T` as raw text and never parsed as JSON.
/// An empty text body also satisfies `()` and `Option<_>`.
pub fn decode_body<T>(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let raw_body = String::from_utf8_lossy(body);

    let decoded = if is_json(headers) {
        serde_json::from_slice::<T>(body).map_err(|e| e.to_string())
    } else {
        let text: StringDeserializer<serde::de::value::Error> =
            raw_body.to_string().into_deserializer();
        match T::deserialize(text) {
            Ok(data) => Ok(data),
            Err(e) if body.is_empty() => {
                let unit: UnitDeserializer<serde::de::value::Error> = ().into_deserializer();
                T::deserialize(unit).map_err(|_| e.to_string())
            }
            Err(e) => Err(e.to_string()),
        }
    };

    decoded.map_err(|message| {
        tracing::error!(
            error = %message,
            raw_response = %raw_body,
            "Failed to decode response"
        );
        Error::Decode {
            raw_body: raw_body.into_owned(),
            message,
            status,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use serde::Deserialize;

    fn content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Digest {
        id: u32,
    }

    #[test]
    fn json_content_type_decodes_structure() {
        let headers = content_type("application/json; charset=utf-8");
        let digest: Digest = decode_body(StatusCode::OK, &headers, br#"{"id":7}"#).unwrap();
        assert_eq!(digest, Digest { id: 7 });
    }

    #[test]
    fn json_content_type_match_ignores_case() {
        assert!(is_json(&content_type("Application/JSON")));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let headers = content_type("application/json");
        let err = decode_body::<Digest>(StatusCode::OK, &headers, b"{not json").unwrap_err();
        match err {
            Error::Decode {
                raw_body, status, ..
            } => {
                assert_eq!(raw_body, "{not json");
                assert_eq!(status, StatusCode::OK);
            }
            other => panic!("expected Decode, got {:?}", other),
        }
    }

    #[test]
    fn non_json_body_is_returned_as_text() {
        let headers = content_type("text/plain");
        let text: String = decode_body(StatusCode::OK, &headers, br#"{"id":7}"#).unwrap();
        assert_eq!(text, r#"{"id":7}"#);
    }

    #[test]
    fn non_json_body_into_value_stays_a_string() {
        let headers = content_type("text/html");
        let value: serde_json::Value = decode_body(StatusCode::OK, &headers, b"[1,2]").unwrap();
        assert_eq!(value, serde_json::Value::String("[1,2]".to_string()));
    }

    #[test]
    fn missing_content_type_is_treated_as_text() {
        let text: String = decode_body(StatusCode::OK, &HeaderMap::new(), b"hello").unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn text_body_into_struct_is_a_decode_error() {
        let result = decode_body::<Digest>(StatusCode::OK, &HeaderMap::new(), b"hello");
        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[test]
    fn empty_text_body_decodes_into_unit() {
        decode_body::<()>(StatusCode::NO_CONTENT, &HeaderMap::new(), b"").unwrap();
    }

    #[test]
    fn empty_text_body_decodes_into_option() {
        let nothing: Option<Digest> =
            decode_body(StatusCode::NO_CONTENT, &HeaderMap::new(), b"").unwrap();
        assert_eq!(nothing, None);
    }

    #[test]
    fn empty_text_body_still_decodes_into_string() {
        let text: String = decode_body(StatusCode::OK, &HeaderMap::new(), b"").unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn invalid_utf8_inside_json_is_a_decode_error() {
        let headers = content_type("application/json");
        let body = b"{\"name\":\"caf\xff\"}";
        let result = decode_body::<serde_json::Value>(StatusCode::OK, &headers, body);
        match result {
            Err(Error::Decode { raw_body, .. }) => assert!(raw_body.contains('\u{FFFD}')),
            other => panic!("expected Decode, got {:?}", other),
        }
    }
}
