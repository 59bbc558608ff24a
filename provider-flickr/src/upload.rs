//! Upload response parsing.
//!
//! The upload endpoint predates Flickr's JSON support and always answers
//! XML: `<rsp stat="ok"><photoid>123</photoid></rsp>` on success, or
//! `<rsp stat="fail"><err code="5" msg="..."/></rsp>` on failure.

use bridge_traits::error::{RemoteServiceError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Extract the new photo id from an upload response, or map the embedded
/// `<err>` element to an API error.
pub(crate) fn parse_photo_id(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"photoid" => {
                let text = reader
                    .read_text(e.name())
                    .map_err(|e| RemoteServiceError::Parse(format!("bad upload response: {}", e)))?;
                let id = text.trim().to_string();
                if id.is_empty() {
                    return Err(RemoteServiceError::Parse(
                        "empty <photoid> in upload response".to_string(),
                    ));
                }
                return Ok(id);
            }
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"err" => {
                return Err(error_from_attributes(&e));
            }
            Ok(Event::Eof) => {
                return Err(RemoteServiceError::Parse(
                    "no <photoid> in upload response".to_string(),
                ));
            }
            Ok(_) => {}
            Err(e) => {
                return Err(RemoteServiceError::Parse(format!(
                    "bad upload response: {}",
                    e
                )));
            }
        }
    }
}

fn error_from_attributes(element: &BytesStart<'_>) -> RemoteServiceError {
    let mut code = -1i64;
    let mut message = String::from("unknown upload error");

    for attr in element.attributes().flatten() {
        match attr.key.as_ref() {
            b"code" => {
                code = String::from_utf8_lossy(&attr.value)
                    .parse()
                    .unwrap_or(-1);
            }
            b"msg" => {
                if let Ok(value) = attr.unescape_value() {
                    message = value.into_owned();
                }
            }
            _ => {}
        }
    }

    RemoteServiceError::Api { code, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_successful_upload() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?>
<rsp stat="ok"><photoid>72157720</photoid></rsp>"#;
        assert_eq!(parse_photo_id(xml).unwrap(), "72157720");
    }

    #[test]
    fn test_parse_failed_upload() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?>
<rsp stat="fail"><err code="5" msg="Filetype was not recognised" /></rsp>"#;

        match parse_photo_id(xml).unwrap_err() {
            RemoteServiceError::Api { code, message } => {
                assert_eq!(code, 5);
                assert_eq!(message, "Filetype was not recognised");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_without_photoid() {
        let xml = r#"<rsp stat="ok"></rsp>"#;
        assert!(matches!(
            parse_photo_id(xml).unwrap_err(),
            RemoteServiceError::Parse(_)
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_photo_id("not xml <<<").is_err());
    }
}
