//! Parser for `.msg` files: assembles a [`Message`] from the property
//! streams of the compound document.

use std::io::{Read, Seek};
use std::path::Path;

use cfb::CompoundFile;
use chrono::{DateTime, FixedOffset};
use compressed_rtf::decompress_rtf;
use tracing::{debug, warn};

use crate::error::{MsgError, Result};
use crate::model::attachment::Attachment;
use crate::model::message::Message;
use crate::model::recipient::{Recipient, RecipientKind};
use crate::parser::properties::{
    tags, PropReader, ATTACH_METHOD_EMBEDDED, PROPERTIES_HEADER_SUB,
};

const RECIP_STORAGE_PREFIX: &str = "__recip_version1.0_";
const ATTACH_STORAGE_PREFIX: &str = "__attach_version1.0_";

/// Parse a `.msg` file from disk.
///
/// The file handle is owned by the compound-document reader and closed
/// when parsing finishes; the returned [`Message`] owns all its data.
pub fn parse_msg(path: impl AsRef<Path>) -> Result<Message> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(MsgError::FileNotFound(path.to_path_buf()));
    }
    let mut comp = cfb::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData | std::io::ErrorKind::InvalidInput => {
            MsgError::InvalidMsg(path.to_path_buf())
        }
        _ => MsgError::io(path, e),
    })?;
    let message = read_message(&mut comp)?;
    debug!(
        path = %path.display(),
        recipients = message.recipients.len(),
        attachments = message.attachments.len(),
        "Parsed MSG file"
    );
    Ok(message)
}

/// Parse a `.msg` from any seekable byte source.
///
/// Used by tests and callers that already hold the bytes in memory.
pub fn from_reader<F: Read + Seek>(source: F) -> Result<Message> {
    let mut comp = CompoundFile::open(source)?;
    read_message(&mut comp)
}

fn read_message<F: Read + Seek>(comp: &mut CompoundFile<F>) -> Result<Message> {
    let mut props = PropReader::new(comp);
    let root = Path::new("/");

    let subject = non_empty(props.string(root, tags::SUBJECT)?);
    let sender_name = non_empty(props.string(root, tags::SENDER_NAME)?);
    // The SMTP variant is the displayable address; the plain sender
    // address often holds an Exchange DN.
    let sender_email = match non_empty(props.string(root, tags::SENDER_SMTP)?) {
        Some(addr) => Some(addr),
        None => non_empty(props.string(root, tags::SENDER_EMAIL)?),
    };
    let display_to = non_empty(props.string(root, tags::DISPLAY_TO)?);
    let display_cc = non_empty(props.string(root, tags::DISPLAY_CC)?);
    let transport_headers = non_empty(props.string(root, tags::TRANSPORT_HEADERS)?);
    let date = transport_headers.as_deref().and_then(date_from_headers);

    let body_text = non_empty(props.string(root, tags::BODY_TEXT)?);
    let body_html = read_html_body(&mut props, root)?;
    let body_rtf = read_rtf_body(&mut props, root)?;

    let recipients = read_recipients(&mut props)?;
    let attachments = read_attachments(&mut props)?;

    Ok(Message {
        subject,
        sender_name,
        sender_email,
        display_to,
        display_cc,
        date,
        transport_headers,
        body_text,
        body_html,
        body_rtf,
        recipients,
        attachments,
    })
}

/// The HTML body is written as a binary property by current Outlook
/// versions and as a string property by some converters. Try both;
/// the bytes decode as UTF-8 in practice.
fn read_html_body<F: Read + Seek>(
    props: &mut PropReader<F>,
    root: &Path,
) -> Result<Option<String>> {
    if let Some(bytes) = props.binary(root, tags::BODY_HTML)? {
        let html = String::from_utf8_lossy(&bytes).into_owned();
        return Ok(non_empty(Some(html)));
    }
    Ok(non_empty(props.string(root, tags::BODY_HTML)?))
}

/// Decompress the RTF body if one exists. A corrupt RTF stream does
/// not fail the load: the body is a last-resort text source.
fn read_rtf_body<F: Read + Seek>(
    props: &mut PropReader<F>,
    root: &Path,
) -> Result<Option<String>> {
    let Some(compressed) = props.binary(root, tags::BODY_RTF_COMPRESSED)? else {
        return Ok(None);
    };
    match decompress_rtf(&compressed) {
        Ok(rtf) => Ok(non_empty(Some(rtf))),
        Err(e) => {
            warn!(error = %e, "RTF decompression failed; ignoring RTF body");
            Ok(None)
        }
    }
}

fn read_recipients<F: Read + Seek>(props: &mut PropReader<F>) -> Result<Vec<Recipient>> {
    let mut recipients = Vec::new();
    for dir in props.storages_with_prefix(RECIP_STORAGE_PREFIX)? {
        let name = non_empty(props.string(&dir, tags::DISPLAY_NAME)?);
        let email = match non_empty(props.string(&dir, tags::SMTP_ADDRESS)?) {
            Some(addr) => Some(addr),
            None => non_empty(props.string(&dir, tags::EMAIL_ADDRESS)?),
        };
        let kind = props
            .fixed(&dir, PROPERTIES_HEADER_SUB)?
            .and_then(|fixed| fixed.get_u32(tags::RECIPIENT_TYPE))
            .map(RecipientKind::from_property)
            .unwrap_or(RecipientKind::To);
        recipients.push(Recipient { kind, name, email });
    }
    Ok(recipients)
}

fn read_attachments<F: Read + Seek>(props: &mut PropReader<F>) -> Result<Vec<Attachment>> {
    let mut attachments = Vec::new();
    for dir in props.storages_with_prefix(ATTACH_STORAGE_PREFIX)? {
        let name = read_attachment_name(props, &dir)?;
        let mime_type = non_empty(props.string(&dir, tags::ATTACH_MIME_TAG)?);
        let method = props
            .fixed(&dir, PROPERTIES_HEADER_SUB)?
            .and_then(|fixed| fixed.get_u32(tags::ATTACH_METHOD));

        // Embedded messages keep their payload as a sub-storage, not a
        // stream. Listed by name only.
        let is_embedded_message = method == Some(ATTACH_METHOD_EMBEDDED)
            || props.is_storage_property(&dir, tags::ATTACH_DATA);
        if is_embedded_message {
            debug!(name = name.as_deref().unwrap_or("?"), "Skipping embedded message attachment");
            attachments.push(Attachment {
                name,
                data: Vec::new(),
                content_id: None,
                mime_type,
                is_embedded_message: true,
            });
            continue;
        }

        let data = props.binary(&dir, tags::ATTACH_DATA)?.unwrap_or_default();
        let content_id = non_empty(props.string(&dir, tags::ATTACH_CONTENT_ID)?)
            .map(|raw| trim_content_id(&raw).to_string());
        attachments.push(Attachment {
            name,
            data,
            content_id,
            mime_type,
            is_embedded_message: false,
        });
    }
    Ok(attachments)
}

/// Attachment filename preference: long filename, then display name,
/// then the 8.3 short name.
fn read_attachment_name<F: Read + Seek>(
    props: &mut PropReader<F>,
    dir: &Path,
) -> Result<Option<String>> {
    for id in [
        tags::ATTACH_FILENAME_LONG,
        tags::DISPLAY_NAME,
        tags::ATTACH_FILENAME_SHORT,
    ] {
        if let Some(name) = non_empty(props.string(dir, id)?) {
            return Ok(Some(name));
        }
    }
    Ok(None)
}

/// Extract the message date from the transport headers' `Date:` line.
fn date_from_headers(headers: &str) -> Option<DateTime<FixedOffset>> {
    let value = headers.lines().find_map(|line| {
        let (field, value) = line.split_once(':')?;
        field.trim().eq_ignore_ascii_case("date").then_some(value)
    })?;
    DateTime::parse_from_rfc2822(value.trim()).ok()
}

/// Content-IDs are recorded with surrounding angle brackets more often
/// than not; HTML `cid:` tokens reference them without.
fn trim_content_id(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .trim()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_headers() {
        let headers = "Received: from relay\r\nDate: Tue, 1 Jul 2003 10:52:37 +0200\r\nSubject: x\r\n";
        let date = date_from_headers(headers).unwrap();
        assert_eq!(date.to_rfc2822(), "Tue, 1 Jul 2003 10:52:37 +0200");
    }

    #[test]
    fn test_date_from_headers_case_insensitive() {
        let headers = "date: Tue, 1 Jul 2003 10:52:37 +0200\r\n";
        assert!(date_from_headers(headers).is_some());
    }

    #[test]
    fn test_date_from_headers_missing_or_bad() {
        assert!(date_from_headers("Subject: hi\r\n").is_none());
        assert!(date_from_headers("Date: not a date\r\n").is_none());
    }

    #[test]
    fn test_trim_content_id() {
        assert_eq!(trim_content_id("<image001.png@01D6>"), "image001.png@01D6");
        assert_eq!(trim_content_id("image001.png@01D6"), "image001.png@01D6");
        assert_eq!(trim_content_id(" <cid123> "), "cid123");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("x".into())), Some("x".to_string()));
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_missing_file() {
        let err = parse_msg("/nonexistent/mail.msg").unwrap_err();
        assert!(matches!(err, MsgError::FileNotFound(_)));
    }
}
