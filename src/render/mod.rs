//! Body rendering: inline-image resolution and body-source selection.

pub mod html;

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::i18n;
use crate::model::attachment::Attachment;
use crate::model::message::Message;
use crate::scratch::ScratchDir;

pub use html::html_to_text;

/// Rewrite `cid:` references in an HTML body to `file:///` URLs.
///
/// For every attachment whose content-id is actually referenced, the
/// bytes are written into `scratch` and each `cid:<id>` occurrence is
/// replaced with the file's URL. Unreferenced attachments are not
/// materialized.
pub fn resolve_cids(
    body: &str,
    attachments: &[Attachment],
    scratch: &mut ScratchDir,
) -> Result<String> {
    let mut resolved = body.to_string();
    for (index, attachment) in attachments.iter().enumerate() {
        let Some(cid) = attachment.content_id.as_deref() else {
            continue;
        };
        let token = format!("cid:{cid}");
        if !resolved.contains(&token) {
            continue;
        }
        let path = scratch.write_file(&attachment.display_name(index), &attachment.data)?;
        let url = file_url(&path);
        debug!(cid = cid, url = %url, "Resolved inline image");
        resolved = resolved.replace(&token, &url);
    }
    Ok(resolved)
}

/// Produce the text shown in the body view.
///
/// Preference order: HTML (with inline images resolved and the markup
/// converted to text), then the plain-text body, then the decompressed
/// RTF body, then a localized placeholder.
pub fn render_body(message: &Message, scratch: &mut ScratchDir) -> Result<String> {
    if let Some(body) = message.body_html.as_deref() {
        let resolved = resolve_cids(body, &message.attachments, scratch)?;
        let text = html::html_to_text(&resolved);
        if !text.trim().is_empty() {
            return Ok(text);
        }
    }
    if let Some(text) = message.body_text.as_deref() {
        return Ok(text.to_string());
    }
    if let Some(rtf) = message.body_rtf.as_deref() {
        return Ok(rtf.to_string());
    }
    Ok(i18n::fallback_body().to_string())
}

/// Build a `file:///` URL from a local path, with separators
/// normalized to forward slashes.
fn file_url(path: &Path) -> String {
    let printable = path.display().to_string().replace('\\', "/");
    format!("file:///{}", printable.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attachment::Attachment;

    fn inline_attachment(name: &str, cid: &str, data: &[u8]) -> Attachment {
        Attachment {
            name: Some(name.to_string()),
            data: data.to_vec(),
            content_id: Some(cid.to_string()),
            mime_type: None,
            is_embedded_message: false,
        }
    }

    #[test]
    fn test_resolve_cids_rewrites_and_writes_file() {
        let mut scratch = ScratchDir::new().unwrap();
        let attachments = vec![inline_attachment("logo.png", "logo@1", b"PNG")];
        let html = r#"<img src="cid:logo@1">"#;
        let resolved = resolve_cids(html, &attachments, &mut scratch).unwrap();

        assert!(!resolved.contains("cid:logo@1"));
        assert!(resolved.contains("file:///"));
        assert!(!resolved.contains('\\'));
        assert_eq!(scratch.files().len(), 1);
        assert_eq!(std::fs::read(&scratch.files()[0]).unwrap(), b"PNG");
    }

    #[test]
    fn test_resolve_cids_replaces_every_occurrence() {
        let mut scratch = ScratchDir::new().unwrap();
        let attachments = vec![inline_attachment("logo.png", "logo", b"PNG")];
        let html = r#"<img src="cid:logo"> and again <img src="cid:logo">"#;
        let resolved = resolve_cids(html, &attachments, &mut scratch).unwrap();

        assert!(!resolved.contains("cid:logo"));
        // Both occurrences point at the same single scratch file
        assert_eq!(scratch.files().len(), 1);
    }

    #[test]
    fn test_resolve_cids_skips_unreferenced_attachment() {
        let mut scratch = ScratchDir::new().unwrap();
        let attachments = vec![inline_attachment("logo.png", "logo", b"PNG")];
        let resolved = resolve_cids("no references here", &attachments, &mut scratch).unwrap();

        assert_eq!(resolved, "no references here");
        assert!(scratch.files().is_empty());
    }

    #[test]
    fn test_render_body_prefers_html() {
        let mut scratch = ScratchDir::new().unwrap();
        let message = Message {
            body_html: Some("<p>rich</p>".to_string()),
            body_text: Some("plain".to_string()),
            ..Default::default()
        };
        assert_eq!(render_body(&message, &mut scratch).unwrap(), "rich");
    }

    #[test]
    fn test_render_body_falls_back_to_text() {
        let mut scratch = ScratchDir::new().unwrap();
        let message = Message {
            body_text: Some("plain".to_string()),
            ..Default::default()
        };
        assert_eq!(render_body(&message, &mut scratch).unwrap(), "plain");
    }

    #[test]
    fn test_render_body_markup_only_html_falls_back() {
        let mut scratch = ScratchDir::new().unwrap();
        let message = Message {
            body_html: Some("<style>a { }</style>".to_string()),
            body_text: Some("plain".to_string()),
            ..Default::default()
        };
        assert_eq!(render_body(&message, &mut scratch).unwrap(), "plain");
    }

    #[test]
    fn test_render_body_placeholder_when_empty() {
        let mut scratch = ScratchDir::new().unwrap();
        let message = Message::default();
        let body = render_body(&message, &mut scratch).unwrap();
        assert_eq!(body, i18n::fallback_body());
    }

    #[test]
    fn test_file_url_forward_slashes() {
        let url = file_url(Path::new("/tmp/msgshell-x/pic.png"));
        assert_eq!(url, "file:///tmp/msgshell-x/pic.png");
    }
}
