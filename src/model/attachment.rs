//! Message attachments.
//!
//! Unlike streaming mail formats, a MSG attachment's bytes sit in a
//! single stream that is read in full when the message is parsed, so
//! the content is owned here rather than re-read on demand.

/// Extensions the attachment panel will try to preview inline.
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// One attachment extracted from a message.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Filename as recorded in the file, if any. Use
    /// [`display_name`](Self::display_name) for UI labels.
    pub name: Option<String>,

    /// Raw content bytes. Saved verbatim on export.
    pub data: Vec<u8>,

    /// Content-ID referenced by `cid:` tokens in the HTML body.
    /// Stored without the surrounding angle brackets.
    pub content_id: Option<String>,

    /// MIME content type (e.g. `"image/png"`), when recorded.
    pub mime_type: Option<String>,

    /// `true` when the attachment is itself an embedded `.msg` message.
    /// These entries carry no bytes and are listed by name only.
    pub is_embedded_message: bool,
}

impl Attachment {
    /// Content size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Label for UI rows and default export filenames. Nameless
    /// attachments get a generated `attachment_<n>.bin` using their
    /// 1-based position.
    pub fn display_name(&self, index: usize) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("attachment_{}.bin", index + 1),
        }
    }

    /// Whether the filename extension is one the viewer previews
    /// (png/jpg/jpeg/gif/bmp, case-insensitive).
    pub fn is_image(&self) -> bool {
        let Some(name) = self.name.as_deref() else {
            return false;
        };
        let Some((_, ext)) = name.rsplit_once('.') else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        IMAGE_EXTENSIONS.contains(&ext.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Attachment {
        Attachment {
            name: Some(name.to_string()),
            data: vec![1, 2, 3],
            content_id: None,
            mime_type: None,
            is_embedded_message: false,
        }
    }

    #[test]
    fn test_is_image_known_extensions() {
        for name in [
            "photo.png",
            "photo.jpg",
            "photo.jpeg",
            "photo.gif",
            "photo.bmp",
        ] {
            assert!(named(name).is_image(), "{name} should preview");
        }
    }

    #[test]
    fn test_is_image_case_insensitive() {
        assert!(named("IMAGE001.PNG").is_image());
        assert!(named("Photo.JpG").is_image());
    }

    #[test]
    fn test_is_image_rejects_other_extensions() {
        assert!(!named("report.pdf").is_image());
        assert!(!named("archive.tar.gz").is_image());
        assert!(!named("noextension").is_image());
    }

    #[test]
    fn test_is_image_without_name() {
        let a = Attachment {
            name: None,
            data: vec![],
            content_id: None,
            mime_type: Some("image/png".to_string()),
            is_embedded_message: false,
        };
        assert!(!a.is_image());
    }

    #[test]
    fn test_display_name_fallback() {
        let a = Attachment {
            name: None,
            data: vec![],
            content_id: None,
            mime_type: None,
            is_embedded_message: false,
        };
        assert_eq!(a.display_name(0), "attachment_1.bin");
        assert_eq!(a.display_name(4), "attachment_5.bin");
    }

    #[test]
    fn test_display_name_empty_string_falls_back() {
        let mut a = named("x");
        a.name = Some(String::new());
        assert_eq!(a.display_name(2), "attachment_3.bin");
    }

    #[test]
    fn test_size() {
        assert_eq!(named("a.bin").size(), 3);
    }
}
