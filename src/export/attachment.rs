//! Save attachment bytes to user-chosen destinations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use crate::model::attachment::Attachment;
use crate::model::message::Message;

/// Write one attachment's bytes to an explicit destination path.
///
/// The destination was named by the user, so an existing file is
/// overwritten rather than renamed.
pub fn save_attachment(attachment: &Attachment, dest: &Path) -> anyhow::Result<()> {
    fs::write(dest, &attachment.data)
        .with_context(|| format!("writing '{}'", dest.display()))?;
    info!(
        path = %dest.display(),
        bytes = attachment.data.len(),
        "Saved attachment"
    );
    Ok(())
}

/// Write one attachment into a directory under its display name.
///
/// An existing file with that name is kept; the new file gets a
/// ` (n)` suffix before the extension instead.
pub fn save_attachment_to_dir(
    attachment: &Attachment,
    index: usize,
    dir: &Path,
) -> anyhow::Result<PathBuf> {
    let filename = sanitize_filename(&attachment.display_name(index), 150);
    let path = unique_path(&dir.join(filename));
    fs::write(&path, &attachment.data)
        .with_context(|| format!("writing '{}'", path.display()))?;
    Ok(path)
}

/// Save every attachment of `message` into `dir`, creating it if
/// needed. Embedded-message entries carry no bytes and are skipped;
/// per-file failures are logged and do not abort the rest.
pub fn save_all_attachments(message: &Message, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating '{}'", dir.display()))?;
    let mut paths = Vec::new();

    for (index, attachment) in message.attachments.iter().enumerate() {
        if attachment.is_embedded_message {
            warn!(
                name = %attachment.display_name(index),
                "Skipping embedded message attachment"
            );
            continue;
        }
        match save_attachment_to_dir(attachment, index, dir) {
            Ok(path) => paths.push(path),
            Err(e) => {
                warn!(
                    name = %attachment.display_name(index),
                    error = %e,
                    "Failed to save attachment"
                );
            }
        }
    }

    Ok(paths)
}

/// Replace characters that are unsafe in filenames and cap the length.
pub fn sanitize_filename(s: &str, max_len: usize) -> String {
    let sanitized: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | '@' | ' ' | '(' | ')') {
                c
            } else {
                '_'
            }
        })
        .take(max_len)
        .collect();

    if sanitized.trim().is_empty() {
        "attachment".to_string()
    } else {
        sanitized
    }
}

/// If `path` already exists, insert ` (n)` before the extension to
/// find a free name.
fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new("."));

    for i in 1..1000 {
        let candidate = if ext.is_empty() {
            parent.join(format!("{stem} ({i})"))
        } else {
            parent.join(format!("{stem} ({i}).{ext}"))
        };
        if !candidate.exists() {
            return candidate;
        }
    }

    // Practically unreachable
    if ext.is_empty() {
        parent.join(format!("{stem} (dup)"))
    } else {
        parent.join(format!("{stem} (dup).{ext}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: Option<&str>, data: &[u8]) -> Attachment {
        Attachment {
            name: name.map(str::to_string),
            data: data.to_vec(),
            content_id: None,
            mime_type: None,
            is_embedded_message: false,
        }
    }

    #[test]
    fn test_save_attachment_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.bin");
        let att = attachment(Some("report.pdf"), &[0x25, 0x50, 0x44, 0x46, 0x00, 0xFF]);

        save_attachment(&att, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), att.data);
    }

    #[test]
    fn test_save_attachment_overwrites_explicit_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.bin");
        fs::write(&dest, b"old").unwrap();

        save_attachment(&attachment(Some("a"), b"new"), &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn test_save_to_dir_renames_on_collision() {
        let dir = tempfile::tempdir().unwrap();
        let att = attachment(Some("photo.png"), b"one");

        let first = save_attachment_to_dir(&att, 0, dir.path()).unwrap();
        let second = save_attachment_to_dir(&att, 0, dir.path()).unwrap();

        assert_eq!(first.file_name().unwrap(), "photo.png");
        assert_eq!(second.file_name().unwrap(), "photo (1).png");
        assert_eq!(fs::read(&second).unwrap(), b"one");
    }

    #[test]
    fn test_save_all_skips_embedded_messages() {
        let dir = tempfile::tempdir().unwrap();
        let mut embedded = attachment(Some("inner.msg"), b"");
        embedded.is_embedded_message = true;
        let message = Message {
            attachments: vec![attachment(Some("a.txt"), b"a"), embedded],
            ..Default::default()
        };

        let saved = save_all_attachments(&message, dir.path()).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].file_name().unwrap(), "a.txt");
    }

    #[test]
    fn test_save_all_creates_directory_and_names_nameless() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out");
        let message = Message {
            attachments: vec![attachment(None, b"data")],
            ..Default::default()
        };

        let saved = save_all_attachments(&message, &target).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].file_name().unwrap(), "attachment_1.bin");
        assert_eq!(fs::read(&saved[0]).unwrap(), b"data");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("hello world.png", 50), "hello world.png");
        assert_eq!(sanitize_filename("a/b\\c.png", 50), "a_b_c.png");
        assert_eq!(sanitize_filename("", 50), "attachment");
    }
}
