//! Shared fixture builder: assembles synthetic `.msg` compound
//! documents in memory, so the test suite ships no binary fixtures.

#![allow(dead_code)] // not every test binary uses every helper

use std::io::{Cursor, Write};
use std::path::Path;

use cfb::CompoundFile;

pub const RECIPIENT_TO: u32 = 1;
pub const RECIPIENT_CC: u32 = 2;
pub const RECIPIENT_BCC: u32 = 3;

/// Encode a string the way Outlook stores Unicode properties.
pub fn utf16le(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// One 16-byte entry of a `__properties_version1.0` stream: tag,
/// zeroed flags, little-endian value.
fn fixed_entry(id: u16, ptype: u16, value: u64) -> [u8; 16] {
    let tag = (u32::from(id) << 16) | u32::from(ptype);
    let mut entry = [0u8; 16];
    entry[..4].copy_from_slice(&tag.to_le_bytes());
    entry[8..].copy_from_slice(&value.to_le_bytes());
    entry
}

/// Builds a `.msg` document property by property.
///
/// Storage names and stream layout follow what Outlook writes:
/// `__substg1.0_XXXXTTTT` streams for variable-length properties and
/// an eight-byte-header `__properties_version1.0` stream for the
/// fixed-size ones inside recipient and attachment storages.
pub struct MsgBuilder {
    comp: CompoundFile<Cursor<Vec<u8>>>,
    recipients: u32,
    attachments: u32,
}

impl MsgBuilder {
    pub fn new() -> Self {
        let comp =
            CompoundFile::create(Cursor::new(Vec::new())).expect("in-memory compound file");
        Self {
            comp,
            recipients: 0,
            attachments: 0,
        }
    }

    /// Write a UTF-16LE string property at the message root.
    pub fn unicode(mut self, id: u16, value: &str) -> Self {
        let name = format!("/__substg1.0_{id:04X}001F");
        self.write_stream(&name, &utf16le(value));
        self
    }

    /// Write an 8-bit (Windows-1252) string property at the message root.
    pub fn string8(mut self, id: u16, bytes: &[u8]) -> Self {
        let name = format!("/__substg1.0_{id:04X}001E");
        self.write_stream(&name, bytes);
        self
    }

    /// Write a binary property at the message root.
    pub fn binary(mut self, id: u16, bytes: &[u8]) -> Self {
        let name = format!("/__substg1.0_{id:04X}0102");
        self.write_stream(&name, bytes);
        self
    }

    /// Add a recipient storage with display name, address, and type.
    pub fn recipient(mut self, kind: u32, name: Option<&str>, email: Option<&str>) -> Self {
        let dir = format!("/__recip_version1.0_#{:08X}", self.recipients);
        self.recipients += 1;
        self.comp.create_storage(&dir).expect("recipient storage");
        if let Some(name) = name {
            self.write_stream(&format!("{dir}/__substg1.0_3001001F"), &utf16le(name));
        }
        if let Some(email) = email {
            self.write_stream(&format!("{dir}/__substg1.0_3003001F"), &utf16le(email));
        }
        let mut props = vec![0u8; 8];
        props.extend_from_slice(&fixed_entry(0x0C15, 0x0003, u64::from(kind)));
        self.write_stream(&format!("{dir}/__properties_version1.0"), &props);
        self
    }

    /// Recipient carrying both the plain address property and the SMTP
    /// address property, as Exchange-sourced files do.
    pub fn recipient_with_smtp(mut self, kind: u32, name: &str, address: &str, smtp: &str) -> Self {
        let dir = format!("/__recip_version1.0_#{:08X}", self.recipients);
        self.recipients += 1;
        self.comp.create_storage(&dir).expect("recipient storage");
        self.write_stream(&format!("{dir}/__substg1.0_3001001F"), &utf16le(name));
        self.write_stream(&format!("{dir}/__substg1.0_3003001F"), &utf16le(address));
        self.write_stream(&format!("{dir}/__substg1.0_39FE001F"), &utf16le(smtp));
        let mut props = vec![0u8; 8];
        props.extend_from_slice(&fixed_entry(0x0C15, 0x0003, u64::from(kind)));
        self.write_stream(&format!("{dir}/__properties_version1.0"), &props);
        self
    }

    /// Add a by-value attachment with a long filename.
    pub fn attachment(self, long_name: Option<&str>, data: &[u8]) -> Self {
        self.attachment_full(long_name, data, None, None)
    }

    /// Add a by-value attachment with the full property set.
    pub fn attachment_full(
        mut self,
        long_name: Option<&str>,
        data: &[u8],
        content_id: Option<&str>,
        mime_type: Option<&str>,
    ) -> Self {
        let dir = self.next_attach_dir();
        self.comp.create_storage(&dir).expect("attachment storage");
        if let Some(name) = long_name {
            self.write_stream(&format!("{dir}/__substg1.0_3707001F"), &utf16le(name));
        }
        self.write_stream(&format!("{dir}/__substg1.0_37010102"), data);
        if let Some(cid) = content_id {
            self.write_stream(&format!("{dir}/__substg1.0_3712001F"), &utf16le(cid));
        }
        if let Some(mime) = mime_type {
            self.write_stream(&format!("{dir}/__substg1.0_370E001F"), &utf16le(mime));
        }
        let mut props = vec![0u8; 8];
        props.extend_from_slice(&fixed_entry(0x3705, 0x0003, 1));
        self.write_stream(&format!("{dir}/__properties_version1.0"), &props);
        self
    }

    /// Write an extra Unicode property into the most recently added
    /// attachment storage (short filenames, display names).
    pub fn attachment_unicode(mut self, id: u16, value: &str) -> Self {
        assert!(self.attachments > 0, "no attachment storage to write into");
        let dir = format!("/__attach_version1.0_#{:08X}", self.attachments - 1);
        self.write_stream(&format!("{dir}/__substg1.0_{id:04X}001F"), &utf16le(value));
        self
    }

    /// Add an embedded-message attachment: method 5, payload stored as
    /// a sub-storage rather than a stream.
    pub fn embedded_attachment(mut self, display_name: &str) -> Self {
        let dir = self.next_attach_dir();
        self.comp.create_storage(&dir).expect("attachment storage");
        self.write_stream(&format!("{dir}/__substg1.0_3001001F"), &utf16le(display_name));
        self.comp
            .create_storage(format!("{dir}/__substg1.0_3701000D"))
            .expect("embedded payload storage");
        let mut props = vec![0u8; 8];
        props.extend_from_slice(&fixed_entry(0x3705, 0x0003, 5));
        self.write_stream(&format!("{dir}/__properties_version1.0"), &props);
        self
    }

    fn next_attach_dir(&mut self) -> String {
        let dir = format!("/__attach_version1.0_#{:08X}", self.attachments);
        self.attachments += 1;
        dir
    }

    fn write_stream(&mut self, path: &str, bytes: &[u8]) {
        let mut stream = self.comp.create_stream(path).expect("create stream");
        stream.write_all(bytes).expect("write stream");
    }

    /// Finish the document and return its raw bytes.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.comp.flush().expect("flush compound file");
        self.comp.into_inner().into_inner()
    }

    /// Finish the document and write it to `path`.
    pub fn write_to(self, path: &Path) {
        let bytes = self.into_bytes();
        std::fs::write(path, bytes).expect("write fixture file");
    }
}
