//! Low-level access to MAPI properties inside the compound document.
//!
//! Variable-length properties live in streams named
//! `__substg1.0_XXXXTTTT` (`XXXX` = property id, `TTTT` = type code).
//! Fixed-size properties are packed into a `__properties_version1.0`
//! stream as 16-byte little-endian entries after a header whose length
//! depends on the storage level.

use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, LittleEndian};
use cfb::CompoundFile;
use encoding_rs::WINDOWS_1252;

use crate::error::Result;

/// Property type codes used by this reader.
pub mod types {
    /// UTF-16LE string.
    pub const UNICODE: u16 = 0x001F;
    /// 8-bit string in the message's ANSI code page.
    pub const STRING8: u16 = 0x001E;
    /// Raw bytes.
    pub const BINARY: u16 = 0x0102;
    /// Sub-storage (embedded object).
    pub const OBJECT: u16 = 0x000D;
    /// 32-bit integer (fixed-size, lives in the properties stream).
    pub const LONG: u16 = 0x0003;
}

/// Property ids used by this reader.
pub mod tags {
    pub const SUBJECT: u16 = 0x0037;
    pub const TRANSPORT_HEADERS: u16 = 0x007D;
    pub const SENDER_NAME: u16 = 0x0C1A;
    pub const SENDER_EMAIL: u16 = 0x0C1F;
    pub const SENDER_SMTP: u16 = 0x5D01;
    pub const DISPLAY_BCC: u16 = 0x0E02;
    pub const DISPLAY_CC: u16 = 0x0E03;
    pub const DISPLAY_TO: u16 = 0x0E04;
    pub const BODY_TEXT: u16 = 0x1000;
    pub const BODY_RTF_COMPRESSED: u16 = 0x1009;
    pub const BODY_HTML: u16 = 0x1013;
    pub const DISPLAY_NAME: u16 = 0x3001;
    pub const EMAIL_ADDRESS: u16 = 0x3003;
    pub const RECIPIENT_TYPE: u16 = 0x0C15;
    pub const SMTP_ADDRESS: u16 = 0x39FE;
    pub const ATTACH_DATA: u16 = 0x3701;
    pub const ATTACH_FILENAME_SHORT: u16 = 0x3704;
    pub const ATTACH_METHOD: u16 = 0x3705;
    pub const ATTACH_FILENAME_LONG: u16 = 0x3707;
    pub const ATTACH_MIME_TAG: u16 = 0x370E;
    pub const ATTACH_CONTENT_ID: u16 = 0x3712;
}

/// `PidTagAttachMethod` value for an embedded message.
pub const ATTACH_METHOD_EMBEDDED: u32 = 5;

/// Header length of the properties stream inside a recipient or
/// attachment storage. The root stream uses a 32-byte header instead,
/// but nothing in it is read here.
pub const PROPERTIES_HEADER_SUB: usize = 8;

/// Stream name for a variable-length property.
pub fn stream_name(id: u16, ptype: u16) -> String {
    format!("__substg1.0_{id:04X}{ptype:04X}")
}

/// Decode a little-endian UTF-16 byte buffer, padding a trailing odd
/// byte with zero. Outlook writes these without a BOM.
fn utf16_units(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks(2)
        .map(|pair| u16::from_le_bytes([pair[0], *pair.get(1).unwrap_or(&0)]))
        .collect()
}

/// Decode the bytes of a string property stream. Unicode streams are
/// UTF-16LE; 8-bit streams are decoded as Windows-1252, which is what
/// ANSI-era files overwhelmingly carry. Trailing NULs are stripped.
pub fn decode_string(bytes: &[u8], ptype: u16) -> String {
    let decoded = if ptype == types::UNICODE {
        String::from_utf16_lossy(&utf16_units(bytes))
    } else {
        let (cow, _, _) = WINDOWS_1252.decode(bytes);
        cow.into_owned()
    };
    decoded.trim_end_matches('\0').to_string()
}

/// Parsed fixed-size properties from a `__properties_version1.0` stream.
///
/// Only the 8-byte raw value is kept per id; callers interpret it
/// according to the property they ask for.
#[derive(Debug, Default)]
pub struct FixedProperties {
    entries: HashMap<u16, u64>,
}

impl FixedProperties {
    /// Parse the stream contents, skipping `header_len` bytes. Entries
    /// are 16 bytes: tag (u32), flags (u32), value (8 bytes). A
    /// truncated trailing entry is ignored.
    pub fn parse(buf: &[u8], header_len: usize) -> Self {
        let mut entries = HashMap::new();
        let mut offset = header_len;
        while offset + 16 <= buf.len() {
            let tag = LittleEndian::read_u32(&buf[offset..offset + 4]);
            let id = (tag >> 16) as u16;
            let value = LittleEndian::read_u64(&buf[offset + 8..offset + 16]);
            entries.insert(id, value);
            offset += 16;
        }
        Self { entries }
    }

    /// Fetch a 32-bit integer property.
    pub fn get_u32(&self, id: u16) -> Option<u32> {
        self.entries.get(&id).map(|&v| v as u32)
    }
}

/// Property reader over an open compound document.
///
/// All lookups are optional: a missing stream yields `Ok(None)`, since
/// nearly every property is absent from some real-world file. I/O
/// failures on streams that do exist are propagated.
pub struct PropReader<'a, F> {
    cfb: &'a mut CompoundFile<F>,
}

impl<'a, F: Read + Seek> PropReader<'a, F> {
    pub fn new(cfb: &'a mut CompoundFile<F>) -> Self {
        Self { cfb }
    }

    fn read_stream(&mut self, path: &Path) -> Result<Vec<u8>> {
        let mut stream = self.cfb.open_stream(path)?;
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Read a string property from `dir`, preferring the Unicode
    /// variant and falling back to the 8-bit one.
    pub fn string(&mut self, dir: &Path, id: u16) -> Result<Option<String>> {
        for ptype in [types::UNICODE, types::STRING8] {
            let path = dir.join(stream_name(id, ptype));
            if self.cfb.is_stream(&path) {
                let bytes = self.read_stream(&path)?;
                return Ok(Some(decode_string(&bytes, ptype)));
            }
        }
        Ok(None)
    }

    /// Read a binary property from `dir`.
    pub fn binary(&mut self, dir: &Path, id: u16) -> Result<Option<Vec<u8>>> {
        let path = dir.join(stream_name(id, types::BINARY));
        if !self.cfb.is_stream(&path) {
            return Ok(None);
        }
        self.read_stream(&path).map(Some)
    }

    /// Read and parse the fixed-properties stream of `dir`.
    pub fn fixed(&mut self, dir: &Path, header_len: usize) -> Result<Option<FixedProperties>> {
        let path = dir.join("__properties_version1.0");
        if !self.cfb.is_stream(&path) {
            return Ok(None);
        }
        let buf = self.read_stream(&path)?;
        Ok(Some(FixedProperties::parse(&buf, header_len)))
    }

    /// Whether `dir` contains the given property as a sub-storage
    /// instead of a stream (embedded objects).
    pub fn is_storage_property(&self, dir: &Path, id: u16) -> bool {
        self.cfb
            .is_storage(dir.join(stream_name(id, types::OBJECT)))
    }

    /// Paths of root sub-storages whose name starts with `prefix`,
    /// sorted by name. Storage names embed a zero-padded hex index, so
    /// name order is creation order.
    pub fn storages_with_prefix(&mut self, prefix: &str) -> Result<Vec<PathBuf>> {
        let mut paths: Vec<PathBuf> = self
            .cfb
            .read_storage("/")?
            .filter(|entry| entry.is_storage() && entry.name().starts_with(prefix))
            .map(|entry| entry.path().to_owned())
            .collect();
        paths.sort();
        Ok(paths)
    }
}
