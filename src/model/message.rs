//! The message type: everything parsed out of one `.msg` file.

use chrono::{DateTime, FixedOffset};

use super::attachment::Attachment;
use super::recipient::{Recipient, RecipientKind};

/// A fully parsed message.
///
/// Exactly one `Message` is live in the viewer at a time: loading a new
/// file drops the previous value (and, with it, the owned attachment
/// bytes) before the replacement is installed.
#[derive(Debug, Clone, Default)]
pub struct Message {
    /// Decoded subject, if present.
    pub subject: Option<String>,

    /// Sender display name (`PidTagSenderName`).
    pub sender_name: Option<String>,

    /// Sender address (`PidTagSenderEmailAddress`, with the SMTP
    /// variant as fallback).
    pub sender_email: Option<String>,

    /// Preformatted To line (`PidTagDisplayTo`), when the file has one.
    pub display_to: Option<String>,

    /// Preformatted Cc line (`PidTagDisplayCc`), when the file has one.
    pub display_cc: Option<String>,

    /// Message date, parsed from the transport headers' `Date:` line.
    pub date: Option<DateTime<FixedOffset>>,

    /// Raw transport headers (`PidTagTransportMessageHeaders`).
    pub transport_headers: Option<String>,

    /// Plain-text body.
    pub body_text: Option<String>,

    /// HTML body, decoded to a string.
    pub body_html: Option<String>,

    /// Decompressed RTF body, kept as a last-resort text source.
    pub body_rtf: Option<String>,

    /// Parsed recipient entries, in storage order.
    pub recipients: Vec<Recipient>,

    /// Attachments, in storage order.
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Sender formatted for display: `"Name <email>"` or whichever half
    /// the file carries. `None` when both are absent.
    pub fn sender_display(&self) -> Option<String> {
        match (self.sender_name.as_deref(), self.sender_email.as_deref()) {
            (Some(name), Some(email)) if name != email => {
                Some(format!("{name} <{email}>"))
            }
            (Some(name), _) => Some(name.to_string()),
            (None, Some(email)) => Some(email.to_string()),
            (None, None) => None,
        }
    }

    /// To line for display: the preformatted `PidTagDisplayTo` when
    /// present, otherwise assembled from the To recipient entries.
    pub fn recipients_display(&self) -> Option<String> {
        self.display_line(self.display_to.as_deref(), RecipientKind::To)
    }

    /// Cc line for display, same preference order as
    /// [`recipients_display`](Self::recipients_display).
    pub fn cc_display(&self) -> Option<String> {
        self.display_line(self.display_cc.as_deref(), RecipientKind::Cc)
    }

    fn display_line(&self, preformatted: Option<&str>, kind: RecipientKind) -> Option<String> {
        if let Some(line) = preformatted {
            let line = line.trim();
            if !line.is_empty() {
                return Some(line.to_string());
            }
        }
        let joined = self
            .recipients
            .iter()
            .filter(|r| r.kind == kind)
            .map(Recipient::display)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    /// Whether the message carries any attachments.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}
