//! Message recipients.
//!
//! MSG files store recipients as separate sub-storages, one per entry,
//! with name, address and type carried in individual properties. There
//! is no RFC 5322 header line to parse.

/// Recipient class, from the `PidTagRecipientType` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientKind {
    To,
    Cc,
    Bcc,
}

impl RecipientKind {
    /// Map the on-disk property value. Unknown values are treated as `To`,
    /// which is what mail clients do with malformed entries.
    pub fn from_property(value: u32) -> Self {
        match value {
            2 => Self::Cc,
            3 => Self::Bcc,
            _ => Self::To,
        }
    }
}

/// One parsed recipient entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Recipient {
    /// Recipient class (To / Cc / Bcc).
    pub kind: RecipientKind,
    /// Display name, if the entry carries one.
    pub name: Option<String>,
    /// SMTP address, if the entry carries one.
    pub email: Option<String>,
}

impl Recipient {
    /// Format for display: `"Display Name <address>"`, or whichever half
    /// exists. Empty string when the entry carries neither.
    pub fn display(&self) -> String {
        match (self.name.as_deref(), self.email.as_deref()) {
            (Some(name), Some(email)) if name != email => {
                format!("{name} <{email}>")
            }
            (Some(name), _) => name.to_string(),
            (None, Some(email)) => email.to_string(),
            (None, None) => String::new(),
        }
    }
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
