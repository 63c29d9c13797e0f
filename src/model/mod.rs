//! Core data model types for messages, recipients, and attachments.

pub mod attachment;
pub mod message;
pub mod recipient;
