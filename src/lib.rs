//! `msgShell`, a terminal viewer for Microsoft Outlook `.msg` files.
//!
//! This crate provides the core library for parsing MSG compound
//! documents, rendering message bodies with inline images resolved
//! to temporary files, and saving attachments to disk.

pub mod config;
pub mod error;
pub mod export;
pub mod i18n;
pub mod model;
pub mod parser;
pub mod render;
pub mod scratch;
pub mod tui;
