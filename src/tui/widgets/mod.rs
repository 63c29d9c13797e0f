//! TUI widgets for rendering different UI panels.

pub mod attachment_list;
pub mod body_view;
pub mod header_bar;
pub mod help_popup;
pub mod message_dialog;
pub mod metadata;
pub mod path_prompt;
pub mod preview;
pub mod status_bar;
