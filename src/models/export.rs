//! Chat export envelope
//!
//! Chat history dumps wrap the message list in an object together with
//! channel metadata. Only the messages are kept.

use super::types::RawMessage;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// `{"messages": [...]}` envelope of a chat history dump
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatExport {
    /// Channel or group name, if present
    #[serde(default)]
    pub name: Option<String>,
    /// Messages in arrival order
    #[serde(default)]
    pub messages: Vec<RawMessage>,
}

/// Parse the messages out of a chat export document
pub fn parse_export(json: &str) -> Result<Vec<RawMessage>> {
    let export: ChatExport = serde_json::from_str(json)?;
    Ok(export.messages)
}
