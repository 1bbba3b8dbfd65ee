//! UUID-based block identifiers.
//!
//! Blocks are addressed by RFC 4122 UUIDs. The document model hands them
//! out either hyphenated or as bare hex, so both forms are accepted.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a block in a document's content tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub Uuid);

impl BlockId {
    /// The nil block id, used for blocks not yet acknowledged by the server.
    pub const NIL: BlockId = BlockId(Uuid::nil());

    /// Generates a new time-ordered block id (UUIDv7).
    pub fn new() -> Self {
        BlockId(Uuid::now_v7())
    }

    /// Generates a new random block id (UUIDv4).
    pub fn new_random() -> Self {
        BlockId(Uuid::new_v4())
    }

    /// Returns the DOM element id the block view is rendered under.
    pub fn dom_id(&self) -> String {
        format!("block-{}", format_block_id(self))
    }
}

impl Default for BlockId {
    fn default() -> Self {
        BlockId::NIL
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Formats a block id as non-hyphenated lowercase hex.
pub fn format_block_id(id: &BlockId) -> String {
    id.0.simple().to_string()
}

/// Parses a block id from hex (with or without hyphens).
pub fn parse_block_id(s: &str) -> Option<BlockId> {
    let hex: String = s.chars().filter(|c| *c != '-').collect();
    if hex.len() != 32 {
        return None;
    }
    Uuid::try_parse(&hex).ok().map(BlockId)
}
