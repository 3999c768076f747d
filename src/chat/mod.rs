// Claim assistant conversation turn: what the client sends with each chat
// message, and the prompt built from it.

pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::extraction::models::ExtractedClaim;

/// One chat request from the client. Wire names are camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    #[serde(default)]
    pub message: String,
    /// Whether the user's claim was approved
    #[serde(default = "default_eligibility")]
    pub eligibility: bool,
    /// The extraction result the client got back from /upload
    #[serde(default)]
    pub extracted: Option<ExtractedClaim>,
    /// Rejection reason, meaningful only when not eligible
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub is_initial_message: bool,
    /// Previous messages as one opaque transcript string
    #[serde(default)]
    pub conversation_history: String,
    #[serde(default = "default_message_count")]
    pub message_count: u32,
}

fn default_eligibility() -> bool {
    true
}

fn default_message_count() -> u32 {
    1
}

impl ConversationTurn {
    /// Name on the extracted bill, or "Unknown".
    pub fn user_name(&self) -> &str {
        self.extracted
            .as_ref()
            .and_then(|e| e.name.as_deref())
            .unwrap_or("Unknown")
    }

    /// Claimed amount as extracted, or "0".
    pub fn claim_amount(&self) -> &str {
        self.extracted
            .as_ref()
            .and_then(|e| e.amount.as_deref())
            .unwrap_or("0")
    }
}

/// The assistant's answer to one turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub language: crate::language::Language,
}
