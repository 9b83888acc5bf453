use review_core::Effect;
use serde::Serialize;

use crate::BridgeError;

/// Outbound request as it travels to the engine or the host store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "message",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum OutboundMessage {
    Execute {
        mode: String,
    },
    Edit {
        bookmark_id: String,
        title: String,
        url: String,
        mode: String,
    },
    Remove {
        bookmark_id: String,
    },
    RepairRedirect {
        bookmark_id: String,
        new_url: String,
    },
}

impl From<&Effect> for OutboundMessage {
    fn from(effect: &Effect) -> Self {
        match effect {
            Effect::Execute { mode } => OutboundMessage::Execute { mode: mode.clone() },
            Effect::Edit {
                bookmark_id,
                title,
                url,
                mode,
            } => OutboundMessage::Edit {
                bookmark_id: bookmark_id.to_string(),
                title: title.clone(),
                url: url.clone(),
                mode: mode.as_str().to_string(),
            },
            Effect::Remove { bookmark_id } => OutboundMessage::Remove {
                bookmark_id: bookmark_id.to_string(),
            },
            Effect::RepairRedirect {
                bookmark_id,
                new_url,
            } => OutboundMessage::RepairRedirect {
                bookmark_id: bookmark_id.to_string(),
                new_url: new_url.clone(),
            },
        }
    }
}

impl OutboundMessage {
    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Encode an effect as a single JSON line (without the trailing newline).
pub fn encode_outbound(effect: &Effect) -> Result<String, BridgeError> {
    OutboundMessage::from(effect).to_json()
}
