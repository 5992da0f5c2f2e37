use crate::model::brief::Brief;

pub const GENERATION_FAILED_TEXT: &str = "ERROR GENERATING INSIGHTS";

/// What the driver hands to the notifier for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingMessage {
    Brief(Brief),
    GenerationFailed,
}

impl OutgoingMessage {
    pub fn text(&self) -> &str {
        match self {
            OutgoingMessage::Brief(brief) => brief.as_str(),
            OutgoingMessage::GenerationFailed => GENERATION_FAILED_TEXT,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, OutgoingMessage::GenerationFailed)
    }
}
