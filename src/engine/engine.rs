use chrono::Local;
use tracing::{info, warn};

use crate::engine::protocol::{BriefSource, Notify};
use crate::model::brief::TruncationLimits;
use crate::model::message::OutgoingMessage;

/// Outcome of one generate-and-notify pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub message: OutgoingMessage,
    pub delivered: bool,
}

pub struct Engine<G, N> {
    generator: G,
    notifier: N,
    limits: TruncationLimits,
}

impl<G: BriefSource, N: Notify> Engine<G, N> {
    pub fn new(generator: G, notifier: N, limits: TruncationLimits) -> Self {
        Self {
            generator,
            notifier,
            limits,
        }
    }

    /// Generate the brief and shape it into the message for the chat,
    /// without sending anything.
    pub fn compose(&self) -> OutgoingMessage {
        info!(
            "UK Economics Daily Brief - {}",
            Local::now().format("%Y-%m-%d %H:%M")
        );

        match self.generator.generate() {
            Some(brief) => {
                let original_len = brief.char_len();
                let brief = brief.truncated(&self.limits);
                if brief.char_len() != original_len {
                    warn!(
                        original = original_len,
                        sent = brief.char_len(),
                        "brief truncated"
                    );
                }
                OutgoingMessage::Brief(brief)
            }
            None => OutgoingMessage::GenerationFailed,
        }
    }

    pub fn run(&self) -> RunReport {
        let message = self.compose();
        let delivered = self.notifier.notify(message.text());
        RunReport { message, delivered }
    }
}
