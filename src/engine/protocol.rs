use crate::model::brief::Brief;

/// Produces the brief for a run. Failures are absorbed and reported as
/// `None`; nothing propagates to the driver.
pub trait BriefSource {
    fn generate(&self) -> Option<Brief>;
}

/// Delivers a message to the chat destination. Returns whether delivery
/// succeeded; failures never propagate to the driver.
pub trait Notify {
    fn notify(&self, text: &str) -> bool;
}
