pub mod brief;
pub mod message;
