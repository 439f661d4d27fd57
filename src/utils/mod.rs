pub mod roster;
pub mod tracing;
pub mod upload;
