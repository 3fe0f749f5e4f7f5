// Application layer and CLI presentation of habitrack.
// The binary in main.rs only parses arguments and wires logging.

pub mod application;
pub mod presentation;
