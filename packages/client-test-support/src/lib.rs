//! Client test support utilities
//!
//! Unified logging initialization and a scripted in-process coordinator
//! for driving the client over a real WebSocket.

pub mod coordinator;
pub mod logging;
