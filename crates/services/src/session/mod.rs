mod board;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use board::MatchBoard;
pub use progress::SessionProgress;
pub use service::{ActivitySession, LoadToken, SessionPhase};
pub use workflow::ActivityLoopService;
