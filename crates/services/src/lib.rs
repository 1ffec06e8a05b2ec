#![forbid(unsafe_code)]

pub mod client;
pub mod error;
pub mod session;

pub use telugu_core::Clock;

pub use client::{ChatPrompt, ContentApi, ContentClient, ContentConfig};
pub use error::{ClientError, SessionError};

pub use session::{
    ActivityLoopService, ActivitySession, LoadToken, MatchBoard, SessionPhase, SessionProgress,
};
