//! Microphone capture capability for voice activities.
//!
//! The `Recorder` trait is the seam: services take it as an injected
//! capability, `MicrophoneRecorder` binds it to the host input device via
//! cpal, and `FakeRecorder` substitutes canned clips in tests. The device
//! claim is scoped: it is released on stop and on drop, on every exit path.

#![forbid(unsafe_code)]

pub mod clip;
pub mod error;
pub mod fake;
pub mod microphone;
pub mod recorder;

pub use clip::EncodedAudioClip;
pub use error::CaptureError;
pub use fake::FakeRecorder;
pub use microphone::MicrophoneRecorder;
pub use recorder::{CaptureId, Recorder, RecordingHandle};
