use std::fmt;

use crate::clip::EncodedAudioClip;
use crate::error::CaptureError;

/// Unique identifier for one capture within a recorder's lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaptureId(u64);

impl CaptureId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CaptureId({})", self.0)
    }
}

impl fmt::Display for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to an in-progress or finished capture.
///
/// Obtained from `Recorder::start` and handed back to `stop`/`clip`; a
/// handle from a previous capture is simply ignored by `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingHandle {
    id: CaptureId,
}

impl RecordingHandle {
    #[must_use]
    pub(crate) fn new(id: CaptureId) -> Self {
        Self { id }
    }

    #[must_use]
    pub fn id(&self) -> CaptureId {
        self.id
    }
}

/// Capability surface for audio capture.
///
/// One capture may be active per recorder at a time. Implementations must
/// release the underlying device on `stop` and on drop, even when the
/// caller never stops explicitly.
pub trait Recorder {
    /// Claim the input device and begin buffering audio.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::DeviceUnavailable` when the host has no input
    /// device or refuses access, and `CaptureError::CaptureInProgress` when
    /// a capture is already active.
    fn start(&mut self) -> Result<RecordingHandle, CaptureError>;

    /// Finalize the buffered audio for the given handle and release the
    /// device. Idempotent: stopping an already-stopped or unknown handle is
    /// a no-op.
    fn stop(&mut self, handle: RecordingHandle);

    /// The encoded clip for a finished capture, or `None` when the capture
    /// never produced data.
    fn clip(&mut self, handle: RecordingHandle) -> Option<EncodedAudioClip>;

    /// True while a capture is active.
    fn is_recording(&self) -> bool;
}
