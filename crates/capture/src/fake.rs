use crate::clip::EncodedAudioClip;
use crate::error::CaptureError;
use crate::recorder::{CaptureId, Recorder, RecordingHandle};

/// Scripted recorder for tests: yields a canned clip without touching any
/// device. Counters expose lifecycle activity for teardown assertions.
#[derive(Debug, Clone)]
pub struct FakeRecorder {
    canned: Option<EncodedAudioClip>,
    deny_device: bool,
    active: Option<RecordingHandle>,
    finished: Option<RecordingHandle>,
    next_id: u64,
    starts: u64,
    stops: u64,
}

impl FakeRecorder {
    /// A recorder that produces the given clip for every capture.
    #[must_use]
    pub fn with_clip(clip: EncodedAudioClip) -> Self {
        Self {
            canned: Some(clip),
            deny_device: false,
            active: None,
            finished: None,
            next_id: 1,
            starts: 0,
            stops: 0,
        }
    }

    /// A recorder whose captures never produce data.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            canned: None,
            ..Self::with_clip(EncodedAudioClip::new(Vec::new(), 0))
        }
    }

    /// A recorder that refuses to start, as if the microphone were denied.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            deny_device: true,
            ..Self::silent()
        }
    }

    #[must_use]
    pub fn starts(&self) -> u64 {
        self.starts
    }

    #[must_use]
    pub fn stops(&self) -> u64 {
        self.stops
    }
}

impl Recorder for FakeRecorder {
    fn start(&mut self) -> Result<RecordingHandle, CaptureError> {
        if self.deny_device {
            return Err(CaptureError::DeviceUnavailable(
                "microphone access denied".into(),
            ));
        }
        if self.active.is_some() {
            return Err(CaptureError::CaptureInProgress);
        }

        let handle = RecordingHandle::new(CaptureId::new(self.next_id));
        self.next_id += 1;
        self.active = Some(handle);
        self.starts += 1;
        Ok(handle)
    }

    fn stop(&mut self, handle: RecordingHandle) {
        if self.active != Some(handle) {
            return;
        }
        self.active = None;
        self.finished = Some(handle);
        self.stops += 1;
    }

    fn clip(&mut self, handle: RecordingHandle) -> Option<EncodedAudioClip> {
        if self.finished != Some(handle) {
            return None;
        }
        self.canned.clone()
    }

    fn is_recording(&self) -> bool {
        self.active.is_some()
    }
}
