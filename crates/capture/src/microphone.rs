use std::io::Cursor;
use std::mem;
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::clip::EncodedAudioClip;
use crate::error::CaptureError;
use crate::recorder::{CaptureId, Recorder, RecordingHandle};

struct FinishedCapture {
    handle: RecordingHandle,
    samples: Vec<f32>,
    sample_rate: u32,
}

/// Recorder backed by the host's default input device.
///
/// The device is claimed on `start` and released when the stream is dropped,
/// which happens on `stop` and on drop of the recorder itself. Buffered
/// samples are downmixed to mono and encoded as 16-bit WAV on demand.
pub struct MicrophoneRecorder {
    stream: Option<Stream>,
    buffer: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
    active: Option<RecordingHandle>,
    finished: Option<FinishedCapture>,
    next_id: u64,
}

impl MicrophoneRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stream: None,
            buffer: Arc::new(Mutex::new(Vec::new())),
            sample_rate: 0,
            active: None,
            finished: None,
            next_id: 1,
        }
    }

    /// Sample rate of the last opened stream, zero before the first start.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Default for MicrophoneRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder for MicrophoneRecorder {
    fn start(&mut self) -> Result<RecordingHandle, CaptureError> {
        if self.active.is_some() {
            return Err(CaptureError::CaptureInProgress);
        }

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| CaptureError::DeviceUnavailable("no input device available".into()))?;

        debug!(
            device = %device.name().unwrap_or_else(|_| "unknown".to_string()),
            "claiming input device"
        );

        let config: StreamConfig = device
            .default_input_config()
            .map_err(|e| CaptureError::DeviceUnavailable(format!("no input config: {e}")))?
            .into();

        let channels = config.channels as usize;
        self.sample_rate = config.sample_rate.0;
        self.buffer.lock().clear();

        let buffer = Arc::clone(&self.buffer);
        let err_fn = |err| {
            error!("input stream error: {err}");
        };

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let mut buffer = buffer.lock();
                    if channels == 1 {
                        buffer.extend_from_slice(data);
                    } else {
                        // Average the frame's channels down to mono.
                        buffer.extend(
                            data.chunks(channels)
                                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
                        );
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| CaptureError::Backend(format!("failed to build input stream: {e}")))?;

        stream
            .play()
            .map_err(|e| CaptureError::Backend(format!("failed to start input stream: {e}")))?;

        let handle = RecordingHandle::new(CaptureId::new(self.next_id));
        self.next_id += 1;
        self.stream = Some(stream);
        self.active = Some(handle);

        debug!(capture = %handle.id(), "capture started");
        Ok(handle)
    }

    fn stop(&mut self, handle: RecordingHandle) {
        if self.active != Some(handle) {
            debug!(capture = %handle.id(), "stop on inactive capture, ignoring");
            return;
        }

        // Dropping the stream releases the device claim.
        self.stream = None;
        self.active = None;

        let samples = mem::take(&mut *self.buffer.lock());
        debug!(capture = %handle.id(), samples = samples.len(), "capture stopped");
        self.finished = Some(FinishedCapture {
            handle,
            samples,
            sample_rate: self.sample_rate,
        });
    }

    fn clip(&mut self, handle: RecordingHandle) -> Option<EncodedAudioClip> {
        let finished = self.finished.as_ref()?;
        if finished.handle != handle || finished.samples.is_empty() {
            return None;
        }
        match encode_wav(&finished.samples, finished.sample_rate) {
            Ok(bytes) => Some(EncodedAudioClip::new(bytes, finished.sample_rate)),
            Err(e) => {
                error!("failed to encode capture: {e}");
                None
            }
        }
    }

    fn is_recording(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for MicrophoneRecorder {
    fn drop(&mut self) {
        if self.active.take().is_some() {
            warn!("recorder dropped mid-capture, releasing input device");
            self.stream = None;
        }
    }
}

fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer.write_sample(value)?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}
