/// A finished capture, encoded as a single WAV clip ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAudioClip {
    bytes: Vec<u8>,
    sample_rate: u32,
}

impl EncodedAudioClip {
    #[must_use]
    pub fn new(bytes: Vec<u8>, sample_rate: u32) -> Self {
        Self { bytes, sample_rate }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File name used when the clip is uploaded as a form part.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        "recording.wav"
    }

    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        "audio/wav"
    }
}
