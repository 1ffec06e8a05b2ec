use std::env;

use url::Url;

use crate::error::ClientError;

/// Endpoints of the remote content service.
///
/// Every operation's path is enumerated explicitly so a deployment can remap
/// any endpoint without touching client code. Paths are joined onto
/// `base_url` at request time.
#[derive(Clone, Debug)]
pub struct ContentConfig {
    pub base_url: Url,
    pub quiz_path: String,
    pub text_matching_path: String,
    pub voice_practice_path: String,
    pub voice_check_path: String,
    pub speaking_practice_path: String,
    pub typing_sentences_path: String,
    pub typing_check_path: String,
    pub chat_path: String,
    pub transcription_path: String,
}

impl ContentConfig {
    /// Config with the service's default endpoint layout under `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            quiz_path: "/api/quiz".into(),
            text_matching_path: "/api/text-matching".into(),
            voice_practice_path: "/api/voice-input-practice".into(),
            voice_check_path: "/api/voice-input-check".into(),
            speaking_practice_path: "/api/speaking-practice".into(),
            typing_sentences_path: "/api/typing-practice".into(),
            typing_check_path: "/api/typing-practice-check".into(),
            chat_path: "/chat".into(),
            transcription_path: "/audio_trans".into(),
        }
    }

    /// Builds a config from `TELUGU_API_BASE_URL`, if set and parseable.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("TELUGU_API_BASE_URL").ok()?;
        let base_url = Url::parse(base_url.trim()).ok()?;
        Some(Self::new(base_url))
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }
}
