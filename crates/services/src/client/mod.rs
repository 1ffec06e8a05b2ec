mod config;
mod wire;

pub use config::ContentConfig;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use capture::EncodedAudioClip;
use telugu_core::model::{
    Difficulty, MatchPair, QuizQuestion, SentencePair, SpeakingPractice, TypingDifficulty,
    TypingVerdict, VoicePrompt, VoiceVerdict,
};

use crate::error::ClientError;
use wire::{
    ChatWire, MatchPairWire, QuizQuestionWire, QuizRequest, STATUS_SUCCESS,
    SpeakingPracticeRequest, SpeakingPracticeWire, TextMatchingRequest, TranscriptionWire,
    TypingCheckRequest, TypingCheckWire, TypingSentencesRequest, TypingSentencesWire,
    VoiceCheckWire, VoicePracticeRequest, VoicePracticeWire, VoicePromptWire,
};

//
// ─── CONTENT API ───────────────────────────────────────────────────────────────
//

/// Remote operations used by activity sessions.
///
/// `ContentClient` implements this against the real service; tests
/// substitute a scripted fake. No retry is attempted anywhere: every failure
/// surfaces to the caller for an explicit user-initiated re-attempt.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn generate_quiz(
        &self,
        topic: &str,
        num_questions: u32,
        difficulty: Difficulty,
    ) -> Result<Vec<QuizQuestion>, ClientError>;

    async fn generate_text_matching(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<MatchPair>, ClientError>;

    async fn generate_voice_practice(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<VoicePrompt>, ClientError>;

    async fn check_voice_input(
        &self,
        prompt: &VoicePrompt,
        clip: &EncodedAudioClip,
    ) -> Result<VoiceVerdict, ClientError>;

    async fn typing_sentences(
        &self,
        user: &str,
        difficulty: TypingDifficulty,
    ) -> Result<Vec<SentencePair>, ClientError>;

    async fn check_typing(&self, telugu: &str, english: &str)
    -> Result<TypingVerdict, ClientError>;
}

//
// ─── CLIENT ────────────────────────────────────────────────────────────────────
//

/// A free-form prompt for the conversational endpoint.
#[derive(Debug, Clone)]
pub enum ChatPrompt<'a> {
    Text(&'a str),
    Audio(&'a EncodedAudioClip),
}

/// HTTP client for the content-generation service.
///
/// Parses responses structurally and converts them into domain types; it
/// performs no semantic validation of server content and persists nothing.
#[derive(Clone)]
pub struct ContentClient {
    client: Client,
    config: ContentConfig,
}

impl ContentClient {
    #[must_use]
    pub fn new(config: ContentConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path)?;
        debug!(%url, "content request");

        let response = self.client.post(url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::HttpStatus(response.status()));
        }

        Ok(response.json().await?)
    }

    async fn post_form<T>(&self, path: &str, form: Form) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path)?;
        debug!(%url, "content upload");

        let response = self.client.post(url).multipart(form).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::HttpStatus(response.status()));
        }

        Ok(response.json().await?)
    }

    /// Generate a guided conversation scenario for the given topic.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` for transport failures, non-2xx statuses, or a
    /// body that does not match the expected shape.
    pub async fn generate_speaking_practice(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<SpeakingPractice, ClientError> {
        if topic.trim().is_empty() {
            return Err(ClientError::EmptyTopic);
        }
        let request = SpeakingPracticeRequest {
            main_topic: topic,
            difficulty: difficulty.as_str(),
        };
        let wire: SpeakingPracticeWire = self
            .post_json(&self.config.speaking_practice_path, &request)
            .await?;
        Ok(wire.into_domain()?)
    }

    /// Send a free-form chat message, as text or as a recorded clip.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` for transport failures or non-2xx statuses.
    pub async fn send_chat(&self, prompt: ChatPrompt<'_>) -> Result<String, ClientError> {
        let form = match prompt {
            ChatPrompt::Text(text) => {
                if text.trim().is_empty() {
                    return Err(ClientError::EmptyTopic);
                }
                Form::new().text("type", "text").text("prompt", text.to_owned())
            }
            ChatPrompt::Audio(clip) => Form::new()
                .text("type", "audio")
                .part("prompt", clip_part(clip)?),
        };

        let reply: ChatWire = self.post_form(&self.config.chat_path, form).await?;
        debug!(kind = %reply.kind, "chat reply");
        Ok(reply.response)
    }

    /// Transcribe a recorded clip into text.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` for transport failures or non-2xx statuses.
    pub async fn transcribe(&self, clip: &EncodedAudioClip) -> Result<String, ClientError> {
        let form = Form::new().part("audio", clip_part(clip)?);
        let wire: TranscriptionWire = self
            .post_form(&self.config.transcription_path, form)
            .await?;
        Ok(wire.data)
    }
}

fn clip_part(clip: &EncodedAudioClip) -> Result<Part, ClientError> {
    Ok(Part::bytes(clip.bytes().to_vec())
        .file_name(clip.file_name())
        .mime_str(clip.mime_type())?)
}

#[async_trait]
impl ContentApi for ContentClient {
    async fn generate_quiz(
        &self,
        topic: &str,
        num_questions: u32,
        difficulty: Difficulty,
    ) -> Result<Vec<QuizQuestion>, ClientError> {
        if topic.trim().is_empty() {
            return Err(ClientError::EmptyTopic);
        }
        let request = QuizRequest {
            topic,
            num_questions,
            difficulty: difficulty.as_str(),
        };
        let wire: Vec<QuizQuestionWire> =
            self.post_json(&self.config.quiz_path, &request).await?;
        Ok(wire
            .into_iter()
            .map(QuizQuestionWire::into_domain)
            .collect::<Result<_, _>>()?)
    }

    async fn generate_text_matching(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<MatchPair>, ClientError> {
        if topic.trim().is_empty() {
            return Err(ClientError::EmptyTopic);
        }
        let request = TextMatchingRequest {
            main_topic: topic,
            difficulty: difficulty.as_str(),
        };
        let wire: Vec<MatchPairWire> = self
            .post_json(&self.config.text_matching_path, &request)
            .await?;
        Ok(wire
            .into_iter()
            .map(MatchPairWire::into_domain)
            .collect::<Result<_, _>>()?)
    }

    async fn generate_voice_practice(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<VoicePrompt>, ClientError> {
        if topic.trim().is_empty() {
            return Err(ClientError::EmptyTopic);
        }
        let request = VoicePracticeRequest {
            topic,
            difficulty: difficulty.as_str(),
        };
        let wire: VoicePracticeWire = self
            .post_json(&self.config.voice_practice_path, &request)
            .await?;
        if wire.status != STATUS_SUCCESS {
            return Err(ClientError::Rejected(wire.status));
        }
        Ok(wire
            .data
            .into_iter()
            .map(VoicePromptWire::into_domain)
            .collect::<Result<_, _>>()?)
    }

    async fn check_voice_input(
        &self,
        prompt: &VoicePrompt,
        clip: &EncodedAudioClip,
    ) -> Result<VoiceVerdict, ClientError> {
        let form = Form::new()
            .text("telugu-text", prompt.telugu().to_owned())
            .part("audio", clip_part(clip)?);
        let wire: VoiceCheckWire = self
            .post_form(&self.config.voice_check_path, form)
            .await?;
        Ok(wire.into_verdict())
    }

    async fn typing_sentences(
        &self,
        user: &str,
        difficulty: TypingDifficulty,
    ) -> Result<Vec<SentencePair>, ClientError> {
        if user.trim().is_empty() {
            return Err(ClientError::EmptyUser);
        }
        let request = TypingSentencesRequest {
            user,
            difficulty_level: difficulty.as_str(),
        };
        let wire: TypingSentencesWire = self
            .post_json(&self.config.typing_sentences_path, &request)
            .await?;
        if wire.status != STATUS_SUCCESS {
            return Err(ClientError::Rejected(wire.status));
        }
        Ok(wire.into_domain()?)
    }

    async fn check_typing(
        &self,
        telugu: &str,
        english: &str,
    ) -> Result<TypingVerdict, ClientError> {
        let request = TypingCheckRequest { telugu, english };
        let wire: TypingCheckWire = self
            .post_json(&self.config.typing_check_path, &request)
            .await?;
        Ok(wire.into_verdict())
    }
}
