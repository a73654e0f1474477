//! Speech transcription over HTTP.
//!
//! Audio capture and WAV encoding happen elsewhere; this module takes a
//! complete WAV buffer and returns the transcript. An empty transcript
//! means no speech was detected and is not an error. Every call is
//! attempted exactly once; transport failures propagate to the caller.

use std::io::Cursor;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("transcription request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("transcription service returned {status}: {body}")]
    Service {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Turns a WAV buffer into text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, wav: &[u8]) -> Result<String, TranscribeError>;
}

/// [`Transcriber`] backed by an OpenAI-compatible transcription endpoint.
pub struct WhisperHttp {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl WhisperHttp {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }
}

#[derive(Deserialize)]
struct Transcript {
    text: String,
}

#[async_trait]
impl Transcriber for WhisperHttp {
    async fn transcribe(&self, wav: &[u8]) -> Result<String, TranscribeError> {
        if let Ok(reader) = hound::WavReader::new(Cursor::new(wav)) {
            let spec = reader.spec();
            let seconds = reader.duration() as f32 / spec.sample_rate as f32;
            debug!(seconds, sample_rate = spec.sample_rate, "transcribing wav buffer");
        }

        let part = reqwest::multipart::Part::bytes(wav.to_vec())
            .file_name("audio.wav")
            .mime_str("audio/wav")?;
        let form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .part("file", part);
        let url = format!(
            "{}/v1/audio/transcriptions",
            self.base_url.trim_end_matches('/')
        );
        let resp = self.client.post(&url).multipart(form).send().await?;
        if !resp.status().is_success() {
            return Err(TranscribeError::Service {
                status: resp.status(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        let transcript: Transcript = resp.json().await?;
        Ok(transcript.text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn wav_bytes() -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut buf = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut buf, spec).unwrap();
        for i in 0..160 {
            writer.write_sample((i % 8) as i16 * 100).unwrap();
        }
        writer.finalize().unwrap();
        buf.into_inner()
    }

    #[tokio::test]
    async fn posts_wav_and_trims_transcript() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/audio/transcriptions")
                    .body_contains("audio.wav");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("{\"text\": \"  pour the coffee \"}");
            })
            .await;

        let stt = WhisperHttp::new(server.base_url(), "whisper-1");
        let text = stt.transcribe(&wav_bytes()).await.unwrap();
        assert_eq!(text, "pour the coffee");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_transcript_is_not_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/audio/transcriptions");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("{\"text\": \"\"}");
            })
            .await;

        let stt = WhisperHttp::new(server.base_url(), "whisper-1");
        let text = stt.transcribe(&wav_bytes()).await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn non_success_status_is_a_service_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/audio/transcriptions");
                then.status(429).body("rate limited");
            })
            .await;

        let stt = WhisperHttp::new(server.base_url(), "whisper-1");
        match stt.transcribe(&wav_bytes()).await {
            Err(TranscribeError::Service { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }
}
