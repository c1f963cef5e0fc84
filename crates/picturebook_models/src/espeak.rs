//! Offline narration with a local `espeak-ng` binary.

use async_trait::async_trait;
use picturebook_config::EspeakConfig;
use picturebook_core::AudioFormat;
use picturebook_error::{ProviderError, ProviderResult};
use picturebook_interface::{SpeechAudio, SpeechProvider, SpeechRequest};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, instrument};

const PROVIDER: &str = "espeak";

/// Narration synthesized by `espeak-ng --stdout`, which writes a WAV file.
#[derive(Debug, Clone)]
pub struct EspeakSpeech {
    binary: String,
    voice: String,
    words_per_minute: u32,
    timeout: Duration,
}

impl EspeakSpeech {
    /// Create the engine from configuration.
    pub fn new(config: &EspeakConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            voice: config.voice.clone(),
            words_per_minute: config.words_per_minute,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn command(&self, text: &str) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-v")
            .arg(&self.voice)
            .arg("-s")
            .arg(self.words_per_minute.to_string())
            .arg("--stdout")
            // Text after `--` is never parsed as an option.
            .arg("--")
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl SpeechProvider for EspeakSpeech {
    #[instrument(skip(self, request), fields(binary = %self.binary, voice = %self.voice))]
    async fn synthesize(&self, request: &SpeechRequest) -> ProviderResult<SpeechAudio> {
        let child = self.command(request.text()).spawn().map_err(|e| {
            ProviderError::unavailable(
                PROVIDER,
                format!("cannot start {}: {}", self.binary, e),
            )
        })?;

        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                ProviderError::transport(
                    PROVIDER,
                    format!("timed out after {}s", self.timeout.as_secs()),
                )
            })?
            .map_err(|e| ProviderError::transport(PROVIDER, format!("wait failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProviderError::unavailable(
                PROVIDER,
                format!("{} exited with {}: {}", self.binary, output.status, stderr.trim()),
            ));
        }
        if AudioFormat::from_magic_bytes(&output.stdout) != Some(AudioFormat::Wav) {
            return Err(ProviderError::malformed(
                PROVIDER,
                format!("expected WAV on stdout, got {} bytes", output.stdout.len()),
            ));
        }

        debug!(bytes = output.stdout.len(), "Synthesized narration");
        Ok(SpeechAudio::new(output.stdout, AudioFormat::Wav))
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picturebook_error::ProviderErrorKind;

    fn config(binary: &str) -> EspeakConfig {
        EspeakConfig {
            enabled: true,
            binary: binary.to_string(),
            voice: "en-us".to_string(),
            words_per_minute: 150,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let engine = EspeakSpeech::new(&config("picturebook-no-such-espeak"));
        let err = engine
            .synthesize(&SpeechRequest::new("Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ProviderErrorKind::Unavailable(_)));
        assert_eq!(err.provider, "espeak");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_wav_output_is_malformed() {
        // `echo` succeeds but prints its arguments rather than audio.
        let engine = EspeakSpeech::new(&config("echo"));
        let err = engine
            .synthesize(&SpeechRequest::new("Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ProviderErrorKind::Malformed(_)));
    }
}
