//! Provider credentials.

/// Environment variable holding the OpenRouter key (text and speech).
pub const OPENROUTER_ENV: &str = "OPENROUTER_API_KEY";
/// Environment variable holding the Replicate token.
pub const REPLICATE_ENV: &str = "REPLICATE_API_TOKEN";
/// Environment variable holding the Freepik key.
pub const FREEPIK_ENV: &str = "FREEPIK_API_KEY";
/// Environment variable holding the Hugging Face token.
pub const HUGGINGFACE_ENV: &str = "HUGGINGFACEHUB_API_TOKEN";

/// API keys for every remote provider. Missing keys are `None`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// OpenRouter key
    pub openrouter: Option<String>,
    /// Replicate token
    pub replicate: Option<String>,
    /// Freepik key
    pub freepik: Option<String>,
    /// Hugging Face token
    pub huggingface: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.status();
        f.debug_struct("Credentials")
            .field("openrouter", &status.openrouter)
            .field("replicate", &status.replicate)
            .field("freepik", &status.freepik)
            .field("huggingface", &status.huggingface)
            .finish()
    }
}

impl Credentials {
    /// Read every key from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read every key through `lookup`. Blank values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            openrouter: read(OPENROUTER_ENV),
            replicate: read(REPLICATE_ENV),
            freepik: read(FREEPIK_ENV),
            huggingface: read(HUGGINGFACE_ENV),
        }
    }

    /// Presence flags, safe to print.
    pub fn status(&self) -> CredentialStatus {
        CredentialStatus {
            openrouter: self.openrouter.is_some(),
            replicate: self.replicate.is_some(),
            freepik: self.freepik.is_some(),
            huggingface: self.huggingface.is_some(),
        }
    }
}

/// Which credentials are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CredentialStatus {
    /// OpenRouter key present
    pub openrouter: bool,
    /// Replicate token present
    pub replicate: bool,
    /// Freepik key present
    pub freepik: bool,
    /// Hugging Face token present
    pub huggingface: bool,
}

impl CredentialStatus {
    /// `(environment variable, present)` for every credential.
    pub fn entries(&self) -> [(&'static str, bool); 4] {
        [
            (OPENROUTER_ENV, self.openrouter),
            (REPLICATE_ENV, self.replicate),
            (FREEPIK_ENV, self.freepik),
            (HUGGINGFACE_ENV, self.huggingface),
        ]
    }

    /// Environment variables that are not set.
    pub fn missing(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect()
    }

    /// Story text needs OpenRouter; everything else has a fallback.
    pub fn can_generate_text(&self) -> bool {
        self.openrouter
    }
}
