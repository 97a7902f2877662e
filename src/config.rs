use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Secret file names read from a secrets directory
pub const API_KEY_FILE: &str = "api.secret";
pub const ORGANIZATION_FILE: &str = "org.secret";
pub const PROJECT_FILE: &str = "proj.secret";

/// Configuration for the education classifier client
#[derive(Clone)]
pub struct ClassifierConfig {
    pub api_key: String,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("api_key", &"<redacted>")
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClassifierConfig {
    /// Create a configuration with default model, endpoint and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            organization: None,
            project: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config(format!(
                "No API key configured. Set OPENAI_API_KEY, pass --api-key, or provide {} in the secrets directory",
                API_KEY_FILE
            )));
        }

        if self.model.trim().is_empty() {
            return Err(Error::Config("Model name must not be empty".to_string()));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(Error::Config("Timeout must be at least one second".to_string()));
        }

        Ok(())
    }

    /// Chat completions endpoint derived from the base URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Optional TOML configuration file
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub secrets_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Credentials read from a secrets directory
#[derive(Default, Clone)]
pub struct SecretFiles {
    pub api_key: Option<String>,
    pub organization: Option<String>,
    pub project: Option<String>,
}

impl SecretFiles {
    /// Read `api.secret`, `org.secret` and `proj.secret` from `dir`.
    /// Missing files are left unset.
    pub fn read(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::Config(format!(
                "Secrets directory does not exist: {}",
                dir.display()
            )));
        }

        Ok(Self {
            api_key: read_secret(&dir.join(API_KEY_FILE))?,
            organization: read_secret(&dir.join(ORGANIZATION_FILE))?,
            project: read_secret(&dir.join(PROJECT_FILE))?,
        })
    }
}

fn read_secret(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(non_empty(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Builder for classifier configurations.
///
/// Later calls override earlier ones, so apply sources from lowest to
/// highest precedence: file, secrets, environment, flags.
#[derive(Default, Clone)]
pub struct ClassifierConfigBuilder {
    api_key: Option<String>,
    organization: Option<String>,
    project: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl ClassifierConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply values from a TOML config file
    pub fn file(mut self, file: &FileConfig) -> Self {
        self.api_key = file.api_key.clone().and_then(non_empty).or(self.api_key);
        self.organization = file.organization.clone().and_then(non_empty).or(self.organization);
        self.project = file.project.clone().and_then(non_empty).or(self.project);
        self.model = file.model.clone().and_then(non_empty).or(self.model);
        self.base_url = file.base_url.clone().and_then(non_empty).or(self.base_url);
        self.timeout_secs = file.timeout_secs.or(self.timeout_secs);
        self
    }

    /// Apply credentials read from secret files
    pub fn secrets(mut self, secrets: SecretFiles) -> Self {
        self.api_key = secrets.api_key.or(self.api_key);
        self.organization = secrets.organization.or(self.organization);
        self.project = secrets.project.or(self.project);
        self
    }

    /// Read secret files from a directory and apply them
    pub fn secrets_dir(self, dir: impl AsRef<Path>) -> Result<Self> {
        Ok(self.secrets(SecretFiles::read(dir)?))
    }

    /// Apply environment variables through `lookup`
    pub fn env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).and_then(non_empty);
        self.api_key = get("OPENAI_API_KEY").or(self.api_key);
        self.organization = get("OPENAI_ORG_ID").or(self.organization);
        self.project = get("OPENAI_PROJECT_ID").or(self.project);
        self.base_url = get("OPENAI_BASE_URL").or(self.base_url);
        self.model = get("PARTY_ED_MODEL").or(self.model);
        self
    }

    /// Apply the process environment
    pub fn env(self) -> Self {
        self.env_with(|key| std::env::var(key).ok())
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<ClassifierConfig> {
        let config = ClassifierConfig {
            api_key: self.api_key.unwrap_or_default(),
            organization: self.organization,
            project: self.project,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        config.validate()?;
        Ok(config)
    }
}
