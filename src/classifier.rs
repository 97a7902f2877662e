//! Education attainment classification through an OpenAI-compatible
//! chat completions endpoint.

use crate::config::ClassifierConfig;
use crate::error::{Error, Result};
use crate::types::EducationLabel;
use regex::Regex;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const USER_AGENT: &str = concat!("party-ed/", env!("CARGO_PKG_VERSION"));

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

const INSTRUCTIONS: &str = "The text below is the biography of a current or former member of \
Congress. Classify their education. Reply \"no\" if they have neither a bachelor's (or equivalent \
undergraduate) degree nor a graduate degree such as a master's, JD, MD or PhD. Reply \"un\" if they \
have only an undergraduate degree. Reply \"both\" if they have an undergraduate degree and a graduate \
degree. Reply \"gr\" if they have only a graduate degree. Reply with that single word and nothing else. \
The biography is enclosed in quotation marks:\n";

/// Boundary to the external education classifier
pub trait EducationClassifier {
    fn classify(&self, biography: &str) -> Result<EducationLabel>;
}

/// Build the user prompt sent with a biography
pub fn build_prompt(biography: &str) -> String {
    format!("{}\"{}\"", INSTRUCTIONS, biography)
}

/// Maps the model's one-word reply onto a label
#[derive(Debug, Clone)]
pub struct ReplyParser {
    pattern: Regex,
}

impl ReplyParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(r"(?i)^\W*(no|none|un|gr|both)\W*$")?,
        })
    }

    /// Parse a reply, returning `None` if it is not one of the known words
    pub fn parse(&self, reply: &str) -> Option<EducationLabel> {
        let caps = self.pattern.captures(reply.trim())?;
        match caps.get(1)?.as_str().to_lowercase().as_str() {
            "no" | "none" => Some(EducationLabel::None),
            "un" => Some(EducationLabel::UndergraduateOnly),
            "gr" => Some(EducationLabel::GraduateOnly),
            "both" => Some(EducationLabel::Both),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Classifier backed by the chat completions API
pub struct OpenAiClassifier {
    http: Client,
    config: ClassifierConfig,
    parser: ReplyParser,
}

impl OpenAiClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            config,
            parser: ReplyParser::new()?,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Send the prompt and return the raw reply text
    fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let mut request = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body);
        if let Some(org) = &self.config.organization {
            request = request.header("OpenAI-Organization", org);
        }
        if let Some(project) = &self.config.project {
            request = request.header("OpenAI-Project", project);
        }

        tracing::debug!(model = %self.config.model, "sending classification request");
        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            tracing::warn!(status = %status, "classification request failed");
            return Err(Error::ClassifierStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| Error::ClassifierResponse(format!("invalid body: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::ClassifierResponse("no message content in reply".to_string()))
    }
}

impl EducationClassifier for OpenAiClassifier {
    fn classify(&self, biography: &str) -> Result<EducationLabel> {
        let reply = self.complete(&build_prompt(biography))?;
        match self.parser.parse(&reply) {
            Some(label) => {
                tracing::debug!(?label, "classified biography");
                Ok(label)
            }
            None => {
                tracing::warn!(reply = %reply, "unrecognised classifier reply, assuming no degree");
                Ok(EducationLabel::None)
            }
        }
    }
}
