//! Application orchestration layer for JobPulse.

mod package;

use std::path::PathBuf;

use anyhow::Context as _;
use jobpulse_core::{ApplicationType, ProfileRecord};

pub use package::{
    ApplicationPackage, MAX_SKILLS, merge_package, merge_skills, normalize_contract_text,
    parse_package,
};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("the job description is empty")]
    MissingJobText,
    #[error("no saved profile; fill in the profile first")]
    NoProfile,
    #[error("the generation service failed: {0:#}")]
    Service(anyhow::Error),
    #[error("the generation service returned an empty response")]
    EmptyResponse,
    #[error("the response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("the response is not a JSON object")]
    NotAnObject,
    #[error("the response has no optimizedProfile")]
    MissingProfile,
    #[error("optimizedProfile is malformed: {0}")]
    InvalidProfile(serde_json::Error),
}

/// What the generation service receives for one job offer.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub profile: ProfileRecord,
    pub job_text: String,
    pub application_type: ApplicationType,
}

impl GenerationRequest {
    pub fn contract_phrase(&self) -> &'static str {
        self.application_type.contract_phrase()
    }
}

/// Produces the raw JSON response for a request.
pub trait ApplicationGenerator {
    fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String>;
}

/// Serves a response obtained earlier and saved to disk.
#[derive(Debug, Clone)]
pub struct FileGenerator {
    path: PathBuf,
}

impl FileGenerator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ApplicationGenerator for FileGenerator {
    fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        tracing::debug!(
            path = %self.path.display(),
            application_type = %request.application_type,
            "reading generation response"
        );
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("read response {}", self.path.display()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum GenerationState {
    #[default]
    Idle,
    Ready(ApplicationPackage),
    Failed(String),
}

/// One generation attempt cycle for a job offer.
///
/// A failed attempt leaves the session retryable; each attempt starts from the
/// stored profile again.
#[derive(Debug, Clone)]
pub struct Session {
    profile: Option<ProfileRecord>,
    application_type: ApplicationType,
    job_text: String,
    state: GenerationState,
}

impl Session {
    /// `profile` is `None` when nothing has been saved yet.
    pub fn new(profile: Option<ProfileRecord>, application_type: ApplicationType) -> Self {
        Self {
            profile,
            application_type,
            job_text: String::new(),
            state: GenerationState::Idle,
        }
    }

    pub fn with_job_text(mut self, text: impl Into<String>) -> Self {
        self.job_text = text.into();
        self
    }

    pub fn job_text(&self) -> &str {
        &self.job_text
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn package(&self) -> Option<&ApplicationPackage> {
        match &self.state {
            GenerationState::Ready(package) => Some(package),
            _ => None,
        }
    }

    pub fn generate(&mut self, generator: &dyn ApplicationGenerator) -> Result<(), GenerationError> {
        self.state = GenerationState::Idle;
        match self.attempt(generator) {
            Ok(package) => {
                tracing::info!(
                    score = package.match_score,
                    company = %package.extracted_company,
                    "application package ready"
                );
                self.state = GenerationState::Ready(package);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "generation failed");
                self.state = GenerationState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    fn attempt(&self, generator: &dyn ApplicationGenerator) -> Result<ApplicationPackage, GenerationError> {
        if self.job_text.trim().is_empty() {
            return Err(GenerationError::MissingJobText);
        }
        let profile = self.profile.as_ref().ok_or(GenerationError::NoProfile)?;
        let request = GenerationRequest {
            profile: profile.clone(),
            job_text: self.job_text.clone(),
            application_type: self.application_type,
        };
        let raw = generator.generate(&request).map_err(GenerationError::Service)?;
        let package = parse_package(&raw)?;
        Ok(merge_package(profile, package))
    }
}
