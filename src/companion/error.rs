use thiserror::Error;

/// Every way a companion request can degrade. Each variant maps to a canned
/// message; none of them change the HTTP status.
#[derive(Debug, Error)]
pub enum CompanionError {
    #[error("invalid request body: {0}")]
    InvalidRequest(String),

    #[error("API key not configured")]
    ConfigurationMissing,

    #[error("API error: {0}")]
    UpstreamStatus(u16),

    #[error("{0}")]
    UpstreamTransport(#[from] reqwest::Error),

    #[error("unexpected upstream response: {0}")]
    UpstreamDecode(String),

    #[error("upstream returned an empty completion")]
    EmptyCompletion,

    #[error("prompt rendering failed: {0}")]
    Prompt(#[from] minijinja::Error),
}

impl CompanionError {
    pub fn fallback_message(&self, student_name: &str) -> String {
        match self {
            CompanionError::ConfigurationMissing => {
                format!("Great job, {student_name}! Keep going!")
            }
            CompanionError::UpstreamStatus(_) => format!("You're doing great, {student_name}!"),
            CompanionError::InvalidRequest(_)
            | CompanionError::UpstreamTransport(_)
            | CompanionError::UpstreamDecode(_)
            | CompanionError::EmptyCompletion
            | CompanionError::Prompt(_) => format!("Keep up the good work, {student_name}!"),
        }
    }
}
