use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("No external username supplied")]
    MissingUsername,

    #[error("Stats unavailable for {username}: {cause}")]
    Unavailable { username: String, cause: String },

    #[error("Invalid stats client configuration: {0}")]
    Configuration(String),
}

impl StatsError {
    pub fn unavailable(username: &str, cause: impl ToString) -> Self {
        StatsError::Unavailable {
            username: username.to_string(),
            cause: cause.to_string(),
        }
    }
}
