use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Upstream news provider returned status {status}")]
    UpstreamFetch { status: u16 },

    #[error("Upstream call timed out during {stage}")]
    UpstreamTimeout { stage: &'static str },

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Maps a transport error from an upstream call, keeping timeouts distinct.
    pub fn from_transport(stage: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::UpstreamTimeout { stage }
        } else {
            Error::Http(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_fetch_message_carries_status() {
        let err = Error::UpstreamFetch { status: 500 };
        assert_eq!(err.to_string(), "Upstream news provider returned status 500");
    }

    #[test]
    fn test_timeout_message_names_stage() {
        let err = Error::UpstreamTimeout { stage: "classify" };
        assert_eq!(err.to_string(), "Upstream call timed out during classify");
    }
}
