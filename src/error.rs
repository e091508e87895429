//! Failures while fetching horoscope data.

use thiserror::Error;

/// The three ways a horoscope lookup can fail, checked in this order.
#[derive(Debug, Error)]
pub enum HoroscopeError {
    /// The request could not complete or came back with a failing status.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The page did not have the expected shape. An unknown sign and a redesigned
    /// page both end up here.
    #[error("{0}")]
    StructuralParse(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl HoroscopeError {
    pub fn structural(msg: impl Into<String>) -> Self {
        Self::StructuralParse(msg.into())
    }

    /// Short title for the notice shown to the user
    pub fn notice_title(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Service Unavailable",
            Self::StructuralParse(_) => "Star Ratings Not Found",
            Self::Unexpected(_) => "Command Error",
        }
    }

    /// What the user is told, the raw error only goes to the logs
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Transport(_) => {
                "The horoscope service is temporarily unavailable. Please try again later."
            }
            Self::StructuralParse(_) => {
                "Couldn't retrieve star ratings. The sign may be invalid or the data could not be found."
            }
            Self::Unexpected(_) => "Something went wrong while fetching star ratings. Please try again later.",
        }
    }
}
