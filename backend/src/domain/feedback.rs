//! Feedback field validation.
//!
//! `user_id` and `faculty_id` are immutable after creation, so no full
//! feedback aggregate exists in the domain: writes go through
//! [`crate::domain::ports::NewFeedback`] and reads come back as the
//! anonymization-aware projections the ports define.

use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted in the comments field.
pub const MAX_COMMENT_CHARS: usize = 1000;

/// Validation failures for feedback fields.
///
/// Messages match what the frontend displays verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackValidationError {
    /// Rating outside the accepted 1..=5 range.
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
    /// Comments longer than [`MAX_COMMENT_CHARS`].
    #[error("Comments cannot exceed 1000 characters")]
    CommentsTooLong,
}

/// A validated star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct Rating(i16);

impl Rating {
    /// Validate and wrap a raw rating value.
    pub fn try_new(value: i16) -> Result<Self, FeedbackValidationError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FeedbackValidationError::RatingOutOfRange)
        }
    }

    /// The raw rating value.
    pub const fn get(self) -> i16 {
        self.0
    }
}

impl TryFrom<i16> for Rating {
    type Error = FeedbackValidationError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Rating> for i16 {
    fn from(value: Rating) -> Self {
        value.get()
    }
}

/// Optional free-text comments, bounded at [`MAX_COMMENT_CHARS`] characters.
///
/// An absent comments field is stored as the empty string, matching the
/// original wire contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Comments(String);

impl Comments {
    /// Validate and wrap free-text comments; `None` becomes empty.
    pub fn try_new(value: Option<String>) -> Result<Self, FeedbackValidationError> {
        let value = value.unwrap_or_default();
        if value.chars().count() > MAX_COMMENT_CHARS {
            return Err(FeedbackValidationError::CommentsTooLong);
        }
        Ok(Self(value))
    }

    /// The comment text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Comments {
    type Error = FeedbackValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(Some(value))
    }
}

impl From<Comments> for String {
    fn from(value: Comments) -> Self {
        value.0
    }
}
