use serde::{Deserialize, Serialize};
use std::fmt;

/// A customer rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingOutOfRange(pub i64);

impl fmt::Display for RatingOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rating {} is outside {}..={}",
            self.0,
            Rating::MIN,
            Rating::MAX
        )
    }
}

impl std::error::Error for RatingOutOfRange {}

impl TryFrom<i64> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Rating::MIN)..=i64::from(Rating::MAX)).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(RatingOutOfRange(value))
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the response log.
///
/// `rating` is `None` when the stored value could not be read back as a
/// valid rating; such rows still mark the token as answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub token: String,
    pub rating: Option<u8>,
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    Recorded,
    AlreadyRecorded,
}

impl SubmitOutcome {
    pub fn message(self) -> &'static str {
        match self {
            SubmitOutcome::Recorded => "Thank you for your feedback!",
            SubmitOutcome::AlreadyRecorded => "Feedback already received for this service.",
        }
    }
}
