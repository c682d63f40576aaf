use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::models::AccountId;
use crate::chirp::errors::ChirpBodyError;
use crate::chirp::errors::ChirpIdError;
use crate::chirp::errors::SortOrderError;

/// Chirp entity: a short post owned by one account.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub author_id: AccountId,
    pub body: ChirpBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Words masked out of chirp bodies, compared case-insensitively.
const BANNED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];
const MASK: &str = "****";

/// Chirp body value type
///
/// At most 140 characters, with banned words masked. Only whole
/// space-separated words are masked, so `Sharbert!` passes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    const MAX_LENGTH: usize = 140;

    /// Validate and clean a raw body.
    ///
    /// # Errors
    /// * `Empty` - Body is empty or whitespace
    /// * `TooLong` - Body exceeds 140 characters
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        if body.trim().is_empty() {
            return Err(ChirpBodyError::Empty);
        }

        let length = body.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(clean_profanity(&body)))
    }

    /// Wrap a body loaded from storage, already validated on the way in.
    pub fn from_stored(body: String) -> Self {
        Self(body)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn clean_profanity(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if BANNED_WORDS.contains(&lowered.as_str()) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordering of chirp listings by creation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = SortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            other => Err(SortOrderError::Unknown(other.to_string())),
        }
    }
}

/// Command to publish a chirp
#[derive(Debug)]
pub struct CreateChirpCommand {
    pub author_id: AccountId,
    pub body: ChirpBody,
}

/// Filter and ordering for chirp listings
#[derive(Debug, Clone, Copy, Default)]
pub struct ListChirpsQuery {
    pub author_id: Option<AccountId>,
    pub sort: SortOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_masks_banned_words() {
        let body = ChirpBody::new(
            "I had something interesting for breakfast kerfuffle Sharbert FORNAX".to_string(),
        )
        .unwrap();

        assert_eq!(
            body.as_str(),
            "I had something interesting for breakfast **** **** ****"
        );
    }

    #[test]
    fn test_body_keeps_punctuated_words() {
        let body = ChirpBody::new("I hear Mastodon is better than Chirpy. sharbert!".to_string())
            .unwrap();

        assert_eq!(
            body.as_str(),
            "I hear Mastodon is better than Chirpy. sharbert!"
        );
    }

    #[test]
    fn test_body_length_limit() {
        assert!(ChirpBody::new("a".repeat(140)).is_ok());
        assert_eq!(
            ChirpBody::new("a".repeat(141)),
            Err(ChirpBodyError::TooLong {
                max: 140,
                actual: 141
            })
        );
    }

    #[test]
    fn test_body_length_counts_characters() {
        assert!(ChirpBody::new("é".repeat(140)).is_ok());
    }

    #[test]
    fn test_body_must_not_be_empty() {
        assert_eq!(ChirpBody::new("   ".to_string()), Err(ChirpBodyError::Empty));
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Ascending));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Descending));
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::default(), SortOrder::Ascending);
    }
}
