//! Username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The input is empty or only whitespace.
    #[error("username cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains control characters.
    #[error("username cannot contain control characters")]
    ControlCharacter,
}

/// An account username.
///
/// Usernames are unique per account (enforced by the database). Surrounding
/// whitespace is trimmed; the remaining text is kept as typed.
///
/// ## Constraints
///
/// - Length: 1-64 characters after trimming
/// - No control characters
///
/// ## Examples
///
/// ```
/// use pachara_core::Username;
///
/// assert_eq!(Username::parse("  alice ").unwrap().as_str(), "alice");
/// assert!(Username::parse("").is_err());
/// assert!(Username::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum length of a username, in characters.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`] characters, or contains control characters.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UsernameError::ControlCharacter);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        let name = Username::parse("\tbob  ").unwrap();
        assert_eq!(name.as_str(), "bob");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(Username::parse(""), Err(UsernameError::Empty));
        assert_eq!(Username::parse(" \n "), Err(UsernameError::Empty));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 64 Thai characters are 192 bytes but still a valid username
        let thai = "ก".repeat(Username::MAX_LENGTH);
        assert!(Username::parse(&thai).is_ok());

        let too_long = "a".repeat(Username::MAX_LENGTH + 1);
        assert_eq!(
            Username::parse(&too_long),
            Err(UsernameError::TooLong {
                max: Username::MAX_LENGTH
            })
        );
    }

    #[test]
    fn test_rejects_control_characters() {
        assert_eq!(
            Username::parse("ali\u{0}ce"),
            Err(UsernameError::ControlCharacter)
        );
    }

    #[test]
    fn test_inner_spaces_are_kept() {
        assert_eq!(Username::parse("mary jane").unwrap().as_str(), "mary jane");
    }
}
