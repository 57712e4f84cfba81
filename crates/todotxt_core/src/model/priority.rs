//! Task priority letter.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Priority letter `A`..=`Z`; `A` is the most important and sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Priority(char);

impl Priority {
    /// Returns the uppercase letter.
    pub fn letter(self) -> char {
        self.0
    }
}

/// Rejected priority input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityError {
    Empty,
    TooLong(String),
    NotUppercaseLetter(char),
}

impl Display for PriorityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "priority cannot be empty"),
            Self::TooLong(value) => {
                write!(f, "priority must be a single letter, got `{value}`")
            }
            Self::NotUppercaseLetter(ch) => {
                write!(f, "priority must be an uppercase letter A-Z, got `{ch}`")
            }
        }
    }
}

impl Error for PriorityError {}

impl TryFrom<char> for Priority {
    type Error = PriorityError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        if value.is_ascii_uppercase() {
            Ok(Self(value))
        } else {
            Err(PriorityError::NotUppercaseLetter(value))
        }
    }
}

impl FromStr for Priority {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(PriorityError::Empty),
            (Some(letter), None) => Self::try_from(letter),
            (Some(_), Some(_)) => Err(PriorityError::TooLong(s.to_string())),
        }
    }
}

impl From<Priority> for char {
    fn from(value: Priority) -> Self {
        value.0
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, PriorityError};

    #[test]
    fn parses_single_uppercase_letter() {
        assert_eq!("B".parse::<Priority>().map(Priority::letter), Ok('B'));
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!("".parse::<Priority>(), Err(PriorityError::Empty));
        assert_eq!(
            "AB".parse::<Priority>(),
            Err(PriorityError::TooLong("AB".to_string()))
        );
        assert_eq!(
            Priority::try_from('a'),
            Err(PriorityError::NotUppercaseLetter('a'))
        );
        assert!(Priority::try_from('Ä').is_err());
    }

    #[test]
    fn orders_by_importance() {
        let a = Priority::try_from('A').unwrap();
        let c = Priority::try_from('C').unwrap();
        assert!(a < c);
    }
}
