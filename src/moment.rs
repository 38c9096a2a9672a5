//! Moment identifiers and the immutable moment record.
//!
//! A [`Moment`] is an `(id, message, timestamp)` triple stamped by a
//! [`Clock`](crate::clock::Clock) at the instant it is captured. Once stored
//! it is never mutated.

use std::fmt::{self, Display};

/// Identifier of a moment inside a single counter.
///
/// Ids are compared by equality only; they carry no ordering meaning.
/// Text and numeric ids live in distinct spaces: `Number(1)` and
/// `Text("1")` are different ids even though they display the same.
///
/// # Examples
///
/// ```rust
/// use momenti::moment::MomentId;
///
/// let text: MomentId = "db-ready".into();
/// let number: MomentId = 42u64.into();
///
/// assert_eq!(text.to_string(), "db-ready");
/// assert_eq!(number.to_string(), "42");
/// assert_ne!(MomentId::from(1u64), MomentId::from("1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MomentId {
    /// A numeric id. Randomly generated ids use this variant.
    Number(u64),
    /// A textual id.
    Text(String),
}

impl MomentId {
    /// Generates a random numeric id.
    ///
    /// This is what a capture without an explicit id receives. Such moments
    /// are practically impossible to look up again by id, and two random ids
    /// are not guaranteed to differ.
    pub fn random() -> Self {
        MomentId::Number(rand::random())
    }
}

impl Display for MomentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MomentId::Number(n) => write!(f, "{}", n),
            MomentId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MomentId {
    fn from(value: &str) -> Self {
        MomentId::Text(value.to_string())
    }
}

impl From<String> for MomentId {
    fn from(value: String) -> Self {
        MomentId::Text(value)
    }
}

impl From<&String> for MomentId {
    fn from(value: &String) -> Self {
        MomentId::Text(value.clone())
    }
}

impl From<u64> for MomentId {
    fn from(value: u64) -> Self {
        MomentId::Number(value)
    }
}

impl From<u32> for MomentId {
    fn from(value: u32) -> Self {
        MomentId::Number(u64::from(value))
    }
}

impl From<usize> for MomentId {
    fn from(value: usize) -> Self {
        MomentId::Number(value as u64)
    }
}

impl From<&MomentId> for MomentId {
    fn from(value: &MomentId) -> Self {
        value.clone()
    }
}

/// A captured moment: id, display message and capture timestamp.
///
/// Moments are created by
/// [`PerformanceCounter::capture`](crate::counter::PerformanceCounter::capture)
/// and exposed read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Moment {
    id: MomentId,
    message: String,
    timestamp: f64,
}

impl Moment {
    pub(crate) fn new(id: MomentId, message: String, timestamp: f64) -> Self {
        Self {
            id,
            message,
            timestamp,
        }
    }

    /// Returns the moment's id.
    #[inline]
    pub fn id(&self) -> &MomentId {
        &self.id
    }

    /// Returns the display message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the capture timestamp in fractional milliseconds.
    #[inline]
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

impl Display for Moment {
    /// Formats the moment as `message@timestamp ms`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:.3} ms", self.message, self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        assert_eq!(MomentId::from("a"), MomentId::Text("a".to_string()));
        assert_eq!(MomentId::from(String::from("b")), MomentId::Text("b".to_string()));
        assert_eq!(MomentId::from(3u32), MomentId::Number(3));
        assert_eq!(MomentId::from(4usize), MomentId::Number(4));
    }

    #[test]
    fn test_random_is_numeric() {
        assert!(matches!(MomentId::random(), MomentId::Number(_)));
    }

    #[test]
    fn test_text_and_number_are_distinct() {
        assert_ne!(MomentId::from("5"), MomentId::from(5u64));
        assert_eq!(MomentId::from("5").to_string(), MomentId::from(5u64).to_string());
    }

    #[test]
    fn test_moment_accessors() {
        let moment = Moment::new("A".into(), "start".to_string(), 12.5);
        assert_eq!(moment.id(), &MomentId::from("A"));
        assert_eq!(moment.message(), "start");
        assert_eq!(moment.timestamp(), 12.5);
        assert_eq!(moment.to_string(), "start@12.500 ms");
    }
}
