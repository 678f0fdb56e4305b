use core::fmt::Debug;
use std::fmt::Display;
use std::str::FromStr;

use crate::{GoError, GoResult};

/// A unique identifier for a GO term, e.g. `GO:0061024`
///
/// Internally the id is stored as the numerical part only, so
/// `GoTermId` is cheap to copy and compare. The `Ord` implementation
/// follows the numerical order of the ids, which keeps every sorted
/// container of ids in a reproducible order.
#[derive(Copy, Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GoTermId {
    inner: u32,
}

impl TryFrom<&str> for GoTermId {
    type Error = GoError;
    fn try_from(s: &str) -> GoResult<Self> {
        let digits = s
            .strip_prefix("GO:")
            .ok_or_else(|| GoError::InvalidTermId(s.to_string()))?;
        Ok(GoTermId {
            inner: digits.parse::<u32>()?,
        })
    }
}

impl FromStr for GoTermId {
    type Err = GoError;
    fn from_str(s: &str) -> GoResult<Self> {
        GoTermId::try_from(s)
    }
}

impl From<u32> for GoTermId {
    fn from(inner: u32) -> Self {
        Self { inner }
    }
}

impl Debug for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoTermId({})", self)
    }
}

impl Display for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GO:{:07}", self.inner)
    }
}

impl PartialEq<str> for GoTermId {
    fn eq(&self, other: &str) -> bool {
        GoTermId::try_from(other).map_or(false, |id| self == &id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_and_display() {
        let id = GoTermId::try_from("GO:0061024").unwrap();
        assert_eq!(id, GoTermId::from(61024u32));
        assert_eq!(id.to_string(), "GO:0061024");
        assert_eq!(format!("{:?}", id), "GoTermId(GO:0061024)");
        assert!(&id == "GO:0061024");
    }

    #[test]
    fn reject_invalid_ids() {
        assert!(matches!(
            GoTermId::try_from("HP:0000001"),
            Err(GoError::InvalidTermId(_))
        ));
        assert!(matches!(
            GoTermId::try_from("GO:12x45"),
            Err(GoError::ParseIntError)
        ));
        assert!("GO:".parse::<GoTermId>().is_err());
    }

    #[test]
    fn numerical_ordering() {
        let mut ids = vec![
            GoTermId::from(8150u32),
            GoTermId::from(5u32),
            GoTermId::from(61024u32),
        ];
        ids.sort();
        assert_eq!(ids[0], 5u32.into());
        assert_eq!(ids[2], 61024u32.into());
    }
}
