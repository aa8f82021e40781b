//! Preset slots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// One of the three user-configurable preset strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PresetSlot(u8);

impl PresetSlot {
    /// First slot.
    pub const ONE: Self = Self(1);
    /// Second slot.
    pub const TWO: Self = Self(2);
    /// Third slot.
    pub const THREE: Self = Self(3);

    /// Creates a slot from its 1-based number.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPreset`] outside 1-3.
    pub fn new(number: u8) -> Result<Self, CoreError> {
        if (1..=3).contains(&number) {
            Ok(Self(number))
        } else {
            Err(CoreError::InvalidPreset(number.to_string()))
        }
    }

    /// Returns the 1-based slot number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// Returns the settings key, e.g. `preset2`.
    pub fn key(self) -> String {
        format!("preset{}", self.0)
    }

    /// Returns all slots in order.
    pub fn all() -> [Self; 3] {
        [Self::ONE, Self::TWO, Self::THREE]
    }
}

impl TryFrom<u8> for PresetSlot {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PresetSlot> for u8 {
    fn from(slot: PresetSlot) -> Self {
        slot.0
    }
}

impl fmt::Display for PresetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PresetSlot {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("preset").unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .map_err(|_| CoreError::InvalidPreset(s.to_string()))
            .and_then(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slots() {
        assert_eq!(PresetSlot::new(2).unwrap(), PresetSlot::TWO);
        assert_eq!("3".parse::<PresetSlot>().unwrap().number(), 3);
        assert_eq!("preset1".parse::<PresetSlot>().unwrap(), PresetSlot::ONE);
        assert_eq!(PresetSlot::TWO.key(), "preset2");
    }

    #[test]
    fn test_invalid_slots() {
        assert!(PresetSlot::new(0).is_err());
        assert!(PresetSlot::new(4).is_err());
        assert!("four".parse::<PresetSlot>().is_err());
        let err = "9".parse::<PresetSlot>().unwrap_err();
        assert!(err.to_string().contains("expected 1-3"));
    }
}
