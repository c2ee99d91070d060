use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Availability of a single storage slot in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationStatus {
    Available,
    Disabled,
}

/// Storage assignment of a schedule entry.
///
/// `Stage` is the catch-all "not yet stored anywhere specific" value.
/// It renders as `"stage"` on the wire and never occupies the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Location {
    #[default]
    Stage,
    Slot(String),
}

impl Location {
    /// Blank and `"stage"` inputs both map to the catch-all.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("stage") {
            Location::Stage
        } else {
            Location::Slot(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Location::Stage => "stage",
            Location::Slot(id) => id,
        }
    }

    /// The slot id, if this points at a real storage slot.
    pub fn slot(&self) -> Option<&str> {
        match self {
            Location::Stage => None,
            Location::Slot(id) => Some(id),
        }
    }

    pub fn is_stage(&self) -> bool {
        matches!(self, Location::Stage)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Location::parse(&raw))
    }
}
