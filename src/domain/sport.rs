// src/domain/sport.rs
//
// Closed set of sport categories shared by events and venues.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::DomainError;

/// Sport category of an event, or one of the sports a venue supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SportType {
    Soccer,
    Basketball,
    Tennis,
    Baseball,
    Football,
    Hockey,
    Volleyball,
    Golf,
    Swimming,
    Other,
}

impl SportType {
    /// Every sport, in display order.
    pub const ALL: [SportType; 10] = [
        SportType::Soccer,
        SportType::Basketball,
        SportType::Tennis,
        SportType::Baseball,
        SportType::Football,
        SportType::Hockey,
        SportType::Volleyball,
        SportType::Golf,
        SportType::Swimming,
        SportType::Other,
    ];

    /// Name used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SportType::Soccer => "soccer",
            SportType::Basketball => "basketball",
            SportType::Tennis => "tennis",
            SportType::Baseball => "baseball",
            SportType::Football => "football",
            SportType::Hockey => "hockey",
            SportType::Volleyball => "volleyball",
            SportType::Golf => "golf",
            SportType::Swimming => "swimming",
            SportType::Other => "other",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SportType::Soccer => "Soccer",
            SportType::Basketball => "Basketball",
            SportType::Tennis => "Tennis",
            SportType::Baseball => "Baseball",
            SportType::Football => "Football",
            SportType::Hockey => "Hockey",
            SportType::Volleyball => "Volleyball",
            SportType::Golf => "Golf",
            SportType::Swimming => "Swimming",
            SportType::Other => "Other",
        }
    }
}

impl std::fmt::Display for SportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SportType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SportType::ALL
            .iter()
            .copied()
            .find(|sport| sport.as_str() == s)
            .ok_or_else(|| DomainError::UnknownSport(s.to_string()))
    }
}

/// Sport restriction applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SportFilter {
    #[default]
    All,
    Only(SportType),
}

impl SportFilter {
    /// Sentinel accepted in place of a sport name meaning "no restriction".
    pub const ALL_SENTINEL: &'static str = "all";

    /// Parse an optional filter value.
    ///
    /// Absent, blank and `"all"` mean no restriction; anything else must name a sport.
    pub fn parse(value: Option<&str>) -> Result<Self, DomainError> {
        match value.map(str::trim) {
            None | Some("") | Some(Self::ALL_SENTINEL) => Ok(SportFilter::All),
            Some(name) => name.parse().map(SportFilter::Only),
        }
    }

    pub fn sport(&self) -> Option<SportType> {
        match self {
            SportFilter::All => None,
            SportFilter::Only(sport) => Some(*sport),
        }
    }
}

impl From<SportType> for SportFilter {
    fn from(sport: SportType) -> Self {
        SportFilter::Only(sport)
    }
}
