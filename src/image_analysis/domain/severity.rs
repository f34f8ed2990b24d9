use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Standard scale for measuring how severe a vulnerability is.
///
/// Variants are declared from lowest to highest so the derived ordering
/// matches the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    /// Not yet assigned a priority, or a priority that was not recognized
    #[default]
    Unknown,
    /// Theoretical only, almost no install base or real damage
    Negligible,
    /// Hard to exploit or does very little damage
    Low,
    /// Real problem, exploitable for many people
    Medium,
    /// Exploitable for many people in a default installation
    High,
    /// Exploitable for nearly everyone in a default installation
    Critical,
    /// Critical and manually highlighted for immediate attention
    Defcon1,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("failed to parse severity from input: {0}")]
pub struct ParseSeverityError(String);

impl Severity {
    pub const ALL: [Severity; 7] = [
        Severity::Unknown,
        Severity::Negligible,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
        Severity::Defcon1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unknown => "Unknown",
            Severity::Negligible => "Negligible",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
            Severity::Defcon1 => "Defcon1",
        }
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
