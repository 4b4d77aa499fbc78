//! Compression profiles for common use cases.
//!
//! Profiles pick a DEFLATE level so users don't have to know the numbers.

use std::fmt;
use std::str::FromStr;

/// Compression profiles for common use cases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// Prioritize speed over container size (DEFLATE level 1).
    Fast,

    /// Balance between speed and size (DEFLATE level 6, default).
    #[default]
    Balanced,

    /// Smallest containers, slower compression (DEFLATE level 9).
    MaxCompression,
}

impl Profile {
    /// Returns the DEFLATE compression level for this profile.
    pub fn compression_level(&self) -> u32 {
        match self {
            Profile::Fast => 1,
            Profile::Balanced => 6,
            Profile::MaxCompression => 9,
        }
    }

    /// Returns all available profile names.
    pub fn variants() -> &'static [&'static str] {
        &["fast", "balanced", "max-compression"]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Fast => write!(f, "fast"),
            Profile::Balanced => write!(f, "balanced"),
            Profile::MaxCompression => write!(f, "max-compression"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Profile::Fast),
            "balanced" | "default" => Ok(Profile::Balanced),
            "max-compression" | "maxcompression" | "max" => Ok(Profile::MaxCompression),
            _ => Err(format!(
                "Unknown profile '{}'. Valid options: {}",
                s,
                Profile::variants().join(", ")
            )),
        }
    }
}
