//! Names of the built-in system prompts.
//!
//! The catalog is closed: parsing an unrecognized name yields an explicit
//! [`UnknownPromptType`] error instead of silently falling back to the
//! default prompt. The prompt texts themselves live in `parley-core`.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// A predefined system prompt category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    Default,
    Programming,
    Writing,
    Education,
}

impl PromptType {
    /// Every prompt type, in catalog order.
    pub const ALL: [PromptType; 4] = [
        PromptType::Default,
        PromptType::Programming,
        PromptType::Writing,
        PromptType::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptType::Default => "default",
            PromptType::Programming => "programming",
            PromptType::Writing => "writing",
            PromptType::Education => "education",
        }
    }
}

impl fmt::Display for PromptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a prompt name is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown prompt type: '{0}'")]
pub struct UnknownPromptType(pub String);

impl FromStr for PromptType {
    type Err = UnknownPromptType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromptType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPromptType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_type_roundtrip() {
        for pt in PromptType::ALL {
            let parsed: PromptType = pt.to_string().parse().unwrap();
            assert_eq!(pt, parsed);
        }
    }

    #[test]
    fn test_unknown_prompt_type() {
        let err = "poetry".parse::<PromptType>().unwrap_err();
        assert_eq!(err, UnknownPromptType("poetry".to_string()));
        assert_eq!(err.to_string(), "unknown prompt type: 'poetry'");
    }

    #[test]
    fn test_prompt_type_names_are_case_sensitive() {
        assert!("Programming".parse::<PromptType>().is_err());
    }

    #[test]
    fn test_prompt_type_serde() {
        let json = serde_json::to_string(&PromptType::Writing).unwrap();
        assert_eq!(json, "\"writing\"");
    }
}
