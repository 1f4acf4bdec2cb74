//! Mood taxonomy: at most one mood per Späti.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A mood a Späti can carry, e.g. "Kiezperle" with its accent colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mood {
    /// Opaque identifier, minted by the admin service on create.
    pub id: String,
    pub name: String,
    /// Accent colour as a hex string, e.g. `#6b46ff`.
    pub color: String,
    /// Public URL of the mood image; serialised as explicit `null` when
    /// unset, never omitted.
    pub image_url: Option<String>,
}

/// Validation failures for mood write inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoodValidationError {
    #[error("mood name must not be empty")]
    EmptyName,
    #[error("mood colour must be a hex string like #6b46ff, got {value:?}")]
    InvalidColor { value: String },
}

/// Validated scalar input for creating or updating a mood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodInput {
    pub name: String,
    pub color: String,
}

impl MoodInput {
    /// Validate and construct a mood input.
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<Self, MoodValidationError> {
        let name = name.into();
        let color = color.into();
        if name.trim().is_empty() {
            return Err(MoodValidationError::EmptyName);
        }
        if !is_hex_color(&color) {
            return Err(MoodValidationError::InvalidColor { value: color });
        }
        Ok(Self { name, color })
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#6b46ff")]
    #[case("#ABC")]
    fn accepts_valid_colours(#[case] color: &str) {
        assert!(MoodInput::new("Kiezperle", color).is_ok());
    }

    #[rstest]
    #[case("6b46ff")]
    #[case("#6b46f")]
    #[case("#zzzzzz")]
    #[case("")]
    fn rejects_invalid_colours(#[case] color: &str) {
        assert!(matches!(
            MoodInput::new("Kiezperle", color),
            Err(MoodValidationError::InvalidColor { .. })
        ));
    }

    #[rstest]
    fn rejects_blank_name() {
        assert_eq!(
            MoodInput::new(" ", "#ffffff"),
            Err(MoodValidationError::EmptyName)
        );
    }
}
