//! Amenity tags attachable to Spätis.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An amenity available at a Späti, e.g. "Sitzplätze" or "Pfandannahme".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    /// Opaque identifier, minted by the admin service on create.
    pub id: String,
    pub name: String,
    /// Public URL of the amenity image; serialised as explicit `null` when
    /// unset, never omitted.
    pub image_url: Option<String>,
}

/// Validation failures for amenity write inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmenityValidationError {
    #[error("amenity name must not be empty")]
    EmptyName,
}

/// Validated scalar input for creating or updating an amenity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmenityInput {
    pub name: String,
}

impl AmenityInput {
    /// Validate and construct an amenity input.
    pub fn new(name: impl Into<String>) -> Result<Self, AmenityValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AmenityValidationError::EmptyName);
        }
        Ok(Self { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rejects_blank_name() {
        assert_eq!(
            AmenityInput::new("  "),
            Err(AmenityValidationError::EmptyName)
        );
    }

    #[rstest]
    fn serialises_missing_image_as_null() {
        let amenity = Amenity {
            id: "amen-1".into(),
            name: "Sitzplätze".into(),
            image_url: None,
        };
        let value = serde_json::to_value(&amenity).expect("serialisable amenity");
        assert_eq!(value.get("imageUrl"), Some(&serde_json::Value::Null));
    }
}
