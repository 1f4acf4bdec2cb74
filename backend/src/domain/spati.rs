//! Späti locations and their composite read shape.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Amenity, Mood};

/// A Späti with its relations attached: the amenity set joined through the
/// junction table and the optional mood.
///
/// ## Serialisation contract
/// `amenities` is always a list (empty, never null) and `mood`/`imageUrl`
/// are always present (explicit `null` when unset). Clients rely on this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Spati {
    /// Opaque identifier, minted by the admin service on create.
    pub id: String,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    /// Free-form opening hours text, e.g. "24/7".
    pub hours: String,
    /// Store category, e.g. "kiosk".
    #[serde(rename = "type")]
    pub store_type: String,
    pub rating: f64,
    /// Public URL of the Späti image.
    pub image_url: Option<String>,
    pub mood: Option<Mood>,
    pub amenities: Vec<Amenity>,
}

/// Validation failures for Späti write inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpatiValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("rating {0} is outside [0, 5]")]
    RatingOutOfRange(f64),
}

/// Unvalidated scalar fields for a Späti write, as parsed from a request.
#[derive(Debug, Clone, Default)]
pub struct SpatiDraft {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub hours: String,
    pub store_type: String,
    pub rating: f64,
    pub mood_id: Option<String>,
    /// Amenities assigned to this Späti. Omitting the list on update clears
    /// the set; callers must resend the full current set to keep it.
    pub amenity_ids: Vec<String>,
}

/// Validated input for creating or updating a Späti.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatiInput {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub hours: String,
    pub store_type: String,
    pub rating: f64,
    pub mood_id: Option<String>,
    pub amenity_ids: Vec<String>,
}

impl TryFrom<SpatiDraft> for SpatiInput {
    type Error = SpatiValidationError;

    fn try_from(draft: SpatiDraft) -> Result<Self, Self::Error> {
        for (field, value) in [
            ("name", &draft.name),
            ("description", &draft.description),
            ("address", &draft.address),
            ("hours", &draft.hours),
            ("type", &draft.store_type),
        ] {
            if value.trim().is_empty() {
                return Err(SpatiValidationError::EmptyField { field });
            }
        }
        if !(-90.0..=90.0).contains(&draft.latitude) {
            return Err(SpatiValidationError::LatitudeOutOfRange(draft.latitude));
        }
        if !(-180.0..=180.0).contains(&draft.longitude) {
            return Err(SpatiValidationError::LongitudeOutOfRange(draft.longitude));
        }
        if !(0.0..=5.0).contains(&draft.rating) {
            return Err(SpatiValidationError::RatingOutOfRange(draft.rating));
        }
        Ok(Self {
            name: draft.name,
            description: draft.description,
            latitude: draft.latitude,
            longitude: draft.longitude,
            address: draft.address,
            hours: draft.hours,
            store_type: draft.store_type,
            rating: draft.rating,
            mood_id: draft.mood_id,
            amenity_ids: draft.amenity_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft() -> SpatiDraft {
        SpatiDraft {
            name: "Test Spot".into(),
            description: "d".into(),
            latitude: 52.5,
            longitude: 13.4,
            address: "a".into(),
            hours: "24/7".into(),
            store_type: "kiosk".into(),
            rating: 4.0,
            mood_id: None,
            amenity_ids: vec!["amen-1".into()],
        }
    }

    #[rstest]
    fn valid_draft_converts() {
        let input = SpatiInput::try_from(draft()).expect("valid draft");
        assert_eq!(input.name, "Test Spot");
        assert_eq!(input.amenity_ids, vec!["amen-1".to_owned()]);
    }

    #[rstest]
    #[case(91.0)]
    #[case(-90.5)]
    fn rejects_latitude_out_of_range(#[case] latitude: f64) {
        let spati = SpatiDraft { latitude, ..draft() };
        assert!(matches!(
            SpatiInput::try_from(spati),
            Err(SpatiValidationError::LatitudeOutOfRange(_))
        ));
    }

    #[rstest]
    #[case(181.0)]
    #[case(-180.5)]
    fn rejects_longitude_out_of_range(#[case] longitude: f64) {
        let spati = SpatiDraft { longitude, ..draft() };
        assert!(matches!(
            SpatiInput::try_from(spati),
            Err(SpatiValidationError::LongitudeOutOfRange(_))
        ));
    }

    #[rstest]
    fn rejects_rating_above_five() {
        let spati = SpatiDraft {
            rating: 5.5,
            ..draft()
        };
        assert!(matches!(
            SpatiInput::try_from(spati),
            Err(SpatiValidationError::RatingOutOfRange(_))
        ));
    }

    #[rstest]
    fn rejects_blank_required_field() {
        let spati = SpatiDraft {
            name: String::new(),
            ..draft()
        };
        assert_eq!(
            SpatiInput::try_from(spati),
            Err(SpatiValidationError::EmptyField { field: "name" })
        );
    }

    #[rstest]
    fn serialises_store_type_as_type() {
        let spati = Spati {
            id: "sp-1".into(),
            name: "Test Spot".into(),
            description: "d".into(),
            latitude: 52.5,
            longitude: 13.4,
            address: "a".into(),
            hours: "24/7".into(),
            store_type: "kiosk".into(),
            rating: 4.0,
            image_url: None,
            mood: None,
            amenities: Vec::new(),
        };
        let value = serde_json::to_value(&spati).expect("serialisable spati");
        assert_eq!(value.get("type"), Some(&serde_json::json!("kiosk")));
        assert_eq!(value.get("mood"), Some(&serde_json::Value::Null));
        assert_eq!(value.get("imageUrl"), Some(&serde_json::Value::Null));
        assert_eq!(value.get("amenities"), Some(&serde_json::json!([])));
    }
}
