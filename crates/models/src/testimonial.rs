use serde::{Deserialize, Serialize};

use crate::de::{default_true, lenient_rating, null_as_default, null_as_true};
use crate::errors::ModelError;
use crate::rating::Rating;

/// Editable testimonial. `service` holds the service *title*, not its id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestimonialRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<Rating>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub published: bool,
}

impl Default for TestimonialRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            service: String::new(),
            location: String::new(),
            date: String::new(),
            rating: None,
            description: String::new(),
            published: true,
        }
    }
}

/// JSON body of a testimonial create/update call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestimonialPayload {
    pub name: String,
    pub service: String,
    pub location: String,
    pub date: String,
    pub rating: Rating,
    pub description: String,
    pub published: bool,
}

impl TryFrom<&TestimonialRecord> for TestimonialPayload {
    type Error = ModelError;

    fn try_from(rec: &TestimonialRecord) -> Result<Self, Self::Error> {
        let rating = rec.rating.ok_or_else(|| ModelError::Validation("rating is required".into()))?;
        Ok(Self {
            name: rec.name.clone(),
            service: rec.service.clone(),
            location: rec.location.clone(),
            date: rec.date.clone(),
            rating,
            description: rec.description.clone(),
            published: rec.published,
        })
    }
}
