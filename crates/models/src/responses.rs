//! Response envelopes returned by the CMS API.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;
use crate::service::ServiceRecord;

/// Result of a service fetch-by-id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceEnvelope {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub service: Option<ServiceRecord>,
}

/// Entry of the published-services list; only the title is used by forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: Vec<ServiceSummary>,
}

/// One server-side field complaint. Either part may be missing on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MissingField {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MissingField {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: Some(name.into()), message: Some(message.into()) }
    }
}

/// Outcome of a create/update call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "missingFields", default, skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<MissingField>>,
}

impl SubmitResponse {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self { status, message: Some(message.into()), missing_fields: None }
    }

    pub fn with_missing_fields(mut self, fields: Vec<MissingField>) -> Self {
        self.missing_fields = Some(fields);
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, 200 | 201)
    }

    /// Message text, treating an empty string as absent.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_rejection_with_missing_fields() {
        let resp: SubmitResponse = serde_json::from_value(json!({
            "status": 400,
            "message": "Validation failed",
            "missingFields": [{ "name": "title", "message": "Required" }, { "name": "slug" }]
        }))
        .unwrap();
        assert!(!resp.is_success());
        let fields = resp.missing_fields.unwrap();
        assert_eq!(fields[0], MissingField::new("title", "Required"));
        assert_eq!(fields[1].message, None);
    }

    #[test]
    fn success_statuses() {
        assert!(SubmitResponse::new(200, "ok").is_success());
        assert!(SubmitResponse::new(201, "created").is_success());
        assert!(!SubmitResponse::new(204, "").is_success());
        assert_eq!(SubmitResponse::new(500, "").message(), None);
    }

    #[test]
    fn service_list_reads_mongo_ids() {
        let list: ServiceList = serde_json::from_value(json!({
            "services": [{ "_id": "a1", "title": "SEO", "published": true }]
        }))
        .unwrap();
        assert_eq!(list.services[0].id, "a1");
        assert_eq!(list.services[0].title, "SEO");
    }
}
