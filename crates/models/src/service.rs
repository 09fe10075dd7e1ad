use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// A service page as the CMS API exposes it.
///
/// Every field tolerates absence or `null` on load. The three nested
/// sections are always materialised so form bindings stay stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "metaDescription", default, deserialize_with = "null_as_default")]
    pub meta_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detail: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
    #[serde(rename = "faqs", default, deserialize_with = "null_as_default")]
    pub faq: Faq,
    #[serde(rename = "how_we_delivered", default, deserialize_with = "null_as_default")]
    pub delivery: DeliveryInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video: VideoInfo,
}

impl ServiceRecord {
    /// Starting state of a new service: empty, but visible once saved.
    pub fn blank() -> Self {
        Self { published: true, ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
}

/// "How we delivered" section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeliveryInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_and_null_fields_fall_back_to_blank() {
        let rec: ServiceRecord = serde_json::from_value(json!({
            "_id": "65f0",
            "title": "Web Design",
            "slug": null,
            "faqs": null,
            "video": { "url": "https://youtu.be/x" }
        }))
        .unwrap();
        assert_eq!(rec.title, "Web Design");
        assert_eq!(rec.slug, "");
        assert_eq!(rec.meta_description, "");
        assert!(!rec.published);
        assert_eq!(rec.faq, Faq::default());
        assert_eq!(rec.delivery, DeliveryInfo::default());
        assert_eq!(rec.video.url, "https://youtu.be/x");
        assert_eq!(rec.video.description, "");
    }

    #[test]
    fn wire_names_match_api() {
        let rec: ServiceRecord = serde_json::from_value(json!({
            "metaDescription": "meta",
            "short_description": "short",
            "how_we_delivered": { "image": "https://cdn/x.png", "published": true }
        }))
        .unwrap();
        assert_eq!(rec.meta_description, "meta");
        assert_eq!(rec.short_description, "short");
        assert_eq!(rec.delivery.image, "https://cdn/x.png");
        assert!(rec.delivery.published);
    }

    #[test]
    fn blank_record_is_public() {
        let rec = ServiceRecord::blank();
        assert!(rec.published);
        assert!(!rec.faq.published);
        assert_eq!(rec.title, "");
    }
}
