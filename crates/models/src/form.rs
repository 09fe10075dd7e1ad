//! Multipart-style encoding of a service record.
//!
//! Nested sections are flattened to bracketed keys (`faqs[title]`) and
//! booleans to `"true"`/`"false"`, matching what the CMS API parses.

use crate::service::ServiceRecord;

/// Ordered text parts of a service submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceForm {
    parts: Vec<(String, String)>,
}

impl ServiceForm {
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parts.push((key.into(), value.into()));
    }

    /// First value appended under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.parts.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize { self.parts.len() }

    pub fn is_empty(&self) -> bool { self.parts.is_empty() }
}

impl IntoIterator for ServiceForm {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter { self.parts.into_iter() }
}

impl From<&ServiceRecord> for ServiceForm {
    fn from(rec: &ServiceRecord) -> Self {
        let mut form = ServiceForm::default();
        form.append("title", rec.title.as_str());
        form.append("description", rec.description.as_str());
        form.append("short_description", rec.short_description.as_str());
        form.append("metaDescription", rec.meta_description.as_str());
        form.append("slug", rec.slug.as_str());
        form.append("detail", rec.detail.as_str());
        form.append("published", rec.published.to_string());

        form.append("faqs[title]", rec.faq.title.as_str());
        form.append("faqs[description]", rec.faq.description.as_str());
        form.append("faqs[published]", rec.faq.published.to_string());

        form.append("how_we_delivered[description]", rec.delivery.description.as_str());
        form.append("how_we_delivered[image]", rec.delivery.image.as_str());
        form.append("how_we_delivered[published]", rec.delivery.published.to_string());

        form.append("video[description]", rec.video.description.as_str());
        form.append("video[url]", rec.video.url.as_str());
        form.append("video[published]", rec.video.published.to_string());
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_every_field_with_bracketed_nested_keys() {
        let mut rec = ServiceRecord::blank();
        rec.title = "SEO".into();
        rec.faq.published = true;
        rec.video.url = "https://youtu.be/abc".into();

        let form = ServiceForm::from(&rec);
        assert_eq!(form.len(), 16);
        assert_eq!(form.get("title"), Some("SEO"));
        assert_eq!(form.get("published"), Some("true"));
        assert_eq!(form.get("faqs[published]"), Some("true"));
        assert_eq!(form.get("how_we_delivered[published]"), Some("false"));
        assert_eq!(form.get("video[url]"), Some("https://youtu.be/abc"));
        assert_eq!(form.get("metaDescription"), Some(""));
    }
}
