use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::image::ImageSource;

use super::{require_slug, require_text, Document, Issue, Slug};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub image: Option<ImageSource>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date_taken: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Photo {
    /// A new photo document pointing at an uploaded asset
    pub fn draft(title: &str, slug: &str, asset_id: &str, alt: &str) -> Value {
        json!({
            "_type": Self::TYPE_NAME,
            "title": title,
            "slug": { "_type": "slug", "current": slug },
            "image": {
                "_type": "image",
                "asset": { "_type": "reference", "_ref": asset_id },
                "alt": alt,
            },
            "featured": false,
        })
    }
}

impl Document for Photo {
    const TYPE_NAME: &'static str = "photo";

    fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        require_text(&mut issues, "title", &self.title);
        require_slug(&mut issues, &self.slug);
        match &self.image {
            None => issues.push(Issue::error("image", "Required")),
            Some(image) => {
                if image.alt.as_deref().map_or(true, |alt| alt.trim().is_empty()) {
                    issues.push(Issue::warning(
                        "image.alt",
                        "Alt text is crucial for accessibility",
                    ));
                }
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_is_valid() {
        let draft = Photo::draft("Boy Field Grass", "boy-field-grass", "image-abc-10x10-jpg", "Boy Field Grass");
        let photo: Photo = serde_json::from_value(draft).unwrap();
        assert!(photo.validate().is_empty());
        assert!(!photo.featured);
        assert_eq!(photo.image.unwrap().asset.id, "image-abc-10x10-jpg");
    }

    #[test]
    fn test_missing_fields() {
        let photo: Photo = serde_json::from_value(json!({ "_type": "photo" })).unwrap();
        assert_eq!(
            photo.validate(),
            vec![
                Issue::error("title", "Required"),
                Issue::error("slug", "Required"),
                Issue::error("image", "Required"),
            ]
        );
    }

    #[test]
    fn test_missing_alt_is_a_warning() {
        let photo: Photo = serde_json::from_value(json!({
            "title": "Dusk",
            "slug": { "current": "dusk" },
            "image": { "asset": { "_ref": "image-abc-10x10-jpg" } },
            "dateTaken": "2024-03-20",
        }))
        .unwrap();
        let issues = photo.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        assert_eq!(photo.date_taken, NaiveDate::from_ymd_opt(2024, 3, 20));
    }
}
