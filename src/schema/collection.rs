use serde_json::{json, Value};

use super::{require_slug, require_text, Document, Issue, Reference, Slug};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_photo: Option<Reference>,
    #[serde(default)]
    pub photos: Vec<Reference>,
    #[serde(default)]
    pub sort_order: f64,
}

impl Collection {
    /// A new collection of photo documents, the first one doubling as the cover
    pub fn draft(title: &str, slug: &str, photo_ids: &[String]) -> Value {
        let photos: Vec<Value> = photo_ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                json!({
                    "_type": "reference",
                    "_ref": id,
                    "_key": format!("photo-{}", i),
                })
            })
            .collect();

        let mut draft = json!({
            "_type": Self::TYPE_NAME,
            "title": title,
            "slug": { "_type": "slug", "current": slug },
            "photos": photos,
            "sortOrder": 0,
        });
        if let Some(first) = photo_ids.first() {
            draft["coverPhoto"] = json!({ "_type": "reference", "_ref": first });
        }
        draft
    }
}

impl Document for Collection {
    const TYPE_NAME: &'static str = "collection";

    fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        require_text(&mut issues, "title", &self.title);
        require_slug(&mut issues, &self.slug);
        issues
    }
}
