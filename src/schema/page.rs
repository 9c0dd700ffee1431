use crate::image::ImageSource;

use super::{max_items, Document, Issue, Reference, Slug};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub og_image: Option<ImageSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub seo: Option<Seo>,
    /// May contain inline HTML
    #[serde(default)]
    pub hero_heading: Option<String>,
    #[serde(default)]
    pub hero_images: Vec<Reference>,
    #[serde(default)]
    pub featured_collections: Vec<Reference>,
}

impl Document for Page {
    const TYPE_NAME: &'static str = "page";

    fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        max_items(&mut issues, "heroImages", self.hero_images.len(), 2);
        issues
    }
}
