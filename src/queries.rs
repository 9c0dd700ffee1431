//! Read queries that shape content for page rendering

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::AppError;
use crate::image::ImageSource;
use crate::schema::{BodyBlock, SiteSettings, Stanza};
use crate::schema::poem::Epigraph;
use crate::store::{fetch, ContentStore};

pub const SITE_SETTINGS: &str = r#"*[_type == "siteSettings"][0]{
    siteName,
    navLinks,
    footer
  }"#;

pub const HOME_PAGE: &str = r#"*[_type == "page" && slug.current == "/"][0]{
    heroHeading,
    "heroImages": heroImages[]->image,
    "featuredCollections": featuredCollections[]->{
      title,
      subtitle,
      description,
      "slug": slug.current,
      "image": coverPhoto->image,
      "alt": coverPhoto->alt
    }
  }"#;

pub const COLLECTION_PATHS: &str = r#"*[_type == "collection" && defined(slug.current)][].slug.current"#;

pub const COLLECTION: &str = r#"*[_type == "collection" && slug.current == $slug][0]{
    title,
    subtitle,
    description,
    "slug": slug.current,
    "photos": photos[]->{
      title,
      "image": image,
      "alt": image.alt,
      "slug": slug.current,
      dateTaken,
      location
    }
  }"#;

pub const PHOTO_PATHS: &str = r#"*[_type == "photo" && defined(slug.current)][].slug.current"#;

pub const PHOTO: &str = r#"*[_type == "photo" && slug.current == $slug][0]{
    title,
    "slug": slug.current,
    "image": image,
    "alt": image.alt,
    caption,
    location,
    dateTaken,
    tags,
    "relatedCollections": *[_type == "collection" && references(^._id)]{
      title,
      "slug": slug.current
    }
  }"#;

pub const ARCHIVE_PHOTOS: &str = r#"*[_type == "photo"] | order(dateTaken desc) {
    title,
    "slug": slug.current,
    "image": image,
    "alt": image.alt,
    dateTaken,
    location
  }"#;

pub const ESSAY_SUMMARIES: &str = r#"*[_type == "essay"] | order(publishedAt desc) {
    "type": "essay",
    title,
    "slug": slug.current,
    deck,
    publishedAt,
    readingTime,
    tags
  }"#;

pub const POEM_SUMMARIES: &str = r#"*[_type == "poem"] | order(publishedAt desc) {
    "type": "poem",
    title,
    "slug": slug.current,
    form,
    location,
    publishedAt,
    tags
  }"#;

pub const ESSAY_PATHS: &str = r#"*[_type == "essay" && defined(slug.current)][].slug.current"#;

pub const ESSAY: &str = r#"*[_type == "essay" && slug.current == $slug][0]{
    title,
    "slug": slug.current,
    deck,
    category,
    publishedAt,
    readingTime,
    tags,
    heroImage,
    body,
    "relatedEssays": relatedEssays[]->{
      title,
      "slug": slug.current,
      deck,
      "heroImage": heroImage
    }
  }"#;

pub const POEM_PATHS: &str = r#"*[_type == "poem" && defined(slug.current)][].slug.current"#;

pub const POEM: &str = r#"*[_type == "poem" && slug.current == $slug][0]{
    title,
    "slug": slug.current,
    publishedAt,
    form,
    location,
    tags,
    epigraph,
    stanzas,
    poetsNote,
    "relatedPoems": relatedPoems[]->{
      title,
      "slug": slug.current,
      publishedAt,
      form
    }
  }"#;

/// Projections return `null` for missing arrays and for dangling references inside them
fn present<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedCollection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image: Option<ImageSource>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    #[serde(default)]
    pub hero_heading: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub hero_images: Vec<ImageSource>,
    #[serde(default, deserialize_with = "present")]
    pub featured_collections: Vec<FeaturedCollection>,
}

/// A photo as shown in a grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCard {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image: Option<ImageSource>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub date_taken: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub photos: Vec<PhotoCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedDocument {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image: Option<ImageSource>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date_taken: Option<NaiveDate>,
    #[serde(default, deserialize_with = "present")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "present")]
    pub related_collections: Vec<LinkedDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssaySummary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub deck: Option<String>,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
    #[serde(default)]
    pub reading_time: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemSummary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "present")]
    pub tags: Vec<String>,
}

/// An entry on the writing index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WritingEntry {
    Essay(EssaySummary),
    Poem(PoemSummary),
}

impl WritingEntry {
    pub fn published_at(&self) -> Option<NaiveDate> {
        match self {
            WritingEntry::Essay(essay) => essay.published_at,
            WritingEntry::Poem(poem) => poem.published_at,
        }
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            WritingEntry::Essay(essay) => essay.slug.as_deref(),
            WritingEntry::Poem(poem) => poem.slug.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedEssay {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub deck: Option<String>,
    #[serde(default)]
    pub hero_image: Option<ImageSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub deck: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
    #[serde(default)]
    pub reading_time: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub hero_image: Option<ImageSource>,
    #[serde(default, deserialize_with = "present")]
    pub body: Vec<BodyBlock>,
    #[serde(default, deserialize_with = "present")]
    pub related_essays: Vec<RelatedEssay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPoem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
    #[serde(default)]
    pub form: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub epigraph: Option<Epigraph>,
    #[serde(default, deserialize_with = "present")]
    pub stanzas: Vec<Stanza>,
    #[serde(default)]
    pub poets_note: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub related_poems: Vec<RelatedPoem>,
}

fn slug_param(slug: &str) -> [(&'static str, Value); 1] {
    [("slug", Value::from(slug))]
}

fn paths<S: ContentStore + ?Sized>(store: &S, query: &str) -> Result<Vec<String>, AppError> {
    let slugs: Option<Vec<Option<String>>> = fetch(store, query, &[])?;
    Ok(slugs.unwrap_or_default().into_iter().flatten().collect())
}

pub fn site_settings<S: ContentStore + ?Sized>(store: &S) -> Result<Option<SiteSettings>, AppError> {
    fetch(store, SITE_SETTINGS, &[])
}

pub fn home_page<S: ContentStore + ?Sized>(store: &S) -> Result<Option<HomePage>, AppError> {
    fetch(store, HOME_PAGE, &[])
}

pub fn collection_paths<S: ContentStore + ?Sized>(store: &S) -> Result<Vec<String>, AppError> {
    paths(store, COLLECTION_PATHS)
}

pub fn collection<S: ContentStore + ?Sized>(
    store: &S,
    slug: &str,
) -> Result<Option<CollectionDetail>, AppError> {
    fetch(store, COLLECTION, &slug_param(slug))
}

pub fn photo_paths<S: ContentStore + ?Sized>(store: &S) -> Result<Vec<String>, AppError> {
    paths(store, PHOTO_PATHS)
}

pub fn photo<S: ContentStore + ?Sized>(store: &S, slug: &str) -> Result<Option<PhotoDetail>, AppError> {
    fetch(store, PHOTO, &slug_param(slug))
}

pub fn archive_photos<S: ContentStore + ?Sized>(store: &S) -> Result<Vec<PhotoCard>, AppError> {
    let photos: Option<Vec<Option<PhotoCard>>> = fetch(store, ARCHIVE_PHOTOS, &[])?;
    Ok(photos.unwrap_or_default().into_iter().flatten().collect())
}

/// Newest first, undated entries last
fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Essays and poems together, newest first
pub fn writing_index<S: ContentStore + ?Sized>(store: &S) -> Result<Vec<WritingEntry>, AppError> {
    let essays: Option<Vec<WritingEntry>> = fetch(store, ESSAY_SUMMARIES, &[])?;
    let poems: Option<Vec<WritingEntry>> = fetch(store, POEM_SUMMARIES, &[])?;
    let mut entries: Vec<WritingEntry> = essays
        .unwrap_or_default()
        .into_iter()
        .chain(poems.unwrap_or_default())
        .collect();
    entries.sort_by(|a, b| newest_first(a.published_at(), b.published_at()));
    Ok(entries)
}

pub fn essay_paths<S: ContentStore + ?Sized>(store: &S) -> Result<Vec<String>, AppError> {
    paths(store, ESSAY_PATHS)
}

pub fn essay<S: ContentStore + ?Sized>(store: &S, slug: &str) -> Result<Option<EssayDetail>, AppError> {
    fetch(store, ESSAY, &slug_param(slug))
}

pub fn poem_paths<S: ContentStore + ?Sized>(store: &S) -> Result<Vec<String>, AppError> {
    paths(store, POEM_PATHS)
}

pub fn poem<S: ContentStore + ?Sized>(store: &S, slug: &str) -> Result<Option<PoemDetail>, AppError> {
    fetch(store, POEM, &slug_param(slug))
}

/// Run a query by name and hand back the shaped result as JSON
pub fn by_name<S: ContentStore + ?Sized>(
    store: &S,
    name: &str,
    slug: Option<&str>,
) -> Result<Value, AppError> {
    let need_slug = || {
        slug.ok_or_else(|| AppError::InvalidConfiguration(format!("query `{}` needs a slug", name)))
    };
    let value = match name {
        "site-settings" => serde_json::to_value(site_settings(store)?)?,
        "home" => serde_json::to_value(home_page(store)?)?,
        "collection-paths" => serde_json::to_value(collection_paths(store)?)?,
        "collection" => serde_json::to_value(collection(store, need_slug()?)?)?,
        "photo-paths" => serde_json::to_value(photo_paths(store)?)?,
        "photo" => serde_json::to_value(photo(store, need_slug()?)?)?,
        "archive" => serde_json::to_value(archive_photos(store)?)?,
        "writing" => serde_json::to_value(writing_index(store)?)?,
        "essay-paths" => serde_json::to_value(essay_paths(store)?)?,
        "essay" => serde_json::to_value(essay(store, need_slug()?)?)?,
        "poem-paths" => serde_json::to_value(poem_paths(store)?)?,
        "poem" => serde_json::to_value(poem(store, need_slug()?)?)?,
        other => {
            return Err(AppError::InvalidConfiguration(format!(
                "unknown query `{}`, expected one of {}",
                other,
                QUERY_NAMES.join(", ")
            )))
        }
    };
    Ok(value)
}

pub const QUERY_NAMES: [&str; 12] = [
    "site-settings",
    "home",
    "collection-paths",
    "collection",
    "photo-paths",
    "photo",
    "archive",
    "writing",
    "essay-paths",
    "essay",
    "poem-paths",
    "poem",
];
