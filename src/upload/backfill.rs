//! Create photo documents for uploaded assets that have none

use std::collections::HashSet;

use indicatif::ProgressBar;
use serde_json::Value;

use crate::error::AppError;
use crate::metrics::Metrics;
use crate::naming::{slug_from_title, title_from_filename};
use crate::schema::{Document, Photo};
use crate::store::{fetch, ContentStore};

pub const IMAGE_ASSETS: &str = r#"*[_type == "sanity.imageAsset"]{ _id, originalFilename }"#;
pub const PHOTO_ASSETS: &str = r#"*[_type == "photo"]{ image { asset->{ _id, originalFilename } } }"#;

#[derive(Debug, Deserialize)]
struct AssetRecord {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "originalFilename", default)]
    original_filename: Option<String>,
}

fn referenced_asset_ids<S: ContentStore + ?Sized>(store: &S) -> Result<HashSet<String>, AppError> {
    let photos: Option<Vec<Value>> = fetch(store, PHOTO_ASSETS, &[])?;
    Ok(photos
        .unwrap_or_default()
        .iter()
        .filter_map(|photo| photo.pointer("/image/asset/_id"))
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect())
}

/// Backfill photo documents. Title and alt text come from the file name.
pub fn create_missing_photo_docs<S: ContentStore + ?Sized>(store: &S) -> Result<Metrics, AppError> {
    info!("Fetching uploaded image assets");
    let assets: Option<Vec<AssetRecord>> = fetch(store, IMAGE_ASSETS, &[])?;
    let assets = assets.unwrap_or_default();
    info!("Found {} assets", assets.len());

    let existing = referenced_asset_ids(store)?;
    let to_create: Vec<&AssetRecord> = assets
        .iter()
        .filter(|asset| !existing.contains(&asset.id))
        .collect();
    info!(
        "{} already have {} documents. Creating {} new documents.",
        existing.len(),
        Photo::TYPE_NAME,
        to_create.len()
    );

    let mut m = Metrics::default();
    let progress_bar = ProgressBar::new(to_create.len() as u64);
    for asset in to_create {
        let filename = asset.original_filename.as_deref().unwrap_or(&asset.id);
        let title = title_from_filename(filename);
        let slug = slug_from_title(&title);

        match store.create(&Photo::draft(&title, &slug, &asset.id, &title)) {
            Ok(created) => {
                debug!("Created \"{}\" ({})", title, created.id);
                m.success();
            }
            Err(e) => {
                warn!("Failed to create \"{}\": {}", title, e);
                m.failure(&title, e);
            }
        }
        progress_bar.inc(1);
    }
    progress_bar.finish_and_clear();
    Ok(m)
}
