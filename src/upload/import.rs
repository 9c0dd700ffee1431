//! Import a folder of photographs: upload, describe, document, collect

use std::path::Path;

use crate::alt_text::{preview_url, AltTextGenerator};
use crate::constants;
use crate::error::AppError;
use crate::metrics::Metrics;
use crate::naming::{slug_from_collection_title, slug_from_filename, title_from_filename};
use crate::schema::{Collection, Photo};
use crate::store::ContentStore;

use super::{collect_images, file_name, upload_file};

#[derive(Debug, Default)]
pub struct ImportReport {
    pub metrics: Metrics,
    /// Photo documents created, in file name order
    pub photo_ids: Vec<String>,
    pub collection_id: Option<String>,
}

fn import_one<S, G>(store: &S, alt_text: &G, path: &Path) -> Result<String, AppError>
where
    S: ContentStore + ?Sized,
    G: AltTextGenerator + ?Sized,
{
    let filename = file_name(path);
    let title = title_from_filename(&filename);
    let slug = slug_from_filename(&filename);

    // The CDN copy is described rather than the local file to stay under upload limits
    debug!("Uploading {}", filename);
    let asset = upload_file(store, path)?;

    debug!("Generating alt text for {}", asset.id);
    let alt = alt_text.describe(&preview_url(&asset.url))?;
    info!("  Alt: \"{}\"", alt);

    let created = store.create(&Photo::draft(&title, &slug, &asset.id, &alt))?;
    debug!("Created photo document {}", created.id);
    Ok(created.id)
}

/// Import every image in a directory and gather the results into one collection
pub fn import_portfolio<S, G>(
    store: &S,
    alt_text: &G,
    image_directory: &Path,
    collection_title: &str,
) -> Result<ImportReport, AppError>
where
    S: ContentStore + ?Sized,
    G: AltTextGenerator + ?Sized,
{
    let files = collect_images(image_directory, &constants::IMPORT_EXTENSIONS)?;
    let mut report = ImportReport::default();
    if files.is_empty() {
        info!("No images found in {}", image_directory.to_string_lossy());
        return Ok(report);
    }
    info!(
        "Found {} images in {}",
        files.len(),
        image_directory.to_string_lossy()
    );

    for (i, path) in files.iter().enumerate() {
        let filename = file_name(path);
        info!("[{}/{}] {}", i + 1, files.len(), filename);
        match import_one(store, alt_text, path) {
            Ok(id) => {
                report.photo_ids.push(id);
                report.metrics.success();
            }
            Err(e) => {
                warn!("  Failed: {}", e);
                report.metrics.failure(&filename, e);
            }
        }
    }

    if !report.photo_ids.is_empty() {
        info!(
            "Creating \"{}\" collection with {} photos",
            collection_title,
            report.photo_ids.len()
        );
        let draft = Collection::draft(
            collection_title,
            &slug_from_collection_title(collection_title),
            &report.photo_ids,
        );
        match store.create(&draft) {
            Ok(created) => report.collection_id = Some(created.id),
            // The photos are already in place, so a missing collection is not fatal
            Err(e) => error!("Failed to create collection: {}", e),
        }
    }

    Ok(report)
}
