//! Batch jobs that push images and documents into the content store

pub mod backfill;
pub mod import;

use std::ffi::OsStr;
use std::fs::{metadata, read_dir};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use crate::constants;
use crate::error::AppError;
use crate::metrics::Metrics;
use crate::store::{ContentStore, UploadedAsset};

/// Regular files in `directory` with one of `extensions`, sorted by name
pub fn collect_images(directory: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, AppError> {
    let mut files = read_dir(directory)?
        .filter_map(|result| result.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(OsStr::to_str)
                .map(|extension| extension.to_lowercase())
                .is_some_and(|extension| extensions.contains(&extension.as_str()))
        })
        .collect::<Vec<PathBuf>>();
    files.sort();
    Ok(files)
}

/// Content type from the file extension, JPEG when unknown
pub fn mime_type(path: &Path) -> &'static str {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|extension| extension.to_lowercase())
        .and_then(|extension| constants::MIME_TABLE.get(extension.as_str()).copied())
        .unwrap_or("image/jpeg")
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub(crate) fn upload_file<S: ContentStore + ?Sized>(
    store: &S,
    path: &Path,
) -> Result<UploadedAsset, AppError> {
    let bytes = std::fs::read(path)?;
    store.upload_image(&file_name(path), mime_type(path), bytes)
}

/// Upload every image in a directory, carrying on past failures
pub fn upload_images<S: ContentStore + ?Sized>(
    store: &S,
    image_directory: &Path,
) -> Result<Metrics, AppError> {
    let files = collect_images(image_directory, &constants::UPLOAD_EXTENSIONS)?;
    info!(
        "Found {} image(s) to upload from {}",
        files.len(),
        image_directory.to_string_lossy()
    );

    let total_size: u64 = files
        .iter()
        .filter_map(|path| metadata(path).ok())
        .map(|a| a.len())
        .sum();

    let mut m = Metrics::default();
    let progress_bar = ProgressBar::new(total_size);
    for path in files {
        let name = file_name(&path);
        let size = metadata(&path).map(|meta| meta.len()).unwrap_or(0);
        match upload_file(store, &path) {
            Ok(asset) => {
                info!("Uploaded {} ({})", name, asset.id);
                m.success();
            }
            Err(e) => {
                warn!("Failed to upload {}: {}", name, e);
                m.failure(&name, e);
            }
        }
        progress_bar.inc(size);
    }
    progress_bar.finish_and_clear();
    Ok(m)
}
