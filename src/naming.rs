//! Titles and slugs derived from image file names

use std::path::Path;

use regex::Regex;

use crate::constants::SLUG_MAX_LENGTH;

lazy_static::lazy_static! {
    static ref EXTENSION: Regex = Regex::new(r"\.[^.]+$").unwrap();
    static ref SEPARATORS: Regex = Regex::new(r"[_-]+").unwrap();
    static ref WORD_START: Regex = Regex::new(r"\b\w").unwrap();
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    static ref UNDERSCORES_OR_SPACES: Regex = Regex::new(r"[_\s]+").unwrap();
    static ref NOT_SLUG_SAFE: Regex = Regex::new(r"[^a-z0-9-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// `boy_field_grass.jpg` becomes `Boy Field Grass`
pub fn title_from_filename(filename: &str) -> String {
    let stem = EXTENSION.replace(filename, "");
    let spaced = SEPARATORS.replace_all(&stem, " ");
    WORD_START
        .replace_all(&spaced, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}

/// `Boy Field Grass` becomes `boy-field-grass`
pub fn slug_from_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let slug = NON_ALPHANUMERIC.replace_all(&lowered, "-");
    truncate_slug(slug.trim_start_matches('-'))
        .trim_end_matches('-')
        .to_owned()
}

/// Slug straight from a file name, keeping existing dashes: `Boy_Field-2.jpg` becomes `boy-field-2`
pub fn slug_from_filename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let lowered = stem.to_lowercase();
    let dashed = UNDERSCORES_OR_SPACES.replace_all(&lowered, "-");
    truncate_slug(&NOT_SLUG_SAFE.replace_all(&dashed, ""))
}

/// Collection slugs only collapse whitespace
pub fn slug_from_collection_title(title: &str) -> String {
    truncate_slug(&WHITESPACE.replace_all(&title.to_lowercase(), "-"))
}

fn truncate_slug(slug: &str) -> String {
    slug.chars().take(SLUG_MAX_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("boy_field_grass.jpg"), "Boy Field Grass");
        assert_eq!(title_from_filename("red-rock__canyon.JPEG"), "Red Rock Canyon");
        assert_eq!(title_from_filename("image-abc123-100x100-jpg"), "Image Abc123 100x100 Jpg");
        assert_eq!(title_from_filename("no_extension"), "No Extension");
    }

    #[test]
    fn test_slug_from_title() {
        assert_eq!(slug_from_title("Boy Field Grass"), "boy-field-grass");
        assert_eq!(slug_from_title("  Dusk, Utah (2024)! "), "dusk-utah-2024");
        assert_eq!(slug_from_title("!!!"), "");
    }

    #[test]
    fn test_slug_from_filename() {
        assert_eq!(slug_from_filename("Boy_Field Grass.jpg"), "boy-field-grass");
        assert_eq!(slug_from_filename("dusk-utah_(2024).png"), "dusk-utah-2024");
        assert_eq!(slug_from_filename("café.webp"), "caf");
    }

    #[test]
    fn test_slug_from_collection_title() {
        assert_eq!(slug_from_collection_title("Portfolio"), "portfolio");
        assert_eq!(slug_from_collection_title("Night  Walks"), "night-walks");
    }

    #[test]
    fn test_slugs_are_capped() {
        let long = "a".repeat(200);
        assert_eq!(slug_from_title(&long).len(), 96);
    }

    #[test]
    fn test_capped_slug_has_no_trailing_dash() {
        let title = format!("{} Dusk", "a".repeat(95));
        assert_eq!(slug_from_title(&title), "a".repeat(95));
        assert_eq!(slug_from_title(&format!("--{}", title)), "a".repeat(95));
    }
}
