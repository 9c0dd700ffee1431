use std::collections::HashMap;

pub const DEFAULT_PROJECT_ID: &str = "6xolgh7z";
pub const DEFAULT_DATASET: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2024-03-20";

pub const CDN_BASE_URL: &str = "https://cdn.sanity.io";

/// Width multipliers used for the srcset, smallest first
pub const SRCSET_MULTIPLIERS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];
/// Candidate widths at or above this are never requested
pub const MAX_SRCSET_WIDTH: u32 = 2500;
pub const DEFAULT_SIZES: &str = "100vw";

pub const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_ALT_TEXT_MODEL: &str = "claude-haiku-4-5-20251001";
pub const ALT_TEXT_MAX_TOKENS: u32 = 150;
pub const ALT_TEXT_MAX_CHARS: usize = 125;
/// Width requested from the CDN when describing an image
pub const ALT_TEXT_PREVIEW_WIDTH: u32 = 800;
pub const ALT_TEXT_PROMPT: &str = "Write a concise alt text description for this photograph (1 sentence, 125 characters max) suitable for screen readers. Focus on the subject, action, and mood. Do not start with \"A photo of\" or \"An image of\".";

pub const SLUG_MAX_LENGTH: usize = 96;

/// Extensions picked up by a plain upload
pub const UPLOAD_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "gif", "avif"];

/// Extensions picked up by the import, which also sends each image off for alt text
pub const IMPORT_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

lazy_static::lazy_static! {
    // See: https://www.iana.org/assignments/media-types/media-types.xhtml#image)
    pub static ref MIME_TABLE: HashMap<&'static str, &'static str> = {
        let mut hm = HashMap::new();
        hm.insert("avif", "image/avif");
        hm.insert("gif", "image/gif");
        hm.insert("png", "image/png");
        hm.insert("jpg", "image/jpeg");
        hm.insert("jpeg", "image/jpeg");
        hm.insert("webp", "image/webp");
        hm
    };
}
