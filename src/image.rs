//! Image references and the URLs served for them

pub mod responsive;
pub mod source;
pub mod url_builder;

pub use responsive::{resolve, srcset_widths, RenderConfig, ResponsiveImageProps};
pub use source::{AssetId, AssetReference, Crop, Hotspot, ImageSource};
pub use url_builder::{ImageUrl, ImageUrlBuilder, SizedImageUrl, UrlBuilder};
