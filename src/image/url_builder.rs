use url::Url;

use crate::config::StoreConfig;
use crate::constants;
use crate::error::AppError;

use super::source::{AssetId, Crop, Hotspot, ImageSource};

/// Turns an image source into a URL that can be sized
pub trait UrlBuilder {
    type Url: SizedImageUrl;

    fn image(&self, source: &ImageSource) -> Result<Self::Url, AppError>;
}

/// An immutable image URL. Each `with_*` returns an updated copy.
pub trait SizedImageUrl: Clone {
    fn with_width(&self, width: u32) -> Self;
    fn with_height(&self, height: u32) -> Self;
    fn build(&self) -> Result<String, AppError>;
}

/// Builds URLs for the content store's image CDN
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    base_url: String,
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: &str, dataset: &str) -> Self {
        Self {
            base_url: constants::CDN_BASE_URL.to_owned(),
            project_id: project_id.to_owned(),
            dataset: dataset.to_owned(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.project_id, &config.dataset)
    }

    pub fn with_base_url(&self, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            ..self.clone()
        }
    }
}

impl UrlBuilder for ImageUrlBuilder {
    type Url = ImageUrl;

    fn image(&self, source: &ImageSource) -> Result<ImageUrl, AppError> {
        let asset: AssetId = source.asset.id.parse()?;
        let location = format!(
            "{}/images/{}/{}/{}",
            self.base_url,
            self.project_id,
            self.dataset,
            asset.file_name()
        );
        Ok(ImageUrl {
            location,
            asset,
            crop: source.crop.unwrap_or_default(),
            hotspot: source.hotspot.unwrap_or_default(),
            width: None,
            height: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageUrl {
    location: String,
    asset: AssetId,
    crop: Crop,
    hotspot: Hotspot,
    width: Option<u32>,
    height: Option<u32>,
}

impl SizedImageUrl for ImageUrl {
    fn with_width(&self, width: u32) -> Self {
        Self {
            width: Some(width),
            ..self.clone()
        }
    }

    fn with_height(&self, height: u32) -> Self {
        Self {
            height: Some(height),
            ..self.clone()
        }
    }

    fn build(&self) -> Result<String, AppError> {
        let mut url = Url::parse(&self.location)
            .map_err(|e| AppError::ResolutionFailure(format!("{}: {}", self.location, e)))?;

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(rect) = self.rect() {
            params.push(("rect", rect.to_string()));
        }
        if let Some(width) = self.width {
            params.push(("w", width.to_string()));
        }
        if let Some(height) = self.height {
            params.push(("h", height.to_string()));
        }

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Rect {
    fn rounded(&self) -> (i64, i64, i64, i64) {
        (
            self.left.round() as i64,
            self.top.round() as i64,
            self.width.round() as i64,
            self.height.round() as i64,
        )
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (left, top, width, height) = self.rounded();
        write!(f, "{},{},{},{}", left, top, width, height)
    }
}

impl ImageUrl {
    /// The region of the original to serve, or `None` when that is the whole image
    fn rect(&self) -> Option<Rect> {
        let image_width = f64::from(self.asset.width);
        let image_height = f64::from(self.asset.height);

        let crop_left = self.crop.left * image_width;
        let crop_top = self.crop.top * image_height;
        let crop = Rect {
            left: crop_left,
            top: crop_top,
            width: image_width - self.crop.right * image_width - crop_left,
            height: image_height - self.crop.bottom * image_height - crop_top,
        };

        let rect = match (self.width, self.height) {
            (Some(width), Some(height)) if width > 0 && height > 0 => {
                fit_to_hotspot(&crop, &self.hotspot_bounds(), f64::from(width) / f64::from(height))
            }
            _ => crop,
        };

        let (left, top, width, height) = rect.rounded();
        let is_effective_crop = left != 0
            || top != 0
            || width != i64::from(self.asset.width)
            || height != i64::from(self.asset.height);
        is_effective_crop.then_some(rect)
    }

    /// Hotspot edges in pixels as (left, top, right, bottom)
    fn hotspot_bounds(&self) -> (f64, f64, f64, f64) {
        let image_width = f64::from(self.asset.width);
        let image_height = f64::from(self.asset.height);
        let vertical_radius = self.hotspot.height * image_height / 2.0;
        let horizontal_radius = self.hotspot.width * image_width / 2.0;
        let center_x = self.hotspot.x * image_width;
        let center_y = self.hotspot.y * image_height;
        (
            center_x - horizontal_radius,
            center_y - vertical_radius,
            center_x + horizontal_radius,
            center_y + vertical_radius,
        )
    }
}

/// Fit the target aspect ratio inside the crop, centred on the hotspot
fn fit_to_hotspot(crop: &Rect, hotspot: &(f64, f64, f64, f64), aspect_ratio: f64) -> Rect {
    let (hotspot_left, hotspot_top, hotspot_right, hotspot_bottom) = *hotspot;
    let crop_aspect_ratio = crop.width / crop.height;

    if crop_aspect_ratio > aspect_ratio {
        // Wider than wanted, cut from the sides
        let height = crop.height.round();
        let width = (height * aspect_ratio).round();
        let top = crop.top.round().max(0.0);
        let hotspot_center = ((hotspot_right - hotspot_left) / 2.0 + hotspot_left).round();
        let mut left = (hotspot_center - width / 2.0).round().max(0.0);
        if left < crop.left {
            left = crop.left;
        } else if left + width > crop.left + crop.width {
            left = crop.left + crop.width - width;
        }
        Rect {
            left,
            top,
            width,
            height,
        }
    } else {
        // Taller than wanted, cut from top and bottom
        let width = crop.width;
        let height = (width / aspect_ratio).round();
        let left = crop.left.round().max(0.0);
        let hotspot_center = ((hotspot_bottom - hotspot_top) / 2.0 + hotspot_top).round();
        let mut top = (hotspot_center - height / 2.0).round().max(0.0);
        if top < crop.top {
            top = crop.top;
        } else if top + height > crop.top + crop.height {
            top = crop.top + crop.height - height;
        }
        Rect {
            left,
            top,
            width,
            height,
        }
    }
}
