use std::str::FromStr;

use crate::error::AppError;

/// Reference to a stored asset, as found in `asset._ref` or a dereferenced `asset->{_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetReference {
    #[serde(rename = "_ref", alias = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Fractions trimmed from each edge of the original image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Crop {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
}

/// Focal area of the image, all values as fractions of the original size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Hotspot {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            width: 1.0,
            height: 1.0,
        }
    }
}

/// An image field as returned by the content store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    pub asset: AssetReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<Hotspot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl ImageSource {
    pub fn from_asset_id(id: &str) -> Self {
        Self {
            asset: AssetReference {
                id: id.to_owned(),
                url: None,
            },
            crop: None,
            hotspot: None,
            alt: None,
            caption: None,
        }
    }
}

/// A parsed image asset id such as `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetId {
    pub hash: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

impl AssetId {
    /// The file name the CDN serves the asset under
    pub fn file_name(&self) -> String {
        format!("{}-{}x{}.{}", self.hash, self.width, self.height, self.format)
    }
}

impl FromStr for AssetId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AppError::ResolutionFailure(format!("malformed asset reference `{}`", s));

        let rest = s.strip_prefix("image-").ok_or_else(malformed)?;
        let mut parts = rest.rsplitn(3, '-');
        let format = parts.next().filter(|p| !p.is_empty()).ok_or_else(malformed)?;
        let dimensions = parts.next().ok_or_else(malformed)?;
        let hash = parts.next().filter(|p| !p.is_empty()).ok_or_else(malformed)?;

        let (width, height) = dimensions.split_once('x').ok_or_else(malformed)?;
        let width: u32 = width.parse().map_err(|_| malformed())?;
        let height: u32 = height.parse().map_err(|_| malformed())?;
        if width == 0 || height == 0 {
            return Err(malformed());
        }

        Ok(Self {
            hash: hash.to_owned(),
            width,
            height,
            format: format.to_owned(),
        })
    }
}
