use itertools::Itertools;

use crate::constants;
use crate::error::AppError;

use super::source::ImageSource;
use super::url_builder::{SizedImageUrl, UrlBuilder};

/// How an image is going to be rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub base_width: f64,
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub sizes: Option<String>,
}

impl RenderConfig {
    pub fn new(base_width: f64) -> Self {
        Self {
            base_width,
            aspect_ratio: None,
            sizes: None,
        }
    }

    pub fn with_aspect_ratio(&self, aspect_ratio: f64) -> Self {
        Self {
            aspect_ratio: Some(aspect_ratio),
            ..self.clone()
        }
    }

    pub fn with_sizes(&self, sizes: &str) -> Self {
        Self {
            sizes: Some(sizes.to_owned()),
            ..self.clone()
        }
    }

    /// The sizes descriptor, `100vw` unless told otherwise
    pub fn sizes(&self) -> &str {
        self.sizes.as_deref().unwrap_or(constants::DEFAULT_SIZES)
    }

    fn validate(&self) -> Result<(), AppError> {
        let width = self.base_width;
        if !width.is_finite() || width <= 0.0 {
            return Err(AppError::InvalidConfiguration(format!(
                "base width must be a positive number, got {}",
                width
            )));
        }
        if width.round() < 1.0 || width.round() > f64::from(u32::MAX) {
            return Err(AppError::InvalidConfiguration(format!(
                "base width {} is out of range",
                width
            )));
        }
        if let Some(ratio) = self.aspect_ratio {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(AppError::InvalidConfiguration(format!(
                    "aspect ratio must be a positive number, got {}",
                    ratio
                )));
            }
        }
        Ok(())
    }
}

/// The attributes of an `img` tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveImageProps {
    pub src: String,
    pub srcset: String,
    pub sizes: String,
}

impl ResponsiveImageProps {
    pub fn new(src: String, srcset: String, sizes: String) -> Self {
        Self { src, srcset, sizes }
    }

    fn empty(sizes: &str) -> Self {
        Self::new(String::new(), String::new(), sizes.to_owned())
    }
}

/// Widths offered in the srcset: 0.5x, 1x, 1.5x and 2x the base width, capped
pub fn srcset_widths(base_width: f64) -> Vec<u32> {
    constants::SRCSET_MULTIPLIERS
        .iter()
        .map(|multiplier| (base_width * multiplier).round())
        .filter(|width| *width >= 1.0 && *width < f64::from(constants::MAX_SRCSET_WIDTH))
        .map(|width| width as u32)
        .collect()
}

fn height_for(width: f64, aspect_ratio: f64) -> u32 {
    ((width / aspect_ratio).round() as u32).max(1)
}

fn sized<U: SizedImageUrl>(image: &U, width: f64, aspect_ratio: Option<f64>) -> U {
    let url = image.with_width(width.round() as u32);
    match aspect_ratio {
        Some(ratio) => url.with_height(height_for(width, ratio)),
        None => url,
    }
}

/// Resolve an image into `src`, `srcset` and `sizes`.
///
/// An absent source is not an error, it resolves to empty URLs.
pub fn resolve<B: UrlBuilder>(
    builder: &B,
    source: Option<&ImageSource>,
    config: &RenderConfig,
) -> Result<ResponsiveImageProps, AppError> {
    let source = match source {
        Some(source) => source,
        None => return Ok(ResponsiveImageProps::empty(config.sizes())),
    };
    config.validate()?;

    let image = builder.image(source)?;
    let src = sized(&image, config.base_width, config.aspect_ratio).build()?;

    let srcset = srcset_widths(config.base_width)
        .into_iter()
        .map(|width| {
            let url = sized(&image, f64::from(width), config.aspect_ratio).build()?;
            Ok(format!("{} {}w", url, width))
        })
        .collect::<Result<Vec<String>, AppError>>()?
        .into_iter()
        .join(", ");

    Ok(ResponsiveImageProps::new(src, srcset, config.sizes().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageUrlBuilder;

    /// Writes the requested dimensions straight into the URL
    struct RecordingBuilder;

    #[derive(Clone)]
    struct RecordedUrl {
        asset: String,
        width: Option<u32>,
        height: Option<u32>,
    }

    impl UrlBuilder for RecordingBuilder {
        type Url = RecordedUrl;

        fn image(&self, source: &ImageSource) -> Result<RecordedUrl, AppError> {
            if source.asset.id.is_empty() {
                return Err(AppError::ResolutionFailure("empty asset".to_owned()));
            }
            Ok(RecordedUrl {
                asset: source.asset.id.clone(),
                width: None,
                height: None,
            })
        }
    }

    impl SizedImageUrl for RecordedUrl {
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
            let mut url = format!("https://img.test/{}", self.asset);
            if let Some(width) = self.width {
                url.push_str(&format!("?w={}", width));
            }
            if let Some(height) = self.height {
                url.push_str(&format!("&h={}", height));
            }
            Ok(url)
        }
    }

    fn source() -> ImageSource {
        ImageSource::from_asset_id("image-abc123-2000x1000-jpg")
    }

    #[test]
    fn test_absent_source() {
        let props = resolve(&RecordingBuilder, None, &RenderConfig::new(800.0)).unwrap();
        assert_eq!(props, ResponsiveImageProps::new("".into(), "".into(), "100vw".into()));

        let config = RenderConfig::new(-1.0).with_sizes("33vw");
        let props = resolve(&RecordingBuilder, None, &config).unwrap();
        assert_eq!(props.src, "");
        assert_eq!(props.srcset, "");
        assert_eq!(props.sizes, "33vw");
    }

    #[test]
    fn test_width_scaling() {
        assert_eq!(srcset_widths(800.0), vec![400, 800, 1200, 1600]);
        let props = resolve(&RecordingBuilder, Some(&source()), &RenderConfig::new(800.0)).unwrap();
        assert_eq!(props.src, "https://img.test/image-abc123-2000x1000-jpg?w=800");
        assert_eq!(
            props.srcset,
            "https://img.test/image-abc123-2000x1000-jpg?w=400 400w, \
             https://img.test/image-abc123-2000x1000-jpg?w=800 800w, \
             https://img.test/image-abc123-2000x1000-jpg?w=1200 1200w, \
             https://img.test/image-abc123-2000x1000-jpg?w=1600 1600w"
        );
    }

    #[test]
    fn test_ceiling_filter() {
        assert_eq!(srcset_widths(2000.0), vec![1000, 2000]);
        assert_eq!(srcset_widths(1250.0), vec![625, 1250, 1875]);
        assert!(srcset_widths(5000.0).is_empty());

        let props = resolve(&RecordingBuilder, Some(&source()), &RenderConfig::new(2000.0)).unwrap();
        assert_eq!(
            props.srcset,
            "https://img.test/image-abc123-2000x1000-jpg?w=1000 1000w, \
             https://img.test/image-abc123-2000x1000-jpg?w=2000 2000w"
        );
    }

    #[test]
    fn test_everything_above_ceiling_gives_empty_srcset() {
        let props = resolve(&RecordingBuilder, Some(&source()), &RenderConfig::new(6000.0)).unwrap();
        assert_eq!(props.src, "https://img.test/image-abc123-2000x1000-jpg?w=6000");
        assert_eq!(props.srcset, "");
    }

    #[test]
    fn test_aspect_ratio_sets_every_height() {
        let config = RenderConfig::new(1000.0).with_aspect_ratio(2.0);
        let props = resolve(&RecordingBuilder, Some(&source()), &config).unwrap();
        assert_eq!(props.src, "https://img.test/image-abc123-2000x1000-jpg?w=1000&h=500");
        assert_eq!(
            props.srcset,
            "https://img.test/image-abc123-2000x1000-jpg?w=500&h=250 500w, \
             https://img.test/image-abc123-2000x1000-jpg?w=1000&h=500 1000w, \
             https://img.test/image-abc123-2000x1000-jpg?w=1500&h=750 1500w, \
             https://img.test/image-abc123-2000x1000-jpg?w=2000&h=1000 2000w"
        );
    }

    #[test]
    fn test_height_is_rounded() {
        let config = RenderConfig::new(1000.0).with_aspect_ratio(1.5);
        let props = resolve(&RecordingBuilder, Some(&source()), &config).unwrap();
        // 1000 / 1.5 = 666.67
        assert!(props.src.ends_with("w=1000&h=667"));
        // 500 / 1.5 = 333.33
        assert!(props.srcset.starts_with("https://img.test/image-abc123-2000x1000-jpg?w=500&h=333 500w"));
    }

    #[test]
    fn test_no_aspect_ratio_means_no_height() {
        let props = resolve(&RecordingBuilder, Some(&source()), &RenderConfig::new(640.0)).unwrap();
        assert!(!props.src.contains("h="));
        assert!(!props.srcset.contains("h="));
    }

    #[test]
    fn test_sizes_passthrough() {
        let config = RenderConfig::new(500.0).with_sizes("50vw");
        let props = resolve(&RecordingBuilder, Some(&source()), &config).unwrap();
        assert_eq!(props.sizes, "50vw");

        let props = resolve(&RecordingBuilder, Some(&source()), &RenderConfig::new(500.0)).unwrap();
        assert_eq!(props.sizes, "100vw");
    }

    #[test]
    fn test_deterministic() {
        let builder = ImageUrlBuilder::new("proj", "production");
        let config = RenderConfig::new(1200.0).with_aspect_ratio(1.5).with_sizes("80vw");
        let first = resolve(&builder, Some(&source()), &config).unwrap();
        let second = resolve(&builder, Some(&source()), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_configuration() {
        for width in [0.0, -100.0, f64::NAN, f64::INFINITY, 0.2] {
            let result = resolve(&RecordingBuilder, Some(&source()), &RenderConfig::new(width));
            assert!(
                matches!(result, Err(AppError::InvalidConfiguration(_))),
                "{} should be rejected",
                width
            );
        }
        for ratio in [0.0, -1.5, f64::NAN] {
            let config = RenderConfig::new(800.0).with_aspect_ratio(ratio);
            let result = resolve(&RecordingBuilder, Some(&source()), &config);
            assert!(matches!(result, Err(AppError::InvalidConfiguration(_))));
        }
    }

    #[test]
    fn test_builder_failure_propagates() {
        let result = resolve(
            &RecordingBuilder,
            Some(&ImageSource::from_asset_id("")),
            &RenderConfig::new(800.0),
        );
        assert!(matches!(result, Err(AppError::ResolutionFailure(_))));

        let result = resolve(
            &ImageUrlBuilder::new("proj", "production"),
            Some(&ImageSource::from_asset_id("image-broken")),
            &RenderConfig::new(800.0),
        );
        assert!(matches!(result, Err(AppError::ResolutionFailure(_))));
    }

    #[test]
    fn test_cdn_urls_with_aspect_ratio() {
        let builder = ImageUrlBuilder::new("proj", "production");
        let config = RenderConfig::new(1000.0).with_aspect_ratio(2.0);
        let props = resolve(&builder, Some(&source()), &config).unwrap();
        assert_eq!(
            props.src,
            "https://cdn.sanity.io/images/proj/production/abc123-2000x1000.jpg?w=1000&h=500"
        );
        assert_eq!(
            props.srcset.split(", ").collect::<Vec<_>>(),
            vec![
                "https://cdn.sanity.io/images/proj/production/abc123-2000x1000.jpg?w=500&h=250 500w",
                "https://cdn.sanity.io/images/proj/production/abc123-2000x1000.jpg?w=1000&h=500 1000w",
                "https://cdn.sanity.io/images/proj/production/abc123-2000x1000.jpg?w=1500&h=750 1500w",
                "https://cdn.sanity.io/images/proj/production/abc123-2000x1000.jpg?w=2000&h=1000 2000w",
            ]
        );
    }
}
