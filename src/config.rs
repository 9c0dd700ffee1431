use crate::constants;
use crate::error::AppError;

/// Where the content lives and how to talk to it
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub token: Option<String>,
    pub use_cdn: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: constants::DEFAULT_PROJECT_ID.to_owned(),
            dataset: constants::DEFAULT_DATASET.to_owned(),
            api_version: constants::DEFAULT_API_VERSION.to_owned(),
            token: None,
            use_cdn: true,
        }
    }
}

impl StoreConfig {
    /// Loads from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            project_id: non_empty("PUBLIC_SANITY_PROJECT_ID").unwrap_or(defaults.project_id),
            dataset: non_empty("PUBLIC_SANITY_DATASET").unwrap_or(defaults.dataset),
            api_version: non_empty("SANITY_API_VERSION").unwrap_or(defaults.api_version),
            token: non_empty("SANITY_API_TOKEN"),
            use_cdn: non_empty("SANITY_USE_CDN")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(defaults.use_cdn),
        }
    }

    pub fn with_project(&self, project_id: Option<String>, dataset: Option<String>) -> Self {
        Self {
            project_id: project_id.unwrap_or_else(|| self.project_id.clone()),
            dataset: dataset.unwrap_or_else(|| self.dataset.clone()),
            ..self.clone()
        }
    }

    /// Writes always go to the live API with a token
    pub fn for_writes(&self) -> Result<Self, AppError> {
        if self.token.is_none() {
            return Err(AppError::MissingEnv("SANITY_API_TOKEN"));
        }
        Ok(Self {
            use_cdn: false,
            ..self.clone()
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AltTextConfig {
    pub api_key: String,
    pub model: String,
}

impl AltTextConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("ANTHROPIC_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(AppError::MissingEnv("ANTHROPIC_API_KEY"))?;
        let model = lookup("ALT_TEXT_MODEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| constants::DEFAULT_ALT_TEXT_MODEL.to_owned());
        Ok(Self { api_key, model })
    }
}
