use super::{Document, Issue};

pub const DEFAULT_SITE_NAME: &str = "Ben Hickman Photography Portfolio";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub social_links: Option<SocialLinks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub nav_links: Vec<NavLink>,
    #[serde(default)]
    pub footer: Option<Footer>,
}

impl SiteSettings {
    pub fn site_name(&self) -> &str {
        self.site_name.as_deref().unwrap_or(DEFAULT_SITE_NAME)
    }
}

impl Document for SiteSettings {
    const TYPE_NAME: &'static str = "siteSettings";

    fn validate(&self) -> Vec<Issue> {
        Vec::new()
    }
}
