use chrono::NaiveDate;

use crate::image::ImageSource;

use super::{max_items, require_slug, require_text, Document, Issue, Reference, Slug};

const BLOCK_STYLES: [&str; 2] = ["normal", "h2"];
const DECORATORS: [&str; 2] = ["strong", "em"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub marks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub children: Vec<Span>,
}

impl TextBlock {
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|span| span.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullQuote {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub attribution: Option<String>,
}

/// One entry in an essay body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "camelCase")]
pub enum BodyBlock {
    Block(TextBlock),
    PullQuote(PullQuote),
    InlineImage(ImageSource),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Essay {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    /// The summary sentence shown beneath the title
    #[serde(default)]
    pub deck: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
    /// Minutes
    #[serde(default)]
    pub reading_time: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub hero_image: Option<ImageSource>,
    #[serde(default)]
    pub body: Vec<BodyBlock>,
    #[serde(default)]
    pub related_essays: Vec<Reference>,
}

fn missing_alt(image: &ImageSource) -> bool {
    image.alt.as_deref().map_or(true, |alt| alt.trim().is_empty())
}

impl Document for Essay {
    const TYPE_NAME: &'static str = "essay";

    fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        require_text(&mut issues, "title", &self.title);
        require_slug(&mut issues, &self.slug);

        if let Some(image) = &self.hero_image {
            if missing_alt(image) {
                issues.push(Issue::warning("heroImage.alt", "Alt text required for accessibility"));
            }
        }

        for (i, block) in self.body.iter().enumerate() {
            let field = format!("body[{}]", i);
            match block {
                BodyBlock::Block(text) => {
                    if let Some(style) = &text.style {
                        if !BLOCK_STYLES.contains(&style.as_str()) {
                            issues.push(Issue::error(&field, &format!("Unsupported style `{}`", style)));
                        }
                    }
                    for mark in text.children.iter().flat_map(|span| span.marks.iter()) {
                        if !DECORATORS.contains(&mark.as_str()) {
                            issues.push(Issue::warning(&field, &format!("Unknown mark `{}`", mark)));
                        }
                    }
                }
                BodyBlock::PullQuote(quote) => {
                    require_text(&mut issues, &format!("{}.text", field), &quote.text);
                }
                BodyBlock::InlineImage(image) => {
                    if missing_alt(image) {
                        issues.push(Issue::warning(
                            &format!("{}.alt", field),
                            "Alt text required for accessibility",
                        ));
                    }
                }
                BodyBlock::Unknown => {
                    issues.push(Issue::error(&field, "Unknown block type"));
                }
            }
        }

        max_items(&mut issues, "relatedEssays", self.related_essays.len(), 2);
        issues
    }
}
