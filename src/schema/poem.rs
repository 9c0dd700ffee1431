use chrono::NaiveDate;

use super::{max_items, require_slug, require_text, Document, Issue, Reference, Slug};

pub const POEM_FORMS: [&str; 7] = [
    "Free Verse",
    "Sonnet",
    "Lyric",
    "Prose Poem",
    "Haiku",
    "Elegy",
    "Ode",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Epigraph {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub attribution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stanza {
    /// Section numeral such as `II`
    #[serde(default)]
    pub numeral: Option<String>,
    #[serde(default)]
    pub lines: Option<String>,
}

impl Stanza {
    /// Each line break starts a new poetic line
    pub fn lines(&self) -> Vec<&str> {
        self.lines
            .as_deref()
            .map(|lines| lines.split('\n').map(|line| line.trim_end_matches('\r')).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poem {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
    #[serde(default)]
    pub form: Option<String>,
    /// Place and year, e.g. `Canyonlands, 2024`
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub epigraph: Option<Epigraph>,
    #[serde(default)]
    pub stanzas: Vec<Stanza>,
    #[serde(default)]
    pub poets_note: Option<String>,
    #[serde(default)]
    pub related_poems: Vec<Reference>,
}

impl Document for Poem {
    const TYPE_NAME: &'static str = "poem";

    fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        require_text(&mut issues, "title", &self.title);
        require_slug(&mut issues, &self.slug);

        if let Some(form) = &self.form {
            if !POEM_FORMS.contains(&form.as_str()) {
                issues.push(Issue::error("form", &format!("Unknown form `{}`", form)));
            }
        }

        if self.stanzas.is_empty() {
            issues.push(Issue::error("stanzas", "Must have at least 1 item"));
        }
        for (i, stanza) in self.stanzas.iter().enumerate() {
            require_text(&mut issues, &format!("stanzas[{}].lines", i), &stanza.lines);
        }

        max_items(&mut issues, "relatedPoems", self.related_poems.len(), 4);
        issues
    }
}
