//! Text classification for wearable AI product mentions
//!
//! Pure keyword-table heuristics: no I/O, no shared state, and a
//! defined result for any input. The tables live in [`tables`] as
//! ordered association lists so scan order stays visible as data.

mod tables;

pub use tables::KeywordTables;

/// Keyword-table text classifier.
///
/// Every method lower-cases its input and scans the configured tables;
/// none can fail or panic.
#[derive(Debug, Clone)]
pub struct Classifier {
    tables: KeywordTables,
}

impl Classifier {
    pub fn new(tables: KeywordTables) -> Self {
        Self { tables }
    }

    /// True iff the text mentions any relevance keyword.
    ///
    /// Plain substring matching, so e.g. "sensor" inside a longer word
    /// still counts; this is a known source of false positives.
    pub fn is_relevant(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.tables.relevance.iter().any(|kw| contains_keyword(&text, kw))
    }

    /// First-match-wins category scan; earlier rules shadow later ones.
    pub fn category(&self, text: &str) -> String {
        let text = text.to_lowercase();
        for (category, keywords) in &self.tables.categories {
            if keywords.iter().any(|kw| contains_keyword(&text, kw)) {
                return (*category).to_string();
            }
        }
        self.tables.category_fallback.to_string()
    }

    /// First placement whose any keyword matches; "Unknown" otherwise.
    pub fn body_placement(&self, text: &str) -> String {
        let text = text.to_lowercase();
        for (placement, keywords) in &self.tables.placements {
            if keywords.iter().any(|kw| contains_keyword(&text, kw)) {
                return (*placement).to_string();
            }
        }
        "Unknown".to_string()
    }

    /// Accumulates every modality with at least one keyword hit,
    /// unlike the first-match-wins placement scan. `["Unknown"]` when
    /// nothing matched.
    pub fn sensory_inputs(&self, text: &str) -> Vec<String> {
        let text = text.to_lowercase();
        let inputs: Vec<String> = self
            .tables
            .sensory
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|kw| contains_keyword(&text, kw)))
            .map(|(modality, _)| (*modality).to_string())
            .collect();

        if inputs.is_empty() {
            vec!["Unknown".to_string()]
        } else {
            inputs
        }
    }

    /// One title-cased tag per present feature keyword, preserving the
    /// table's order; each keyword contributes at most once.
    pub fn features(&self, text: &str) -> Vec<String> {
        let text = text.to_lowercase();
        self.tables
            .features
            .iter()
            .filter(|kw| contains_keyword(&text, kw))
            .map(|kw| title_case(kw))
            .collect()
    }

    /// True iff the text contains any always-on phrase.
    pub fn is_always_on(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.tables.always_on.iter().any(|kw| contains_keyword(&text, kw))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(KeywordTables::default())
    }
}

/// Substring match, except two-letter acronyms ("ai", "ar", "vr", "ph")
/// which must be token-delimited so "heart" does not read as "ar".
fn contains_keyword(text: &str, keyword: &str) -> bool {
    if keyword.len() > 2 {
        return text.contains(keyword);
    }

    let bytes = text.as_bytes();
    text.match_indices(keyword).any(|(at, _)| {
        let before_ok = at == 0 || !bytes[at - 1].is_ascii_alphanumeric();
        let after = at + keyword.len();
        let after_ok = after >= text.len() || !bytes[after].is_ascii_alphanumeric();
        before_ok && after_ok
    })
}

/// Upper-case the first character only, as the feature tags are stored
/// ("voice assistant" -> "Voice assistant").
fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
