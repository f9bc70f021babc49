//! Bibliographic record model.
//!
//! A [`BibliographicRecord`] holds the fields extracted from one CNKI-style
//! reference string, with placeholders already substituted for anything the
//! parser could not find.

use serde::Serialize;

/// Author used when no author list could be extracted.
pub const UNKNOWN_AUTHOR: &str = "Unknown";
/// Title used when no title could be extracted.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Journal used when no journal/year pair could be extracted.
pub const UNKNOWN_JOURNAL: &str = "Unknown Journal";
/// Year used when no 4-digit year appears anywhere in the remaining text.
pub const DEFAULT_YEAR: &str = "2024";
/// Initials used when the title is shorter than two characters.
const FALLBACK_INITIALS: &str = "xx";

/// One parsed journal reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibliographicRecord {
    cite_key: String,
    authors: Vec<String>,
    title: String,
    journal: String,
    year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pages: Option<String>,
}

/// Fields extracted by the parser, before a cite key is attached.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordFields {
    pub authors: Vec<String>,
    pub title: String,
    pub journal: String,
    pub year: String,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pages: Option<String>,
}

impl BibliographicRecord {
    /// Builds a record, filling empty required fields with placeholders.
    ///
    /// When `cite_key` is `None` a key is derived from the first author, the
    /// year and the title. A supplied key is kept verbatim.
    pub(crate) fn build(fields: RecordFields, cite_key: Option<&str>) -> Self {
        let mut authors: Vec<String> = fields
            .authors
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if authors.is_empty() {
            authors.push(UNKNOWN_AUTHOR.to_string());
        }

        let title = non_empty_or(fields.title, UNKNOWN_TITLE);
        let journal = non_empty_or(fields.journal, UNKNOWN_JOURNAL);
        let year = non_empty_or(fields.year, DEFAULT_YEAR);

        let cite_key = match cite_key {
            Some(key) => key.to_string(),
            None => derive_cite_key(&authors[0], &year, &title),
        };

        BibliographicRecord {
            cite_key,
            authors,
            title,
            journal,
            year,
            volume: fields.volume,
            issue: fields.issue,
            pages: fields.pages,
        }
    }

    pub fn cite_key(&self) -> &str {
        &self.cite_key
    }

    /// Author names in order of appearance. Never empty.
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn journal(&self) -> &str {
        &self.journal
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn volume(&self) -> Option<&str> {
        self.volume.as_deref()
    }

    pub fn issue(&self) -> Option<&str> {
        self.issue.as_deref()
    }

    /// A single page or a `start-end` range.
    pub fn pages(&self) -> Option<&str> {
        self.pages.as_deref()
    }
}

fn non_empty_or(value: String, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Derives a cite key as `surname + year + initials`, lowercased and
/// restricted to ASCII alphanumerics and `_`.
///
/// The surname is the last whitespace-separated token of the author name.
/// The initials are the first two CJK ideographs of the title, or its first
/// two characters when it has fewer than two ideographs.
///
/// # Examples
///
/// ```
/// use cnki_bibtex::record::derive_cite_key;
///
/// assert_eq!(derive_cite_key("John Smith", "2020", "Deep Learning"), "smith2020de");
/// assert_eq!(derive_cite_key("张三", "2023", "深度学习"), "2023");
/// assert_eq!(derive_cite_key("张三", "２０２３", "深度学习"), "2024xx");
/// ```
pub fn derive_cite_key(first_author: &str, year: &str, title: &str) -> String {
    let surname = first_author
        .split_whitespace()
        .last()
        .unwrap_or(first_author);

    let ideographs: Vec<char> = title.chars().filter(|c| is_cjk_ideograph(*c)).collect();
    let initials: String = if ideographs.len() >= 2 {
        ideographs[..2].iter().collect()
    } else if title.chars().count() >= 2 {
        title.chars().take(2).collect()
    } else {
        FALLBACK_INITIALS.to_string()
    };

    let key: String = format!("{}{}{}", surname, year, initials)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    // Full-width digits and ideographs can all be filtered away.
    if key.is_empty() {
        format!("{}{}", DEFAULT_YEAR, FALLBACK_INITIALS)
    } else {
        key
    }
}

/// CJK Unified Ideographs block.
fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}
