//! CNKI reference parser.
//!
//! Extracts authors, title, journal, year, volume, issue and pages from a
//! reference such as
//! `张三，李四. 文章标题[J]. 期刊名, 2023, 46(5): 100-115.`
//!
//! Extraction is an ordered chain of stages. Each stage matches against the
//! text left over by the previous one and hands back what it found together
//! with the new remainder. A stage whose pattern does not match falls back to
//! a placeholder instead of failing, so parsing always produces a record.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::{
    BibliographicRecord, RecordFields, DEFAULT_YEAR, UNKNOWN_AUTHOR, UNKNOWN_JOURNAL,
    UNKNOWN_TITLE,
};

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

// Shortest leading run up to the first "." or "。".
static AUTHORS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^。]+?)[。.]\s*").expect("authors regex"));

static AUTHOR_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[，、;,]\s*").expect("author separator regex"));

static TITLE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\[J\](?:\.|,\s*|$)").expect("title regex"));

static TITLE_CLAUSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^,。]+)").expect("title clause regex"));

static JOURNAL_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^,]+?)\s*,\s*(\d{4})").expect("journal regex"));

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("year regex"));

// Volume(issue): pages, with either half-width or full-width colon.
static VOLUME_ISSUE_PAGES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s*\((\d+)\)\s*[:：]\s*(\d+(?:-\d+)?)").expect("volume regex")
});

static PAGES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[:：]\s*(\d+(?:-\d+)?)").expect("pages regex"));

/// The result of one extraction stage: the value found and the text that
/// later stages should look at.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<'a, T> {
    pub value: T,
    pub rest: &'a str,
}

/// Volume, issue and page numbers found at the end of a reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Locator {
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pages: Option<String>,
}

/// Parses a CNKI-style reference into a [`BibliographicRecord`].
///
/// `cite_key` is used verbatim when given; otherwise one is derived from the
/// extracted fields. This never fails: unrecognised parts are replaced by
/// placeholder values.
///
/// # Examples
///
/// ```
/// use cnki_bibtex::parse_reference;
///
/// let record = parse_reference("王小明; 李华. 人工智能发展趋势分析[J]. 科技导报, 2022, 40(10): 25-30.", None);
/// assert_eq!(record.authors(), &["王小明", "李华"]);
/// assert_eq!(record.journal(), "科技导报");
/// assert_eq!(record.issue(), Some("10"));
/// ```
pub fn parse_reference(reference: &str, cite_key: Option<&str>) -> BibliographicRecord {
    let text = normalize(reference);
    tracing::trace!(reference = %text, "parsing reference");

    let authors = extract_authors(&text);
    let title = extract_title(authors.rest);
    let journal = extract_journal_and_year(title.rest);
    let locator = extract_locator(journal.rest);
    let (journal_name, year) = journal.value;

    BibliographicRecord::build(
        RecordFields {
            authors: authors.value,
            title: title.value,
            journal: journal_name,
            year,
            volume: locator.volume,
            issue: locator.issue,
            pages: locator.pages,
        },
        cite_key,
    )
}

/// Trims the text and collapses every whitespace run to a single space.
pub fn normalize(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Extracts the author list ending at the first "." or "。".
///
/// Authors may be separated by `，`, `、`, `;` or `,`. Without a terminator
/// the placeholder author is returned and nothing is consumed.
pub fn extract_authors(text: &str) -> Extracted<'_, Vec<String>> {
    let Some(caps) = AUTHORS_RE.captures(text) else {
        tracing::debug!("no author terminator found, using placeholder author");
        return Extracted {
            value: vec![UNKNOWN_AUTHOR.to_string()],
            rest: text,
        };
    };

    let end = caps.get(0).map_or(0, |m| m.end());
    let raw = caps.get(1).map_or("", |m| m.as_str()).trim();
    let authors: Vec<String> = AUTHOR_SEPARATOR_RE
        .split(raw)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    Extracted {
        value: authors,
        rest: &text[end..],
    }
}

/// Extracts the title, preferably the text before a `[J]` marker.
///
/// Without a marker the title runs up to the first `,` or `。`. If even that
/// fails the placeholder title is returned and nothing is consumed.
pub fn extract_title(text: &str) -> Extracted<'_, String> {
    if let Some(caps) = TITLE_MARKER_RE.captures(text) {
        let end = caps.get(0).map_or(0, |m| m.end());
        return Extracted {
            value: caps.get(1).map_or("", |m| m.as_str()).trim().to_string(),
            rest: &text[end..],
        };
    }

    tracing::debug!("no [J] marker, taking the first clause as title");
    match TITLE_CLAUSE_RE.find(text) {
        Some(m) => Extracted {
            value: m.as_str().trim().to_string(),
            rest: &text[m.end()..],
        },
        None => {
            tracing::debug!("no title clause found, using placeholder title");
            Extracted {
                value: UNKNOWN_TITLE.to_string(),
                rest: text,
            }
        }
    }
}

/// Extracts `Journal, YYYY` as a `(journal, year)` pair.
///
/// When the pair is missing the journal becomes the placeholder, the year is
/// the first standalone 4-digit run anywhere in `text` (or the default year),
/// and nothing is consumed.
pub fn extract_journal_and_year(text: &str) -> Extracted<'_, (String, String)> {
    if let Some(caps) = JOURNAL_YEAR_RE.captures(text) {
        let end = caps.get(0).map_or(0, |m| m.end());
        let journal = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
        let year = caps.get(2).map_or("", |m| m.as_str()).to_string();
        return Extracted {
            value: (journal, year),
            rest: &text[end..],
        };
    }

    let year = YEAR_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    tracing::debug!(
        year = year.as_deref().unwrap_or(DEFAULT_YEAR),
        "no journal/year pair, using placeholder journal"
    );

    Extracted {
        value: (
            UNKNOWN_JOURNAL.to_string(),
            year.unwrap_or_else(|| DEFAULT_YEAR.to_string()),
        ),
        rest: text,
    }
}

/// Searches `text` for `volume(issue): pages`, falling back to a bare
/// `: pages`.
pub fn extract_locator(text: &str) -> Locator {
    if let Some(caps) = VOLUME_ISSUE_PAGES_RE.captures(text) {
        let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
        return Locator {
            volume: group(1),
            issue: group(2),
            pages: group(3),
        };
    }

    let pages = PAGES_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    if pages.is_none() {
        tracing::debug!("no volume, issue or pages found");
    }

    Locator {
        pages,
        ..Default::default()
    }
}
