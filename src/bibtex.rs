//! BibTeX and JSON rendering of parsed references.

use crate::parser::parse_reference;
use crate::record::BibliographicRecord;
use crate::refs::split_references;

/// Converts one CNKI-style reference into a BibTeX `@article` entry.
///
/// `cite_key` is used verbatim when given; otherwise a key is derived from
/// the first author, the year and the title. Never fails: fields that cannot
/// be extracted are rendered with placeholder values.
///
/// # Examples
///
/// ```
/// use cnki_bibtex::convert;
///
/// let bib = convert(
///     "王小明; 李华. 人工智能发展趋势分析[J]. 科技导报, 2022, 40(10): 25-30.",
///     Some("wang2022ai"),
/// );
/// assert!(bib.starts_with("@article{wang2022ai,\n"));
/// assert!(bib.contains("  number    = {10},\n"));
/// ```
pub fn convert(reference: &str, cite_key: Option<&str>) -> String {
    render_bibtex(&parse_reference(reference, cite_key))
}

/// Converts every non-blank line of `text`, in order, with derived keys.
pub fn convert_batch(text: &str) -> Vec<String> {
    split_references(text)
        .iter()
        .map(|line| convert(line, None))
        .collect()
}

/// Renders a record as a BibTeX entry.
///
/// Fields appear in a fixed order. `volume`, `number` and `pages` are left
/// out when the record has no value for them. The entry has no trailing
/// newline.
pub fn render_bibtex(record: &BibliographicRecord) -> String {
    let authors = record
        .authors()
        .iter()
        .map(|author| format!("{{{}}}", author))
        .collect::<Vec<_>>()
        .join(" and ");

    let mut lines = vec![
        format!("@article{{{},", record.cite_key()),
        field("author", &authors),
        field("title", record.title()),
        field("journal", record.journal()),
        field("year", record.year()),
    ];
    if let Some(volume) = record.volume() {
        lines.push(field("volume", volume));
    }
    if let Some(issue) = record.issue() {
        lines.push(field("number", issue));
    }
    if let Some(pages) = record.pages() {
        lines.push(field("pages", pages));
    }
    lines.push("  language  = {chinese}".to_string());
    lines.push("}".to_string());

    lines.join("\n")
}

/// Renders a record as pretty-printed JSON.
pub fn render_json(record: &BibliographicRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

/// Renders several records as one pretty-printed JSON array.
pub fn render_json_array(records: &[BibliographicRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

fn field(name: &str, value: &str) -> String {
    format!("  {:<10}= {{{}}},", name, value)
}
