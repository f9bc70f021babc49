//! Reference list loading.
//!
//! A reference list is plain text with one CNKI-style reference per line, as
//! copied from a CNKI export or a paper's bibliography.

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading references.
#[derive(Error, Debug)]
pub enum RefsError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("No references found")]
    Empty,
}

/// Loads the references from a text file, one per line.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds only blank lines.
pub fn load_references(path: &Path) -> Result<Vec<String>, RefsError> {
    let content = fs::read_to_string(path)?;
    let refs = split_references(&content);
    if refs.is_empty() {
        return Err(RefsError::Empty);
    }
    Ok(refs)
}

/// Splits a block of text into trimmed, non-blank reference lines.
///
/// # Examples
///
/// ```
/// use cnki_bibtex::split_references;
///
/// let refs = split_references("\n  first.\n\nsecond.\n");
/// assert_eq!(refs, vec!["first.", "second."]);
/// ```
pub fn split_references(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Helper to create a temporary file with content
    fn create_temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_references_one_per_line() {
        // Given: a file with two references and surrounding blank lines
        let file = create_temp_file(
            "\n张三. 标题[J]. 期刊, 2020, 1(2): 3-4.\n\n李四. 标题二[J]. 期刊, 2021, 5(6): 7.\n",
        );

        // When: we load the references
        let refs = load_references(file.path()).unwrap();

        // Then: both lines are returned in order
        assert_eq!(refs.len(), 2);
        assert!(refs[0].starts_with("张三"));
        assert!(refs[1].starts_with("李四"));
    }

    #[test]
    fn test_load_references_crlf() {
        let file = create_temp_file("a.\r\nb.\r\n");
        let refs = load_references(file.path()).unwrap();
        assert_eq!(refs, vec!["a.", "b."]);
    }

    #[test]
    fn test_load_references_file_not_found() {
        let path = Path::new("/nonexistent/path/refs.txt");
        let err = load_references(path).unwrap_err();
        assert!(matches!(err, RefsError::IoError(_)));
    }

    #[test]
    fn test_load_references_blank_file() {
        let file = create_temp_file("\n   \n\t\n");
        let err = load_references(file.path()).unwrap_err();
        assert!(matches!(err, RefsError::Empty));
    }

    #[test]
    fn test_split_references_empty_string() {
        assert!(split_references("").is_empty());
    }
}
