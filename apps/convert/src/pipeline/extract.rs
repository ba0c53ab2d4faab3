//! PDF text extraction.

use std::path::Path;

use tracing::debug;

use crate::errors::AppError;

/// Reads every page of the PDF at `path` in order and joins their text,
/// each page followed by a newline.
pub fn extract(path: &Path) -> Result<String, AppError> {
    let bytes = std::fs::read(path).map_err(|e| AppError::io(path, e))?;
    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
        AppError::Extract {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;
    debug!("Extracted {} pages from {}", pages.len(), path.display());
    Ok(join_pages(&pages))
}

fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages.iter().fold(String::new(), |mut text, page| {
        text.push_str(page.as_ref());
        text.push('\n');
        text
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_appends_newline_per_page() {
        assert_eq!(join_pages(&["Jane Doe", "Experience"]), "Jane Doe\nExperience\n");
    }

    #[test]
    fn test_join_pages_empty_document() {
        let pages: Vec<String> = vec![];
        assert_eq!(join_pages(&pages), "");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = extract(Path::new("/nonexistent/resume.pdf")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }), "got {err:?}");
    }

    #[test]
    fn test_corrupt_pdf_is_extract_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = extract(&path).unwrap_err();
        assert!(matches!(err, AppError::Extract { .. }), "got {err:?}");
        assert!(err.to_string().contains("broken.pdf"));
    }
}
