use crate::prelude::*;
use std::path::{Path, PathBuf};
use toanki_core::outline::{parse_opml, OutlineDocument};

const OPML_EXTENSION: &str = "opml";

/// Find the OPML export to import
///
/// A file path is used as-is. A directory must contain exactly one `.opml`
/// file.
pub fn locate_outline_file(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    let entries = std::fs::read_dir(path).map_err(|e| {
        Error::OutlineFile(format!("failed to read directory {}: {e}", path.display()))
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry?;
        let candidate = entry.path();
        let is_opml = candidate
            .extension()
            .is_some_and(|ext| ext == OPML_EXTENSION);
        if candidate.is_file() && is_opml {
            candidates.push(candidate);
        }
    }

    match candidates.len() {
        0 => Err(Error::OutlineFile(format!("no OPML file found in {}", path.display())).into()),
        1 => Ok(candidates.remove(0)),
        n => Err(Error::OutlineFile(format!(
            "more than one OPML file in {} ({n} found); cannot pick one to import",
            path.display()
        ))
        .into()),
    }
}

/// Locate, read, and parse the OPML export under `path`
pub fn load_outline_document(path: &Path) -> Result<OutlineDocument> {
    let file = locate_outline_file(path)?;
    log::info!("Reading outline from {}", file.display());

    let xml = std::fs::read_to_string(&file)
        .map_err(|e| Error::OutlineFile(format!("failed to open {}: {e}", file.display())))?;

    parse_opml(&xml).wrap_err_with(|| format!("failed to parse {}", file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"<opml><head><title>T</title></head><body><outline text="T"/></body></opml>"#;

    #[test]
    fn test_locate_single_opml_in_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("export.opml"), MINIMAL).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let found = locate_outline_file(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("export.opml"));
    }

    #[test]
    fn test_locate_accepts_file_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("any-name.xml");
        std::fs::write(&file, MINIMAL).unwrap();

        assert_eq!(locate_outline_file(&file).unwrap(), file);
    }

    #[test]
    fn test_locate_no_opml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("readme.md"), "").unwrap();

        let err = locate_outline_file(dir.path()).unwrap_err();
        assert!(err.to_string().contains("no OPML file found"));
    }

    #[test]
    fn test_locate_ignores_opml_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nested.opml")).unwrap();

        assert!(locate_outline_file(dir.path()).is_err());
    }

    #[test]
    fn test_locate_more_than_one_opml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.opml"), MINIMAL).unwrap();
        std::fs::write(dir.path().join("b.opml"), MINIMAL).unwrap();

        let err = locate_outline_file(dir.path()).unwrap_err();
        assert!(err.to_string().contains("more than one OPML file"));
    }

    #[test]
    fn test_locate_missing_directory() {
        let dir = TempDir::new().unwrap();
        assert!(locate_outline_file(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_load_outline_document() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("export.opml"), MINIMAL).unwrap();

        let doc = load_outline_document(dir.path()).unwrap();
        assert_eq!(doc.title, "T");
        assert_eq!(doc.outline_root().unwrap().label, "T");
    }

    #[test]
    fn test_load_outline_document_reports_structure_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("export.opml"), "<opml><body/></opml>").unwrap();

        let err = load_outline_document(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("missing `title` node"));
    }
}
