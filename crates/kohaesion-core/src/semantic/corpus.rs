//! Reference corpus loading from a directory of text files.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, instrument, warn};

use crate::document::{Document, DocumentLoader};
use crate::error::{MetricError, MetricResult};
use crate::nlp::Pipeline;

/// File extensions read as corpus documents.
const CORPUS_EXTENSIONS: &[&str] = &["txt", "md"];

/// Corpus files in `dir`, sorted by name.
pub fn corpus_files(dir: &Utf8Path) -> MetricResult<Vec<Utf8PathBuf>> {
    let io_error = |source| MetricError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in dir.read_dir_utf8().map_err(io_error)? {
        let path = entry.map_err(io_error)?.into_path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| CORPUS_EXTENSIONS.contains(&ext))
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every `.txt` and `.md` file in `dir` as a corpus document.
///
/// Empty files are skipped with a warning.
#[instrument(skip(pipeline), fields(dir = %dir))]
pub fn load_dir(
    dir: &Utf8Path,
    pipeline: &Pipeline,
    max_bytes: Option<usize>,
) -> MetricResult<Vec<Document>> {
    let mut documents = Vec::new();
    for path in corpus_files(dir)? {
        let loaded = DocumentLoader::new()
            .with_pipeline(pipeline.clone())
            .with_file(&path)
            .with_max_bytes(max_bytes)
            .load();
        match loaded {
            Ok(document) => documents.push(document),
            Err(MetricError::InvalidInput(reason)) if reason == "text is empty" => {
                warn!(path = %path, "skipping empty corpus file");
            }
            Err(err) => return Err(err),
        }
    }
    debug!(documents = documents.len(), "corpus loaded");
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_sorted_text_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        std::fs::write(root.join("b.txt"), "Zweiter Text.").unwrap();
        std::fs::write(root.join("a.md"), "# Titel\n\nErster Text.").unwrap();
        std::fs::write(root.join("leer.txt"), "").unwrap();
        std::fs::write(root.join("notes.csv"), "x,y").unwrap();

        let docs = load_dir(root, &Pipeline::default(), None).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].paragraphs(), ["Erster Text."]);
        assert_eq!(docs[1].paragraphs(), ["Zweiter Text."]);
    }

    #[test]
    fn missing_dir() {
        let err = load_dir(Utf8Path::new("/nonexistent/corpus"), &Pipeline::default(), None)
            .unwrap_err();
        assert!(matches!(err, MetricError::Io { .. }));
    }
}
