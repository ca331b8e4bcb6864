use resume_ranker::screening::Document;
use std::path::Path;
use tracing::warn;

/// Plain-text extraction. Anything that is not text, or cannot be read, is
/// handed to the ranker as an empty document, which the ranker filters out.
pub(crate) fn load_document(path: &Path) -> Document {
    let id = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if !is_plain_text(path) {
        warn!(path = %path.display(), "unsupported document format, skipping");
        return Document::new(id, String::new());
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unable to read document, skipping");
            return Document::new(id, String::new());
        }
    };
    let text = String::from_utf8_lossy(&bytes).into_owned();
    if text.trim().is_empty() {
        warn!(path = %path.display(), "document contains no text");
    }
    Document::new(id, text)
}

pub(crate) fn load_documents<P: AsRef<Path>>(paths: &[P]) -> Vec<Document> {
    paths
        .iter()
        .map(|path| load_document(path.as_ref()))
        .collect()
}

fn is_plain_text(path: &Path) -> bool {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    if matches!(extension.as_deref(), Some("txt" | "md" | "text")) {
        return true;
    }
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.type_() == mime_guess::mime::TEXT)
        .unwrap_or(false)
}
