//! Intake of user-picked paths into store entities.
//!
//! No filesystem access happens here; the driving view passes along whatever
//! byte size it already knows. A failed intake leaves the store untouched.

use crate::models::{EmailSource, FolderSource, ModelFile, SourceKind};
use crate::store::Store;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("selection did not yield a usable path")]
    EmptyPath,
    #[error("directory '{0}' is already selected")]
    DuplicateDirectory(String),
}

/// Register an email directory. Rejects a repeated directory name; the
/// file-based intake below deliberately does not.
pub fn select_email_directory(store: &Store, path: &str) -> Result<EmailSource, SelectionError> {
    let name = display_name(path)?;
    if store.email_sources().iter().any(|s| s.name == name) {
        return Err(SelectionError::DuplicateDirectory(name));
    }
    let source = EmailSource {
        id: Uuid::new_v4(),
        path: path.to_string(),
        kind: SourceKind::Directory,
        name,
        size: 0,
    };
    store.add_email_source(source.clone());
    Ok(source)
}

/// Register a single email file; kind comes from the extension.
pub fn select_email_file(
    store: &Store,
    path: &str,
    size: u64,
) -> Result<EmailSource, SelectionError> {
    let name = display_name(path)?;
    let source = EmailSource {
        id: Uuid::new_v4(),
        path: path.to_string(),
        kind: kind_for_path(path),
        name,
        size,
    };
    store.add_email_source(source.clone());
    Ok(source)
}

/// Register a data folder. The store silently ignores adds past the cap.
pub fn select_data_folder(store: &Store, path: &str) -> Result<FolderSource, SelectionError> {
    let name = display_name(path)?;
    let source = FolderSource {
        id: Uuid::new_v4(),
        path: path.to_string(),
        name,
    };
    store.add_folder_source(source.clone());
    Ok(source)
}

/// Set the model file, replacing any previous one.
pub fn select_model_file(
    store: &Store,
    path: &str,
    size: u64,
) -> Result<ModelFile, SelectionError> {
    let name = display_name(path)?;
    let file = ModelFile {
        id: Uuid::new_v4(),
        path: path.to_string(),
        name,
        size,
    };
    store.set_model_file(Some(file.clone()));
    Ok(file)
}

fn display_name(path: &str) -> Result<String, SelectionError> {
    Path::new(path.trim())
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(|n| n.to_string())
        .ok_or(SelectionError::EmptyPath)
}

fn kind_for_path(path: &str) -> SourceKind {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("pst") => SourceKind::Pst,
        Some("olm") => SourceKind::Olm,
        Some("mbox") => SourceKind::Mbox,
        _ => SourceKind::Other,
    }
}
