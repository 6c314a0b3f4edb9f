//! Intake of the two design documents a generation run needs.
//!
//! Each slot holds at most one file. Selecting a file replaces the previous
//! one; cancelling a selection leaves the slot as it was. The extension
//! filter of each slot is advisory: a mismatch is logged and accepted.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Result type for intake operations
pub type IntakeResult<T> = Result<T, IntakeError>;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("{}: not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which document a file is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactSlot {
    /// PlantUML low-level design diagram
    Diagram,
    /// API specification document
    Spec,
}

impl ArtifactSlot {
    pub const ALL: [ArtifactSlot; 2] = [ArtifactSlot::Diagram, ArtifactSlot::Spec];

    /// Extension the file picker filters on (advisory)
    pub fn accepted_extension(&self) -> &'static str {
        match self {
            ArtifactSlot::Diagram => "puml",
            ArtifactSlot::Spec => "pdf",
        }
    }

    /// Prompt shown while the slot is empty
    pub fn prompt(&self) -> &'static str {
        match self {
            ArtifactSlot::Diagram => "Upload PUML File (LLD)",
            ArtifactSlot::Spec => "Upload PDF File (API Spec)",
        }
    }

    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.eq_ignore_ascii_case(self.accepted_extension()))
            .unwrap_or(false)
    }
}

impl std::fmt::Display for ArtifactSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactSlot::Diagram => f.write_str("diagram"),
            ArtifactSlot::Spec => f.write_str("spec"),
        }
    }
}

/// A user-selected file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeFile {
    /// File name shown to the user
    pub name: String,

    pub path: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

impl IntakeFile {
    /// Reference a file by name only, without touching the filesystem
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            size_bytes: None,
        }
    }

    /// Reference a file on disk; it must exist and be a regular file
    pub fn from_path(path: impl AsRef<Path>) -> IntakeResult<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| IntakeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(IntakeError::NotAFile(path.to_path_buf()));
        }
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            path: path.to_path_buf(),
            size_bytes: Some(metadata.len()),
        })
    }
}

/// The two intake slots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intake {
    pub diagram: Option<IntakeFile>,
    pub spec: Option<IntakeFile>,
}

impl Intake {
    /// Store `file` in `slot`. `None` means the user cancelled the picker
    /// and the slot keeps its current file.
    pub fn select(&mut self, slot: ArtifactSlot, file: Option<IntakeFile>) {
        let Some(file) = file else {
            return;
        };
        if !slot.matches_extension(&file.path) {
            warn!(
                %slot,
                file = %file.name,
                expected = slot.accepted_extension(),
                "selected file does not match the expected extension"
            );
        }
        info!(%slot, file = %file.name, "file selected");
        *self.slot_mut(slot) = Some(file);
    }

    pub fn get(&self, slot: ArtifactSlot) -> Option<&IntakeFile> {
        match slot {
            ArtifactSlot::Diagram => self.diagram.as_ref(),
            ArtifactSlot::Spec => self.spec.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: ArtifactSlot) -> &mut Option<IntakeFile> {
        match slot {
            ArtifactSlot::Diagram => &mut self.diagram,
            ArtifactSlot::Spec => &mut self.spec,
        }
    }

    /// Both documents are present
    pub fn is_complete(&self) -> bool {
        self.diagram.is_some() && self.spec.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_select_replaces_prior_file() {
        let mut intake = Intake::default();
        intake.select(ArtifactSlot::Diagram, Some(IntakeFile::named("a.puml")));
        intake.select(ArtifactSlot::Diagram, Some(IntakeFile::named("b.puml")));
        assert_eq!(intake.get(ArtifactSlot::Diagram).map(|f| f.name.as_str()), Some("b.puml"));
        assert!(intake.get(ArtifactSlot::Spec).is_none());
    }

    #[test]
    fn test_cancelled_selection_is_noop() {
        let mut intake = Intake::default();
        intake.select(ArtifactSlot::Spec, Some(IntakeFile::named("api.pdf")));
        intake.select(ArtifactSlot::Spec, None);
        assert_eq!(intake.get(ArtifactSlot::Spec).map(|f| f.name.as_str()), Some("api.pdf"));
    }

    #[test]
    fn test_extension_filter_is_advisory() {
        let mut intake = Intake::default();
        intake.select(ArtifactSlot::Diagram, Some(IntakeFile::named("notes.txt")));
        intake.select(ArtifactSlot::Spec, Some(IntakeFile::named("spec.docx")));
        assert!(intake.is_complete());
        assert!(!ArtifactSlot::Diagram.matches_extension(Path::new("notes.txt")));
        assert!(ArtifactSlot::Spec.matches_extension(Path::new("API.PDF")));
    }

    #[test]
    fn test_from_path_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("design.puml");
        fs::write(&path, "@startuml\n@enduml\n").unwrap();

        let file = IntakeFile::from_path(&path).unwrap();
        assert_eq!(file.name, "design.puml");
        assert_eq!(file.size_bytes, Some(19));
    }

    #[test]
    fn test_from_path_rejects_missing_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            IntakeFile::from_path(dir.path().join("missing.pdf")),
            Err(IntakeError::Io { .. })
        ));
        assert!(matches!(
            IntakeFile::from_path(dir.path()),
            Err(IntakeError::NotAFile(_))
        ));
    }
}
