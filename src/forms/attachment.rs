//! File attachment validation and per-slot storage.
//!
//! Each upload slot declares its own constraints (allowed extensions, size
//! cap in MB); a slot holds at most one file, and accepting a new file
//! overwrites the previous one.

use std::io;
use std::path::Path;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A file picked by the user: declared name plus raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    name: String,
    bytes: Vec<u8>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a candidate from disk, using the file name component as the
    /// declared name.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn size_mb(&self) -> f64 {
        self.size_bytes() as f64 / BYTES_PER_MB
    }

    /// The substring after the final `.`, lowercased. A name without a dot
    /// has no extension.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// Per-slot upload constraints. Extensions are matched case-insensitively
/// and carry no leading dot; an empty list admits any extension.
#[derive(Debug, Clone, PartialEq)]
pub struct FileConstraints {
    extensions: Vec<String>,
    max_size_mb: f64,
}

impl FileConstraints {
    pub fn new(extensions: &[&str], max_size_mb: f64) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
            max_size_mb,
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn max_size_mb(&self) -> f64 {
        self.max_size_mb
    }

    /// Validate a candidate. The extension check short-circuits the size
    /// check, so exactly one violation is reported at a time.
    pub fn accept(&self, candidate: &FileCandidate) -> Result<(), AttachmentError> {
        if !self.extensions.is_empty() {
            let extension = candidate.extension().unwrap_or_default();
            if !self.extensions.contains(&extension) {
                return Err(AttachmentError::UnsupportedType {
                    allowed: self.extensions.join(", "),
                });
            }
        }

        if candidate.size_mb() > self.max_size_mb {
            return Err(AttachmentError::OversizedFile {
                max_mb: self.max_size_mb,
            });
        }

        Ok(())
    }
}

/// Validation errors raised when a candidate fails its slot's constraints.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttachmentError {
    #[error("File type must be one of the following: {allowed}")]
    UnsupportedType { allowed: String },
    #[error("File size must be less than {max_mb}MB")]
    OversizedFile { max_mb: f64 },
}

/// Named upload slot binding at most one validated file.
#[derive(Debug, Clone)]
pub struct UploadSlot {
    key: &'static str,
    constraints: FileConstraints,
    file: Option<FileCandidate>,
}

impl UploadSlot {
    pub fn new(key: &'static str, constraints: FileConstraints) -> Self {
        Self {
            key,
            constraints,
            file: None,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn constraints(&self) -> &FileConstraints {
        &self.constraints
    }

    pub fn file(&self) -> Option<&FileCandidate> {
        self.file.as_ref()
    }

    pub fn is_filled(&self) -> bool {
        self.file.is_some()
    }

    /// Validate and store a candidate, replacing any prior file.
    pub fn attach(&mut self, candidate: FileCandidate) -> Result<(), AttachmentError> {
        self.constraints.accept(&candidate)?;
        self.file = Some(candidate);
        Ok(())
    }

    /// Handle a picker result that may contain several files: only the
    /// first is considered, the rest are silently ignored. An empty
    /// selection leaves the slot untouched.
    pub fn attach_selection(
        &mut self,
        mut selection: Vec<FileCandidate>,
    ) -> Result<(), AttachmentError> {
        if selection.is_empty() {
            return Ok(());
        }
        self.attach(selection.swap_remove(0))
    }

    pub fn clear(&mut self) {
        self.file = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn pdf_constraints(max_mb: f64) -> FileConstraints {
        FileConstraints::new(&["pdf"], max_mb)
    }

    fn file_of_mb(name: &str, mb: usize) -> FileCandidate {
        FileCandidate::new(name, vec![0u8; mb * 1024 * 1024])
    }

    #[test]
    fn extension_comparison_is_case_insensitive() {
        let report = file_of_mb("report.PDF", 2);
        assert!(pdf_constraints(5.0).accept(&report).is_ok());
    }

    #[test]
    fn oversized_file_is_rejected() {
        let report = file_of_mb("report.PDF", 2);
        assert_eq!(
            pdf_constraints(1.0).accept(&report),
            Err(AttachmentError::OversizedFile { max_mb: 1.0 })
        );
    }

    #[test]
    fn extension_check_short_circuits_size_check() {
        // Wrong type and too large: only the type violation is reported.
        let sheet = file_of_mb("budget.xlsx", 8);
        assert_eq!(
            pdf_constraints(1.0).accept(&sheet),
            Err(AttachmentError::UnsupportedType {
                allowed: "pdf".to_string()
            })
        );
    }

    #[test]
    fn empty_extension_list_admits_any_type() {
        let anything = FileCandidate::new("notes.txt", vec![1, 2, 3]);
        let constraints = FileConstraints::new(&[], 5.0);
        assert!(constraints.accept(&anything).is_ok());
    }

    #[test]
    fn name_without_dot_fails_a_typed_slot() {
        let bare = FileCandidate::new("README", vec![1]);
        assert!(pdf_constraints(5.0).accept(&bare).is_err());
    }

    #[test]
    fn acceptance_is_idempotent() {
        let constraints = pdf_constraints(5.0);
        let report = file_of_mb("report.pdf", 2);
        assert!(constraints.accept(&report).is_ok());
        assert!(constraints.accept(&report).is_ok());
    }

    #[test]
    fn attach_overwrites_previous_file() {
        let mut slot = UploadSlot::new("teamCv", pdf_constraints(30.0));
        slot.attach(file_of_mb("cv-v1.pdf", 1)).expect("accepted");
        slot.attach(file_of_mb("cv-v2.pdf", 1)).expect("accepted");
        assert_eq!(slot.file().map(FileCandidate::name), Some("cv-v2.pdf"));
    }

    #[test]
    fn multi_file_selection_only_uses_the_first_file() {
        let mut slot = UploadSlot::new("documents", pdf_constraints(30.0));
        slot.attach_selection(vec![
            file_of_mb("first.pdf", 1),
            file_of_mb("second.pdf", 1),
            file_of_mb("third.pdf", 1),
        ])
        .expect("first file accepted");
        assert_eq!(slot.file().map(FileCandidate::name), Some("first.pdf"));
    }

    #[test]
    fn empty_selection_leaves_slot_untouched() {
        let mut slot = UploadSlot::new("documents", pdf_constraints(30.0));
        slot.attach(file_of_mb("kept.pdf", 1)).expect("accepted");
        slot.attach_selection(Vec::new()).expect("no-op");
        assert_eq!(slot.file().map(FileCandidate::name), Some("kept.pdf"));
    }

    #[test]
    fn rejected_candidate_does_not_replace_existing_file() {
        let mut slot = UploadSlot::new("budget", pdf_constraints(1.0));
        slot.attach(FileCandidate::new("budget.pdf", vec![0u8; 512]))
            .expect("accepted");
        assert!(slot.attach(file_of_mb("huge.pdf", 2)).is_err());
        assert_eq!(slot.file().map(FileCandidate::name), Some("budget.pdf"));
    }

    #[test]
    fn candidate_can_be_read_from_disk() {
        let mut temp = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .expect("temp file");
        temp.write_all(b"%PDF-1.7 stub").expect("write");
        let candidate = FileCandidate::from_path(temp.path()).expect("read");
        assert_eq!(candidate.extension().as_deref(), Some("pdf"));
        assert_eq!(candidate.size_bytes(), 13);
    }
}
