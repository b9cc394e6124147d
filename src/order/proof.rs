use serde::Serialize;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Opaque reference to an uploaded proof image. Never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProofRef(PathBuf);

impl ProofRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Result of asking the user for an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(ProofRef),
    Cancelled,
    PermissionDenied,
}

/// Image acquisition collaborator (photo library or camera).
///
/// `pick` blocks the session until the user picks, cancels, or access is
/// refused.
pub trait ProofSource {
    fn pick(&mut self) -> PickOutcome;
}

/// Picks an image from a path typed by the user.
///
/// A blank path cancels. A file that exists but can't be opened is reported
/// as a permission failure.
#[derive(Debug)]
pub struct PathProof {
    path: Option<PathBuf>,
}

impl PathProof {
    pub fn new(input: Option<&str>) -> Self {
        let path = input
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        Self { path }
    }
}

impl ProofSource for PathProof {
    fn pick(&mut self) -> PickOutcome {
        let Some(path) = self.path.take() else {
            return PickOutcome::Cancelled;
        };

        match File::open(&path) {
            Ok(_) => PickOutcome::Picked(ProofRef::new(path)),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => PickOutcome::PermissionDenied,
            Err(e) => {
                log::warn!("proof image {} unavailable: {e}", path.display());
                PickOutcome::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn blank_path_cancels() {
        assert_eq!(PathProof::new(None).pick(), PickOutcome::Cancelled);
        assert_eq!(PathProof::new(Some("   ")).pick(), PickOutcome::Cancelled);
    }

    #[test]
    fn missing_file_cancels() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.jpg");
        let mut source = PathProof::new(missing.to_str());
        assert_eq!(source.pick(), PickOutcome::Cancelled);
    }

    #[test]
    fn existing_file_is_picked() {
        let temp_dir = TempDir::new().unwrap();
        let image = temp_dir.path().join("gcash.jpg");
        fs::write(&image, b"not really a jpeg").unwrap();

        let mut source = PathProof::new(image.to_str());
        assert_eq!(source.pick(), PickOutcome::Picked(ProofRef::new(&image)));
    }
}
