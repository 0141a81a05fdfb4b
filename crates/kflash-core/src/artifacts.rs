//! Required flash artifacts and their on-disk validation.

use crate::errors::FlashError;
use glob::Pattern;
use std::fmt;
use std::path::{Path, PathBuf};

/// Logical artifact categories a flash run requires on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    DtboImage,
    KernelImage,
    KernelModules,
}

impl ArtifactKind {
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::DtboImage => "DTBO image",
            ArtifactKind::KernelImage => "kernel image",
            ArtifactKind::KernelModules => "kernel modules",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where an artifact is expected: a direct path or a glob pattern.
#[derive(Debug, Clone)]
pub enum ArtifactLocator {
    File(PathBuf),
    Glob(String),
}

impl ArtifactLocator {
    fn describe(&self) -> String {
        match self {
            ArtifactLocator::File(path) => path.display().to_string(),
            ArtifactLocator::Glob(pattern) => pattern.clone(),
        }
    }

    fn is_present(&self) -> bool {
        match self {
            ArtifactLocator::File(path) => path.exists(),
            ArtifactLocator::Glob(pattern) => glob::glob(pattern)
                .map(|mut paths| paths.any(|entry| entry.is_ok()))
                .unwrap_or(false),
        }
    }
}

/// The fixed, ordered set of artifacts a flash run requires.
///
/// Validation order is deterministic (DTBO, kernel image, modules) and the
/// first missing artifact wins.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    entries: Vec<(ArtifactKind, ArtifactLocator)>,
}

impl ArtifactSet {
    pub fn new(artifact_dir: &Path, dtbo_image: &str, kernel_image: &str) -> Self {
        // Escape the directory component so a path containing glob
        // metacharacters cannot change what "*.ko" matches.
        let module_pattern = format!(
            "{}/*.ko",
            Pattern::escape(&artifact_dir.display().to_string())
        );
        let entries = vec![
            (
                ArtifactKind::DtboImage,
                ArtifactLocator::File(artifact_dir.join(dtbo_image)),
            ),
            (
                ArtifactKind::KernelImage,
                ArtifactLocator::File(artifact_dir.join(kernel_image)),
            ),
            (
                ArtifactKind::KernelModules,
                ArtifactLocator::Glob(module_pattern),
            ),
        ];
        Self { entries }
    }

    pub fn entries(&self) -> &[(ArtifactKind, ArtifactLocator)] {
        &self.entries
    }

    /// Check that every required artifact resolves to at least one existing
    /// filesystem entry, reporting the first missing one.
    pub fn validate(&self) -> Result<(), FlashError> {
        for (kind, locator) in &self.entries {
            if !locator.is_present() {
                return Err(FlashError::MissingArtifact {
                    artifact: *kind,
                    search: locator.describe(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn populate_all(dir: &Path) {
        fs::write(dir.join("dtbo.img"), b"dtbo").unwrap();
        fs::write(dir.join("boot.img"), b"kernel").unwrap();
        fs::write(dir.join("wifi.ko"), b"mod").unwrap();
        fs::write(dir.join("gpu.ko"), b"mod").unwrap();
    }

    #[test]
    fn all_artifacts_present_passes() {
        let tmp = tempdir().unwrap();
        populate_all(tmp.path());
        // Unrelated files must not affect validation.
        fs::write(tmp.path().join("build.log"), b"noise").unwrap();

        let set = ArtifactSet::new(tmp.path(), "dtbo.img", "boot.img");
        set.validate().unwrap();
    }

    #[test]
    fn missing_dtbo_reported_first() {
        let tmp = tempdir().unwrap();
        // Nothing on disk at all: DTBO must still be the artifact reported.
        let set = ArtifactSet::new(tmp.path(), "dtbo.img", "boot.img");
        let err = set.validate().unwrap_err();
        match err {
            FlashError::MissingArtifact { artifact, search } => {
                assert_eq!(artifact, ArtifactKind::DtboImage);
                assert!(search.ends_with("dtbo.img"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_kernel_reported_after_dtbo() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("dtbo.img"), b"dtbo").unwrap();
        let set = ArtifactSet::new(tmp.path(), "dtbo.img", "boot.img");
        let err = set.validate().unwrap_err();
        assert!(matches!(
            err,
            FlashError::MissingArtifact {
                artifact: ArtifactKind::KernelImage,
                ..
            }
        ));
    }

    #[test]
    fn missing_modules_detected_by_glob() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("dtbo.img"), b"dtbo").unwrap();
        fs::write(tmp.path().join("boot.img"), b"kernel").unwrap();
        let set = ArtifactSet::new(tmp.path(), "dtbo.img", "boot.img");
        let err = set.validate().unwrap_err();
        assert!(matches!(
            err,
            FlashError::MissingArtifact {
                artifact: ArtifactKind::KernelModules,
                ..
            }
        ));
    }

    #[test]
    fn single_module_is_enough() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("dtbo.img"), b"dtbo").unwrap();
        fs::write(tmp.path().join("boot.img"), b"kernel").unwrap();
        fs::write(tmp.path().join("only.ko"), b"mod").unwrap();
        ArtifactSet::new(tmp.path(), "dtbo.img", "boot.img")
            .validate()
            .unwrap();
    }

    #[test]
    fn custom_filenames_are_respected() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("overlay.img"), b"dtbo").unwrap();
        fs::write(tmp.path().join("Image.gz"), b"kernel").unwrap();
        fs::write(tmp.path().join("only.ko"), b"mod").unwrap();
        ArtifactSet::new(tmp.path(), "overlay.img", "Image.gz")
            .validate()
            .unwrap();
    }
}
