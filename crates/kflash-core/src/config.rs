//! Flash run configuration.
//!
//! All inputs are resolved once at startup into an explicit `FlashConfig`;
//! nothing reads the environment after that. Resolution order per field:
//! CLI flag, then `KFLASH_*` environment variable, then built-in default.
//! Empty environment values count as unset.

use crate::artifacts::ArtifactSet;
use crate::errors::FlashError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const ARTIFACT_DIR_ENV: &str = "KFLASH_ARTIFACT_DIR";
pub const DTBO_IMAGE_ENV: &str = "KFLASH_DTBO_IMAGE";
pub const KERNEL_IMAGE_ENV: &str = "KFLASH_KERNEL_IMAGE";
pub const FASTBOOT_ENV: &str = "KFLASH_FASTBOOT";
pub const PUSH_MODULES_ENV: &str = "KFLASH_PUSH_MODULES";

const DEFAULT_DTBO_IMAGE: &str = "dtbo.img";
const DEFAULT_KERNEL_IMAGE: &str = "boot.img";
const DEFAULT_FASTBOOT: &str = "fastboot";
const DEFAULT_PUSH_MODULES: &str = "push-modules";

/// Transport strategy for delivering artifacts to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashMode {
    /// Push kernel modules over ADB (device already booted).
    Adb,
    /// Flash boot and dtbo partitions over fastboot (device in bootloader).
    #[default]
    Fastboot,
}

impl FromStr for FlashMode {
    type Err = FlashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADB" => Ok(FlashMode::Adb),
            "FASTBOOT" => Ok(FlashMode::Fastboot),
            other => Err(FlashError::InvalidMode {
                given: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashMode::Adb => write!(f, "ADB"),
            FlashMode::Fastboot => write!(f, "FASTBOOT"),
        }
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Resolved flashing configuration.
#[derive(Debug, Clone)]
pub struct FlashConfig {
    pub artifact_dir: PathBuf,
    pub dtbo_image: String,
    pub kernel_image: String,
    pub fastboot: String,
    pub push_modules: String,
    pub mode: FlashMode,
    pub dry_run: bool,
}

/// Unresolved per-field overrides, straight from the CLI.
#[derive(Debug, Clone, Default)]
pub struct FlashOverrides {
    pub artifact_dir: Option<PathBuf>,
    pub dtbo_image: Option<String>,
    pub kernel_image: Option<String>,
    pub fastboot: Option<String>,
    pub push_modules: Option<String>,
    pub mode: Option<String>,
    pub dry_run: bool,
}

impl FlashConfig {
    pub fn resolve(overrides: FlashOverrides) -> Result<Self, FlashError> {
        let artifact_dir = overrides.artifact_dir.unwrap_or_else(|| {
            std::env::var_os(ARTIFACT_DIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
        });
        let mode = match overrides.mode.as_deref() {
            Some(s) => s.parse()?,
            None => FlashMode::default(),
        };
        Ok(Self {
            artifact_dir,
            dtbo_image: overrides
                .dtbo_image
                .unwrap_or_else(|| env_or(DTBO_IMAGE_ENV, DEFAULT_DTBO_IMAGE)),
            kernel_image: overrides
                .kernel_image
                .unwrap_or_else(|| env_or(KERNEL_IMAGE_ENV, DEFAULT_KERNEL_IMAGE)),
            fastboot: overrides
                .fastboot
                .unwrap_or_else(|| env_or(FASTBOOT_ENV, DEFAULT_FASTBOOT)),
            push_modules: overrides
                .push_modules
                .unwrap_or_else(|| env_or(PUSH_MODULES_ENV, DEFAULT_PUSH_MODULES)),
            mode,
            dry_run: overrides.dry_run,
        })
    }

    pub fn artifact_set(&self) -> ArtifactSet {
        ArtifactSet::new(&self.artifact_dir, &self.dtbo_image, &self.kernel_image)
    }

    pub fn dtbo_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.dtbo_image)
    }

    pub fn kernel_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.kernel_image)
    }
}
