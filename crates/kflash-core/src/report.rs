//! Persistent flash report artifact.
//!
//! Every flash run writes a small JSON report next to the artifacts
//! (override via `KFLASH_REPORT_PATH` for tests). Reporting is best-effort:
//! a report that cannot be written never fails the flash itself.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

pub const REPORT_PATH_ENV: &str = "KFLASH_REPORT_PATH";
const DEFAULT_REPORT_NAME: &str = "kflash-report.json";

fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

pub fn report_path(artifact_dir: &Path) -> PathBuf {
    std::env::var_os(REPORT_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| artifact_dir.join(DEFAULT_REPORT_NAME))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    DryRun,
    Execute,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Started,
    Completed,
    Skipped,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub name: String,
    pub started_at_unix_ms: Option<u64>,
    pub ended_at_unix_ms: Option<u64>,
    pub status: StepStatus,
    #[serde(default)]
    pub error: Option<String>,
}

/// The resolved inputs the run was performed with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    pub mode: String,
    pub artifact_dir: String,
    pub dtbo_image: String,
    pub kernel_image: String,
    pub fastboot: String,
    pub push_modules: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashReport {
    pub report_version: u32,
    pub started_at_unix_ms: u64,
    pub ended_at_unix_ms: Option<u64>,
    pub run_mode: RunMode,
    pub selection: SelectionReport,
    #[serde(default)]
    pub steps: Vec<StepRecord>,
    #[serde(default)]
    pub last_status: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl FlashReport {
    fn new(run_mode: RunMode, selection: SelectionReport) -> Self {
        Self {
            report_version: 1,
            started_at_unix_ms: now_unix_ms(),
            ended_at_unix_ms: None,
            run_mode,
            selection,
            steps: Vec::new(),
            last_status: None,
            errors: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct FlashReportWriter {
    path: PathBuf,
    inner: Arc<Mutex<FlashReport>>,
}

impl FlashReportWriter {
    pub fn new(path: PathBuf, run_mode: RunMode, selection: SelectionReport) -> Self {
        let report = FlashReport::new(run_mode, selection);
        let writer = Self {
            path,
            inner: Arc::new(Mutex::new(report)),
        };
        writer.persist().ok(); // best-effort at creation
        writer
    }

    pub fn status(&self, msg: &str) {
        if let Ok(mut report) = self.inner.lock() {
            report.last_status = Some(msg.to_string());
        }
        let _ = self.persist();
    }

    pub fn step_started(&self, name: &str) {
        if let Ok(mut report) = self.inner.lock() {
            report.steps.push(StepRecord {
                name: name.to_string(),
                started_at_unix_ms: Some(now_unix_ms()),
                ended_at_unix_ms: None,
                status: StepStatus::Started,
                error: None,
            });
        }
        let _ = self.persist();
    }

    pub fn step_completed(&self, name: &str) {
        if let Ok(mut report) = self.inner.lock() {
            if let Some(last) = report
                .steps
                .iter_mut()
                .rev()
                .find(|s| s.name == name && matches!(s.status, StepStatus::Started))
            {
                last.status = StepStatus::Completed;
                last.ended_at_unix_ms = Some(now_unix_ms());
            }
        }
        let _ = self.persist();
    }

    pub fn step_skipped(&self, name: &str) {
        if let Ok(mut report) = self.inner.lock() {
            report.steps.push(StepRecord {
                name: name.to_string(),
                started_at_unix_ms: None,
                ended_at_unix_ms: Some(now_unix_ms()),
                status: StepStatus::Skipped,
                error: None,
            });
        }
        let _ = self.persist();
    }

    pub fn step_error(&self, name: &str, error: &str) {
        if let Ok(mut report) = self.inner.lock() {
            report.errors.push(error.to_string());
            if let Some(last) = report
                .steps
                .iter_mut()
                .rev()
                .find(|s| s.name == name && matches!(s.status, StepStatus::Started))
            {
                last.status = StepStatus::Error;
                last.ended_at_unix_ms = Some(now_unix_ms());
                last.error = Some(error.to_string());
            } else {
                report.steps.push(StepRecord {
                    name: name.to_string(),
                    started_at_unix_ms: Some(now_unix_ms()),
                    ended_at_unix_ms: Some(now_unix_ms()),
                    status: StepStatus::Error,
                    error: Some(error.to_string()),
                });
            }
            report.ended_at_unix_ms = Some(now_unix_ms());
        }
        let _ = self.persist();
    }

    /// Record a run-level failure (validation, spawn errors).
    pub fn fail(&self, error: &str) {
        if let Ok(mut report) = self.inner.lock() {
            report.errors.push(error.to_string());
            report.ended_at_unix_ms = Some(now_unix_ms());
        }
        let _ = self.persist();
    }

    pub fn complete(&self) {
        if let Ok(mut report) = self.inner.lock() {
            report.ended_at_unix_ms = Some(now_unix_ms());
        }
        let _ = self.persist();
    }

    pub fn persist(&self) -> anyhow::Result<()> {
        let report = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("flash report mutex poisoned"))?
            .clone();
        write_json_atomic(&self.path, &report).context("failed to persist flash report")
    }
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report directory: {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    let payload = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    fs::write(&tmp, payload).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to atomically replace report: {}", path.display()))?;
    if let Some(parent) = parent {
        let dir = fs::File::open(parent).with_context(|| {
            format!(
                "failed to open report directory for sync: {}",
                parent.display()
            )
        })?;
        let _ = dir.sync_all();
    }
    Ok(())
}
