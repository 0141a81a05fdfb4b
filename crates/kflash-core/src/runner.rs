//! Flash run orchestration: validate artifacts, build the plan, execute it.

use crate::config::FlashConfig;
use crate::errors::FlashError;
use crate::plan::{build_plan, FlashStep};
use crate::report::{self, FlashReportWriter, RunMode, SelectionReport};
use kflash_transport::{ToolRunner, TransportError};
use log::info;

/// Check that every required artifact is present, in the fixed order
/// DTBO image, kernel image, kernel modules.
pub fn validate(cfg: &FlashConfig) -> Result<(), FlashError> {
    info!("🔍 Validating artifacts in {}", cfg.artifact_dir.display());
    cfg.artifact_set().validate()?;
    info!("✅ All required artifacts present");
    Ok(())
}

struct RunContext<'a> {
    runner: &'a dyn ToolRunner,
    report: FlashReportWriter,
}

impl RunContext<'_> {
    fn status(&self, msg: &str) {
        info!("{msg}");
        self.report.status(msg);
    }

    fn execute_step(&self, step: &FlashStep) -> Result<(), FlashError> {
        info!("📍 {}: {}", step.name, step.description);
        self.report.step_started(step.name);
        match self.runner.run_tool(&step.program, &step.args) {
            Ok(()) => {
                info!("✅ {} done", step.name);
                self.report.step_completed(step.name);
                Ok(())
            }
            Err(TransportError::ToolFailed { program, code }) => {
                let err = FlashError::StepFailed {
                    step: step.name.to_string(),
                    program,
                    code,
                };
                self.report.step_error(step.name, &err.to_string());
                Err(err)
            }
            Err(other) => {
                let err = FlashError::Transport(other);
                self.report.step_error(step.name, &err.to_string());
                Err(err)
            }
        }
    }
}

/// Full flash run. Steps execute in plan order and the run aborts on the
/// first step that fails.
pub fn run(cfg: &FlashConfig, runner: &dyn ToolRunner) -> Result<(), FlashError> {
    info!("⚡ kflash: kernel artifact flasher");
    info!("💾 Flash mode: {}", cfg.mode);
    info!("📀 Artifact dir: {}", cfg.artifact_dir.display());
    info!("📀 Kernel image: {}", cfg.kernel_image);
    info!("📀 DTBO image: {}", cfg.dtbo_image);

    let selection = SelectionReport {
        mode: cfg.mode.to_string(),
        artifact_dir: cfg.artifact_dir.display().to_string(),
        dtbo_image: cfg.dtbo_image.clone(),
        kernel_image: cfg.kernel_image.clone(),
        fastboot: cfg.fastboot.clone(),
        push_modules: cfg.push_modules.clone(),
    };
    let run_mode = if cfg.dry_run {
        RunMode::DryRun
    } else {
        RunMode::Execute
    };
    let report = FlashReportWriter::new(
        report::report_path(&cfg.artifact_dir),
        run_mode,
        selection,
    );

    if let Err(err) = validate(cfg) {
        report.fail(&err.to_string());
        return Err(err);
    }

    let plan = build_plan(cfg);
    for line in plan.summary_lines() {
        info!("📋 {}", line);
    }

    let ctx = RunContext { runner, report };

    if cfg.dry_run {
        ctx.status("🧪 DRY-RUN MODE - no tools will be invoked");
        for step in &plan.steps {
            ctx.report.step_skipped(step.name);
        }
        ctx.report.complete();
        return Ok(());
    }

    for step in &plan.steps {
        ctx.execute_step(step)?;
    }

    ctx.status("🎉 Flash complete!");
    ctx.report.complete();
    Ok(())
}
