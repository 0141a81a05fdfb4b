//! Execution plan: the ordered transport steps for the selected mode.

use crate::config::{FlashConfig, FlashMode};
use std::fmt;

/// One external tool invocation in the plan.
#[derive(Debug, Clone)]
pub struct FlashStep {
    pub name: &'static str,
    pub description: String,
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FlashPlan {
    pub mode: FlashMode,
    pub steps: Vec<FlashStep>,
}

impl FlashPlan {
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!("Flash plan ({} mode):", self.mode));
        for (idx, step) in self.steps.iter().enumerate() {
            lines.push(format!(
                "{:02}. {} — {}",
                idx + 1,
                step.name,
                step.description
            ));
        }
        lines
    }
}

impl fmt::Display for FlashPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.summary_lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Build the step sequence for the configured mode.
///
/// ADB delivers the whole module directory in one push; FASTBOOT flashes the
/// kernel image to `boot` (raw transfer), then the DTBO image to `dtbo`, in
/// that order.
pub fn build_plan(cfg: &FlashConfig) -> FlashPlan {
    let steps = match cfg.mode {
        FlashMode::Adb => vec![FlashStep {
            name: "push-modules",
            description: format!(
                "Push kernel modules from {} to the device",
                cfg.artifact_dir.display()
            ),
            program: cfg.push_modules.clone(),
            args: vec![cfg.artifact_dir.display().to_string()],
        }],
        FlashMode::Fastboot => vec![
            FlashStep {
                name: "flash-kernel",
                description: format!(
                    "Raw-flash {} to the boot partition",
                    cfg.kernel_path().display()
                ),
                program: cfg.fastboot.clone(),
                args: vec![
                    "flash:raw".to_string(),
                    "boot".to_string(),
                    cfg.kernel_path().display().to_string(),
                ],
            },
            FlashStep {
                name: "flash-dtbo",
                description: format!("Flash {} to the dtbo partition", cfg.dtbo_path().display()),
                program: cfg.fastboot.clone(),
                args: vec![
                    "flash".to_string(),
                    "dtbo".to_string(),
                    cfg.dtbo_path().display().to_string(),
                ],
            },
        ],
    };
    FlashPlan {
        mode: cfg.mode,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_for(mode: FlashMode) -> FlashConfig {
        FlashConfig {
            artifact_dir: PathBuf::from("/work/out"),
            dtbo_image: "dtbo.img".to_string(),
            kernel_image: "boot.img".to_string(),
            fastboot: "fastboot".to_string(),
            push_modules: "push-modules".to_string(),
            mode,
            dry_run: false,
        }
    }

    #[test]
    fn adb_plan_has_single_push_step() {
        let plan = build_plan(&config_for(FlashMode::Adb));
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].name, "push-modules");
        assert_eq!(plan.steps[0].program, "push-modules");
        assert_eq!(plan.steps[0].args, vec!["/work/out".to_string()]);
    }

    #[test]
    fn fastboot_plan_flashes_kernel_then_dtbo() {
        let plan = build_plan(&config_for(FlashMode::Fastboot));
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].name, "flash-kernel");
        assert_eq!(plan.steps[0].program, "fastboot");
        assert_eq!(
            plan.steps[0].args,
            vec!["flash:raw", "boot", "/work/out/boot.img"]
        );
        assert_eq!(plan.steps[1].name, "flash-dtbo");
        assert_eq!(
            plan.steps[1].args,
            vec!["flash", "dtbo", "/work/out/dtbo.img"]
        );
    }

    #[test]
    fn configured_tool_paths_flow_into_steps() {
        let mut cfg = config_for(FlashMode::Fastboot);
        cfg.fastboot = "/opt/platform-tools/fastboot".to_string();
        let plan = build_plan(&cfg);
        assert!(plan
            .steps
            .iter()
            .all(|step| step.program == "/opt/platform-tools/fastboot"));
    }

    #[test]
    fn summary_lines_are_numbered() {
        let plan = build_plan(&config_for(FlashMode::Fastboot));
        let lines = plan.summary_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("FASTBOOT"));
        assert!(lines[1].starts_with("01. flash-kernel"));
        assert!(lines[2].starts_with("02. flash-dtbo"));
    }
}
