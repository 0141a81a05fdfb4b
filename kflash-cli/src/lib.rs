pub mod cli;

use kflash_core::config::{FlashConfig, FlashOverrides};
use kflash_core::errors::FlashError;
use kflash_core::runner;
use kflash_transport::SystemRunner;

pub fn run(cli: cli::Cli) -> Result<(), FlashError> {
    match &cli.command {
        cli::Command::Validate => {
            log::info!("🔍 Running artifact validation...");
            let cfg = FlashConfig::resolve(base_overrides(&cli))?;
            runner::validate(&cfg)
        }
        cli::Command::Flash {
            mode,
            fastboot,
            push_modules,
        } => {
            log::info!("💾 Running flash...");
            let mut overrides = base_overrides(&cli);
            overrides.mode = mode.clone();
            overrides.fastboot = fastboot.clone();
            overrides.push_modules = push_modules.clone();
            let cfg = FlashConfig::resolve(overrides)?;
            runner::run(&cfg, &SystemRunner::new())
        }
    }
}

fn base_overrides(cli: &cli::Cli) -> FlashOverrides {
    FlashOverrides {
        artifact_dir: cli.artifact_dir.clone(),
        dtbo_image: cli.dtbo_image.clone(),
        kernel_image: cli.kernel_image.clone(),
        fastboot: None,
        push_modules: None,
        mode: None,
        dry_run: cli.dry_run,
    }
}
