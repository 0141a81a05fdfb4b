//! CLI argument parsing for kflash.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kflash")]
#[command(version)]
#[command(about = "⚡ kflash - kernel artifact flasher for Android dev boards")]
#[command(long_about = "⚡ kflash - kernel artifact flasher for Android dev boards\n\n\
    Validates a kernel build output directory (DTBO image, kernel image,\n\
    kernel modules) and flashes it to the connected device over FASTBOOT\n\
    (default) or ADB.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory containing build artifacts (DTBO image, kernel image, *.ko)
    #[arg(long, global = true)]
    pub artifact_dir: Option<PathBuf>,

    /// DTBO image filename inside the artifact directory
    #[arg(long, global = true)]
    pub dtbo_image: Option<String>,

    /// Kernel image filename inside the artifact directory
    #[arg(long, global = true)]
    pub kernel_image: Option<String>,

    /// Validate and print the plan without invoking any tools
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// 🔍 Check that every required artifact is present
    Validate,

    /// 💾 Flash artifacts to the connected device
    Flash {
        /// Flash mode: ADB or FASTBOOT (defaults to FASTBOOT)
        mode: Option<String>,

        /// fastboot executable to invoke
        #[arg(long)]
        fastboot: Option<String>,

        /// Module push helper to invoke in ADB mode
        #[arg(long)]
        push_modules: Option<String>,
    },
}
