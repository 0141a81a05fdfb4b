use clap::Parser;

fn main() {
    let cli = kflash_cli::cli::Cli::parse();
    kflash_core::logging::init_with(cli.log_file.clone());

    if let Err(err) = kflash_cli::run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}
