use clap::Parser;
use skillctl_cli::commands::{self, EXIT_BROKEN};
use skillctl_cli::{Cli, Config};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Usage errors exit with clap's status 2
    let cli = Cli::parse();

    // Load configuration, then let flags win
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config.with_overrides(&cli),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(EXIT_BROKEN);
        }
    };

    if let Err(e) = skillctl_logging::init_logging(&config.logging.level) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let output = commands::run(&cli.command, &config.skills);

    let code = output.emit(&mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(code)
}
