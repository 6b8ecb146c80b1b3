mod amount;
mod cli;
mod converter;
mod datetime;
mod error;
mod settings;
mod splitter;
mod table;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Cli, Commands};

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert { input, output } => cli::convert::run(&input, &output),
        Commands::Split {
            input,
            output_dir,
            rows_per_file,
            encoding,
        } => cli::split::run(&input, output_dir, rows_per_file, encoding),
        Commands::Config {
            rows_per_file,
            encoding,
            output_dir,
        } => cli::config::run(rows_per_file, encoding, output_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
