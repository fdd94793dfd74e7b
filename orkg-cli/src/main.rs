//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use orkg_cli::CliError;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match orkg_cli::run().await {
        Ok(_) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("orkg-kge: {err}");
            std::process::exit(1);
        }
    }
}
