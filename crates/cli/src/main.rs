use anyhow::Context;
use clap::{Parser, Subcommand};

use quill_kernel::settings::Settings;

/// Books and todos resource services.
#[derive(Debug, Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Override `server.port` from configuration.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Apply pending module migrations and exit.
    Migrate,
    /// Print the merged OpenAPI document.
    Openapi {
        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().with_context(|| "failed to load Quill settings")?;

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            quill_telemetry::init(&settings.telemetry)?;
            if let Some(port) = port {
                settings.server.port = port;
            }
            quill_app::serve(settings).await
        }
        Command::Migrate => {
            quill_telemetry::init(&settings.telemetry)?;
            let applied = quill_app::migrate(settings).await?;
            tracing::info!(applied, "migrations applied");
            Ok(())
        }
        Command::Openapi { pretty } => {
            let document = quill_app::openapi_document(settings).await?;
            let rendered = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            println!("{rendered}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["quill"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_accepts_a_port_override() {
        let cli = Cli::parse_from(["quill", "serve", "--port", "9090"]);
        assert!(matches!(
            cli.command,
            Some(Command::Serve { port: Some(9090) })
        ));
    }
}
