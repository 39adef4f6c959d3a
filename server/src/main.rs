//! Lead Panel host CLI
//!
//! ```bash
//! leadpanel-server serve                        # Serve frontend/dist on port 8080
//! leadpanel-server serve --port 3000 --dist dist
//! leadpanel-server env-js -o dist/env.js        # Write env.js for a static host
//! ```

use clap::{Parser, Subcommand};
use leadpanel_server::{config, env_script, observability, start_server, ServeOptions, ServerResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "leadpanel-server")]
#[command(about = "Serve the Lead Panel dashboard with runtime configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Directory with the built frontend
        #[arg(short, long, default_value = "frontend/dist")]
        dist: PathBuf,
    },

    /// Write the env.js configuration script
    EnvJs {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    observability::init();
    let settings = config::load();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port, dist } => {
            start_server(ServeOptions { port, dist }, settings).await
        }
        Commands::EnvJs { output } => cmd_env_js(&settings, output.as_deref()),
    };

    if let Err(e) = result {
        tracing::error!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_env_js(settings: &leadpanel::SupabaseConfig, output: Option<&Path>) -> ServerResult<()> {
    let script = env_script(settings)?;
    match output {
        Some(path) => {
            fs::write(path, script)?;
            tracing::info!("💾 Saved to: {}", path.display());
        }
        None => print!("{}", script),
    }
    Ok(())
}
