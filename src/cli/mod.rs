use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::chat::SessionId;

pub mod chat;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "8000")]
        port: String,
    },
    /// Start a chat session in the terminal
    Chat {
        /// Continue an existing session. `0` starts a new one
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        session_id: SessionId,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Chat { session_id }) => {
            chat::run(session_id).await?;
        }
        None => {}
    }

    Ok(())
}
