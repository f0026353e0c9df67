use std::io::{BufReader, Write};

use clap::{Parser, Subcommand};
use tracing::info;

use pipechat::{Config, Session};

#[derive(Parser)]
#[command(name = "pipechat", version, about = "Filesystem-mediated group chat over named pipes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Join a chat room and exchange messages with its members
    Join {
        /// Room name
        room: String,
        /// User name, also the name of this user's mailbox
        user: String,
    },
    /// Select delimiter-separated fields from standard input
    Cut {
        /// Field delimiter
        #[arg(short = 'd', default_value_t = '\t')]
        delimiter: char,
        /// Comma-separated list of 1-based field indices (e.g. 1,3)
        #[arg(short = 'f')]
        fields: String,
    },
    /// Print status information for a process
    Pstat {
        /// Process identifier
        pid: u32,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration; a missing config.toml means defaults.
    let config = match Config::load_or_default("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pipechat: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging. Stdout belongs to the chat, so records go to the
    // configured file; if that fails, fall back to stderr.
    if pipechat::logging::init(&config.logging).is_err() {
        pipechat::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = run(cli, config).await {
        eprintln!("pipechat: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: Config) -> pipechat::Result<()> {
    match cli.command {
        Command::Join { room, user } => {
            let session = Session::join(&config.chat, &room, &user)?;
            session.run().await
        }
        Command::Cut { delimiter, fields } => {
            let fields = pipechat::cut::parse_fields(&fields)?;
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            pipechat::cut::run(BufReader::new(stdin.lock()), &mut out, delimiter, &fields)?;
            out.flush()?;
            Ok(())
        }
        Command::Pstat { pid } => {
            info!(pid, "inspecting process");
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            pipechat::pstat::run(pid, &mut out)?;
            out.flush()?;
            Ok(())
        }
    }
}
