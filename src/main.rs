use clap::{Parser, Subcommand};
use minibank::api::HttpBackend;
use minibank::app::{App, TransferOutcome, View};
use minibank::config::Config;
use minibank::host::StaticHost;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "minibank", about = "Telegram Mini App bank client")]
struct Cli {
    /// Config file (default: ~/.config/minibank/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Init data to use instead of the one in the config file
    #[arg(long, global = true)]
    init_data: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the app and print its markup
    Render {
        #[arg(long, default_value = "dashboard")]
        view: View,
        /// History pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Send money and print the outcome
    Transfer {
        recipient: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Read events from stdin, print the app after each
    Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    match rt.block_on(run(cli)) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// `Ok(false)` means the app ran but the requested action did not succeed.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = Config::load(cli.config.as_deref())?;
    let init_data = cli.init_data.or_else(|| config.init_data.clone());
    let host = StaticHost::new(init_data, config.color_scheme);
    let app = App::new(HttpBackend::new(config.backend_url()?), config.settings());

    let started = app.initialize(&host).await;
    if let Err(ref e) = started {
        tracing::error!("{e}");
    }

    match cli.command {
        Commands::Render { view, pages } => {
            if started.is_ok() {
                app.navigate(view).await;
                for _ in 1..pages {
                    app.load_more().await;
                }
            }
            println!("{}", app.render());
            Ok(started.is_ok())
        }
        Commands::Transfer { recipient, amount } => {
            if started.is_err() {
                println!("{}", app.render());
                return Ok(false);
            }
            let outcome = app.submit_transfer(&recipient, &amount).await;
            if let Some(notification) = app.active_notification(tokio::time::Instant::now()) {
                println!("{}", notification.message);
            }
            Ok(outcome == TransferOutcome::Sent)
        }
        Commands::Shell => {
            println!("{}", app.render());
            if started.is_err() {
                return Ok(false);
            }
            let stdin = BufReader::new(tokio::io::stdin());
            minibank::shell::run_shell(&app, stdin, tokio::io::stdout()).await?;
            Ok(true)
        }
    }
}
