use std::io::Write;
use std::sync::Arc;

use swipeheist::commands::{Command, Reply, Shell, HELP};
use swipeheist::config::Settings;
use swipeheist::{CensusClient, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn prompt(state: impl std::fmt::Display) {
    print!("{}> ", state);
    let _ = std::io::stdout().flush();
}

fn print_output(text: &str) {
    if !text.is_empty() {
        print!("{}", text);
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging; LOG_LEVEL wins over the configured level
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting SwipeHeist...");

    let client = match CensusClient::new(settings.census.clone()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create Census client: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let session = Session::from_settings(&settings).map_err(|e| {
        error!("Invalid session settings: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!(
        "Census endpoint {} (ACS {} {})",
        settings.census.endpoint, settings.census.year, settings.census.dataset
    );

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let initial_state = session.state();
    let mut shell = Shell::new(session, client, events_tx);

    println!("SwipeHeist: see what card processing fees cost your town.");
    print!("{}", HELP);
    print_output(&shell.start_load(initial_state));
    prompt(shell.session().state());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                match Command::parse(&line) {
                    Ok(Some(command)) => match shell.execute(command) {
                        Reply::Output(text) => print_output(&text),
                        Reply::Quit => break,
                    },
                    Ok(None) => {}
                    Err(e) => println!("{}", e),
                }
                prompt(shell.session().state());
            }
            Some(event) = events_rx.recv() => {
                let text = shell.handle_event(event);
                if !text.is_empty() {
                    println!();
                    print_output(&text);
                    prompt(shell.session().state());
                }
            }
        }
    }

    info!("Bye");
    Ok(())
}
