use std::env;
use std::sync::Arc;

use coach::{
    CoachConfig, Coach, CoachError, Identity, LoggingObserver, SqliteEntityStore, StaticIdentity,
    SubmitOutcome, QUICK_PROMPTS,
};
use completion_client::CompletionClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn get_identity() -> Identity {
    let id = env::var("COACH_USER_ID").unwrap_or_else(|_| "local-user".to_string());
    let name = env::var("COACH_USER_NAME").unwrap_or_default();
    let email = env::var("COACH_USER_EMAIL").unwrap_or_default();
    Identity::new(id, name, email)
}

fn report(result: Result<SubmitOutcome, CoachError>, assistant: &str, unsent: Option<String>) {
    match result {
        Ok(SubmitOutcome::Replied(reply)) => println!("\n{}: {}\n", assistant, reply),
        Ok(SubmitOutcome::Ignored(reason)) => println!("(not sent: {:?})", reason),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(text) = unsent.filter(|t| !t.is_empty()) {
                eprintln!("Unsent message kept: {}", text);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CoachConfig::from_env();
    let store = SqliteEntityStore::open(&config.database_url).await?;
    let generator = CompletionClient::from_env()?;
    info!("Using database {}", config.database_url);

    let assistant = config.assistant_name.clone();
    let coach = Coach::new(Arc::new(store), Arc::new(generator), config)
        .with_observer(Arc::new(LoggingObserver));
    let session = coach
        .open_session(&StaticIdentity::new(get_identity()))
        .await?;

    if session.visible_turns().await.is_empty() {
        println!("{}\n", session.greeting());
    } else {
        for turn in session.visible_turns().await {
            println!("{}", turn.transcript_line());
        }
        println!();
    }
    for (i, prompt) in QUICK_PROMPTS.iter().enumerate() {
        println!("  /{}  {}", i + 1, prompt);
    }
    println!("  /quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" {
            break;
        }

        if let Some(command) = line.strip_prefix('/') {
            match command.parse::<usize>() {
                Ok(n) if (1..=QUICK_PROMPTS.len()).contains(&n) => {
                    let result = session.submit_quick_prompt(n - 1).await;
                    report(result, &assistant, None);
                }
                _ => println!("Unknown command: {}", line),
            }
            continue;
        }

        session.set_input(line).await;
        let result = session.submit().await;
        let unsent = session.input().await;
        report(result, &assistant, Some(unsent));
    }

    info!("Goodbye");
    Ok(())
}
