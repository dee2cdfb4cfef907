mod config;
mod deck;
mod gesture;
mod layout;
mod models;
mod prefs;
mod stack;
mod tui;
mod verify;
mod view;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use deck::IdAllocator;
use models::{Card, UserType};
use prefs::{FileStore, Session};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use verify::VerifyClient;

#[derive(Parser)]
#[command(name = "swipehire")]
#[command(about = "Swipe through jobs or candidates from the terminal")]
struct Cli {
    /// Path to config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Swipe through a deck: right for interested, left to pass
    Swipe {
        /// Swipe as a candidate (jobs) or employer (candidates)
        #[arg(long = "as", value_enum)]
        user_type: Option<UserType>,

        /// JSON file with job postings or candidate profiles
        #[arg(short, long)]
        deck: Option<PathBuf>,

        /// Write the interested/rejected lists to this JSON file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Open the card hub menu
    Hub {
        #[arg(long = "as", value_enum)]
        user_type: Option<UserType>,

        /// JSON deck used when opening Jobs or Candidates
        #[arg(short, long)]
        deck: Option<PathBuf>,
    },

    /// Print a deck with match scores
    Deck {
        #[arg(long = "as", value_enum)]
        user_type: Option<UserType>,

        #[arg(short, long)]
        deck: Option<PathBuf>,
    },

    /// Remember a user type for later sessions
    Login {
        #[arg(long = "as", value_enum)]
        user_type: UserType,
    },

    /// Forget the stored user type
    Logout,

    /// Show the stored session
    Whoami,

    /// Record a demo verification for an email address
    Verify {
        email: String,

        /// Base URL of the verification backend
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Serialize)]
struct SessionExport<'a> {
    user_type: UserType,
    finished_at: String,
    interested: &'a [Card],
    rejected: &'a [Card],
}

fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "swipehire")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Logs go to a file so the terminal UI keeps the screen.
fn init_logging() -> Result<PathBuf> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join("swipehire.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter =
        EnvFilter::try_from_env("SWIPEHIRE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}

fn resolve_user_type(flag: Option<UserType>, session: &Session<FileStore>) -> UserType {
    flag.or_else(|| session.user_type()).unwrap_or(UserType::Candidate)
}

fn export_session(path: &Path, user_type: UserType, outcome: &tui::SwipeOutcome) -> Result<()> {
    let export = SessionExport {
        user_type,
        finished_at: chrono::Local::now().to_rfc3339(),
        interested: &outcome.interested,
        rejected: &outcome.rejected,
    };
    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write to {}", path.display()))
}

fn print_cards(label: &str, cards: &[Card]) {
    println!("{} ({}):", label, cards.len());
    for card in cards {
        println!("  {:<6} {:<24} {}", card.id, truncate(card.heading(), 22), card.subtitle());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging()?;
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?;
    let mut session = Session::new(FileStore::open(FileStore::default_path())?);
    tracing::debug!(log = %log_path.display(), config = %config_path.display(), "starting");

    match cli.command {
        Commands::Swipe {
            user_type,
            deck,
            export,
        } => {
            let user_type = resolve_user_type(user_type, &session);
            let mut ids = IdAllocator::new();
            let cards = deck::swipe_deck(&mut ids, user_type, deck.as_deref())?;
            tracing::info!(user_type = user_type.as_str(), cards = cards.len(), "swipe session");

            let outcome = tui::run_swipe(cards, user_type, &config)?;

            print_cards("Interested", &outcome.interested);
            print_cards(user_type.rejected_label(), &outcome.rejected);
            if let Some(path) = export {
                export_session(&path, user_type, &outcome)?;
                println!("\nSaved to {}", path.display());
            }
        }

        Commands::Hub { user_type, deck } => {
            let user_type = resolve_user_type(user_type, &session);
            if !session.is_authenticated() {
                session.sign_in(user_type)?;
            }
            tracing::info!(user_type = user_type.as_str(), "hub session");
            tui::run_hub(user_type, config, deck, session)?;
        }

        Commands::Deck { user_type, deck } => {
            let user_type = resolve_user_type(user_type, &session);
            let mut ids = IdAllocator::new();
            let cards = deck::swipe_deck(&mut ids, user_type, deck.as_deref())?;
            if cards.is_empty() {
                println!("No cards found.");
            } else {
                println!("{:<6} {:<24} {:<30} {:>6}", "ID", "NAME", "TITLE", "MATCH");
                println!("{}", "-".repeat(70));
                for card in &cards {
                    let score = card
                        .match_seed()
                        .map(|seed| format!("{}%", layout::match_score(seed).percent))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<6} {:<24} {:<30} {:>6}",
                        card.id,
                        truncate(card.heading(), 22),
                        truncate(card.subtitle(), 28),
                        score
                    );
                }
            }
        }

        Commands::Login { user_type } => {
            session.sign_in(user_type)?;
            println!("Signed in as {}.", user_type.as_str());
        }

        Commands::Logout => {
            session.sign_out()?;
            println!("Signed out.");
        }

        Commands::Whoami => match (session.is_authenticated(), session.user_type()) {
            (true, Some(user_type)) => println!("Signed in as {}.", user_type.as_str()),
            _ => println!("Not signed in."),
        },

        Commands::Verify { email, url } => {
            let base_url = url.unwrap_or_else(|| config.verify_url.clone());
            let client = VerifyClient::new(&base_url);
            println!("Verifying {} via {}...", email.trim(), client.endpoint());
            let tx_id = client.verify(&email)?;
            println!("Verified. Transaction ID: {}", tx_id);
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Google", 10), "Google");
        assert_eq!(truncate("Cloud Solutions Architect", 10), "Cloud S...");
        assert_eq!(truncate("Zoë Ångström-Øster", 8), "Zoë Å...");
    }

    #[test]
    fn test_cli_parses_swipe_flags() {
        let cli = Cli::try_parse_from([
            "swipehire", "swipe", "--as", "employer", "--export", "out.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Swipe { user_type, deck, export } => {
                assert_eq!(user_type, Some(UserType::Employer));
                assert!(deck.is_none());
                assert_eq!(export, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected swipe"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_user_type() {
        assert!(Cli::try_parse_from(["swipehire", "login", "--as", "admin"]).is_err());
    }

    #[test]
    fn test_export_session_writes_json() {
        let mut ids = IdAllocator::new();
        let mut cards = deck::swipe_deck(&mut ids, UserType::Candidate, None).unwrap();
        let outcome = tui::SwipeOutcome {
            interested: vec![cards.remove(0)],
            rejected: cards,
        };
        let path =
            std::env::temp_dir().join(format!("swipehire-export-{}.json", std::process::id()));
        export_session(&path, UserType::Candidate, &outcome).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["user_type"], "candidate");
        assert_eq!(value["interested"].as_array().unwrap().len(), 1);
        assert_eq!(value["rejected"].as_array().unwrap().len(), 5);
        assert_eq!(value["interested"][0]["payload"]["kind"], "job");
        std::fs::remove_file(&path).unwrap();
    }
}
