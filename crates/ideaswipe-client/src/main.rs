use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ideaswipe_client::app::{Event, Feedback};
use ideaswipe_client::gesture::{Point, PointerId, Preview, SwipeHint};
use ideaswipe_client::input::{parse_input, Input, HELP};
use ideaswipe_client::session::{Presenter, Session};
use ideaswipe_client::source::{HttpIdeaSource, IdeaSource};
use ideaswipe_client::view::View;
use ideaswipe_core::store::{ClientStore, FileStore};
use ideaswipe_core::{AiSettings, HistoryEntry, IdeaField, Stats};
use ideaswipe_suggest::IdeaService;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ideaswipe", about = "Swipe through AI-generated startup ideas")]
struct Cli {
    /// Base URL of a running ideaswipe-server. Without it, the provider is called directly.
    #[arg(long)]
    server: Option<String>,

    /// Where stats and favorites are kept (default: ~/.ideaswipe)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Swipe through ideas (default)
    Play,
    /// Save AI provider settings to ~/.ideaswipe/settings.json
    Configure {
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        max_tokens: Option<u32>,
        /// Zero disables the deadline
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Print saved counters
    Stats,
    /// List liked ideas
    Favorites,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = match cli.data_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::in_data_dir(),
    };

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => match cli.server {
            Some(url) => play(HttpIdeaSource::new(url), store).await,
            None => {
                let service = IdeaService::from_settings(ideaswipe_core::read_settings())
                    .context("AI provider is not usable; run `ideaswipe configure` first")?;
                play(service, store).await
            }
        },
        Command::Configure {
            provider,
            model,
            api_key,
            max_tokens,
            timeout_secs,
        } => {
            let mut settings: AiSettings = ideaswipe_core::read_settings();
            if let Some(p) = provider {
                settings.provider = p;
            }
            if let Some(m) = model {
                settings.model = m;
            }
            if let Some(k) = api_key {
                settings.api_key = k;
            }
            if let Some(n) = max_tokens {
                settings.max_tokens = n;
            }
            if let Some(s) = timeout_secs {
                settings.timeout_secs = s;
            }
            ideaswipe_core::write_settings(&settings).map_err(anyhow::Error::msg)?;
            println!(
                "Saved {} ({}), key {}",
                settings.provider,
                settings.model,
                if settings.api_key.is_empty() { "not set" } else { "set" }
            );
            Ok(())
        }
        Command::Stats => {
            print_stats(&store.load()?.stats);
            Ok(())
        }
        Command::Favorites => {
            print_favorites(&store.load()?.favorites);
            Ok(())
        }
    }
}

async fn play<S: IdeaSource>(source: S, store: FileStore) -> anyhow::Result<()> {
    let mut session = Session::new(source, store, Terminal);
    println!("Type `help` for commands.");
    session.dispatch(Event::Start).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Some(Input::Event(event)) => session.dispatch(event).await,
            Some(Input::Drag { dx, dy }) => {
                let mouse = PointerId(0);
                let origin = Point::new(0.0, 0.0);
                let end = Point::new(dx, dy);
                session.pointer_down(mouse, origin);
                session.pointer_move(mouse, end);
                session.pointer_up(mouse, end).await;
            }
            Some(Input::Stats) => print_stats(&session.state().stats),
            Some(Input::Favorites) => print_favorites(&session.state().favorites),
            Some(Input::Help) => println!("{HELP}"),
            Some(Input::Quit) => break,
            None => println!("Unknown command. Type `help`."),
        }
    }
    Ok(())
}

/// Plain stdout presentation.
struct Terminal;

impl Presenter for Terminal {
    fn render(&mut self, view: &View) {
        match view {
            View::Loading => println!("\nGenerating... AI is crafting something unique for you."),
            View::Card {
                name,
                vibe,
                tagline,
                pitch,
            } => {
                println!("\n== {name} [{vibe}]");
                println!("{tagline}\n");
                println!("{pitch}\n");
                println!("[l]ike  [p]ass  [r]efine  [q]uit");
            }
            View::Detail { name, sections } => {
                println!("\n== {name}: pitch deck");
                for section in sections {
                    println!("\n{}\n  {}", section.label, section.text);
                }
                println!("\n[b]ack  [r]efine  [q]uit");
            }
            View::Error { message } => {
                println!("\n!! {message}");
                println!("[retry]  [q]uit");
            }
        }
    }

    fn feedback(&mut self, cue: Feedback) {
        match cue {
            Feedback::Generated => println!("New idea generated!"),
            Feedback::Like => println!("✓"),
            Feedback::Pass => println!("×"),
            Feedback::Refine => println!("↻"),
        }
    }

    fn preview(&mut self, preview: &Preview) {
        let arrow = match preview.hint {
            SwipeHint::Left => "<<",
            SwipeHint::Right => ">>",
            SwipeHint::Neutral => "--",
        };
        println!(
            "{arrow} card at {:+.0}px, {:+.1}°",
            preview.transform.translate_x, preview.transform.rotate_deg
        );
    }

    fn snap_back(&mut self) {
        println!("(snapped back)");
    }
}

fn print_stats(stats: &Stats) {
    println!(
        "generated {}  liked {}  passed {}  refined {}",
        stats.total_generated, stats.total_liked, stats.total_passed, stats.total_refined
    );
}

fn print_favorites(favorites: &[HistoryEntry]) {
    if favorites.is_empty() {
        println!("No favorites yet.");
        return;
    }
    for entry in favorites {
        println!(
            "{}  {} [{}]",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.idea.get(IdeaField::Name).unwrap_or("(unnamed)"),
            entry.idea.get(IdeaField::Vibe).unwrap_or("-"),
        );
    }
}
