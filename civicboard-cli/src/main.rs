mod commands;
mod render;
mod utils;

use anyhow::Result;
use civicboard_core::Board;
use civicboard_core::MediaKind;
use civicboard_core::filter::{CategoryFilter, DateWindow, FilterCriteria, SortKey};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::commands::EventFields;
use crate::commands::media::{MediaFields, MediaItem};

#[derive(Parser)]
#[command(name = "civicboard")]
#[command(about = "Manage events and media for your civic-education site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, filtered and sorted
    List {
        /// Only events whose title, description or location contains this text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only events in this category ("all" for every category)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// all, upcoming or past
        #[arg(short, long, default_value = "all")]
        when: DateWindow,

        /// date-desc, date-asc, title-asc or title-desc
        #[arg(long)]
        sort: Option<SortKey>,

        /// Print the events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an event (prompts for anything not given)
    Add {
        #[command(flatten)]
        fields: EventFields,
    },
    /// Edit an event in place (prompts with the current values if no fields are given)
    Edit {
        id: String,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show a month of events as a calendar grid
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Move this many months forward (or backward, if negative)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
    /// Show every event on one day
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Manage photos, videos and presentations
    Media {
        #[command(subcommand)]
        command: MediaCommands,
    },
    /// Show where configuration and data live
    Config,
}

#[derive(Subcommand)]
enum MediaCommands {
    /// List media items
    List {
        /// photo, video or presentation
        #[arg(short, long)]
        kind: Option<MediaKind>,

        /// Print the items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a media item
    Add {
        #[command(subcommand)]
        item: MediaItem,
    },
    /// Edit a media item in place
    Edit {
        id: String,

        #[command(flatten)]
        fields: MediaFields,
    },
    /// Delete a media item
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let board = Board::load()?;
    debug!(data_dir = %board.data_path().display(), "board loaded");

    match cli.command {
        Commands::List {
            search,
            category,
            when,
            sort,
            json,
        } => {
            let criteria = FilterCriteria {
                search,
                category,
                window: when,
                sort: sort.unwrap_or(board.config().default_sort),
            };
            commands::list::run(&board, criteria, json)
        }
        Commands::Add { fields } => commands::add::run(&board, fields),
        Commands::Edit { id, fields } => commands::edit::run(&board, &id, fields),
        Commands::Delete { id, yes } => commands::delete::run(&board, &id, yes),
        Commands::Calendar { month, offset } => {
            commands::calendar::run(&board, month.as_deref(), offset)
        }
        Commands::Day { date } => commands::day::run(&board, &date),
        Commands::Media { command } => match command {
            MediaCommands::List { kind, json } => commands::media::list(&board, kind, json),
            MediaCommands::Add { item } => commands::media::add(&board, item),
            MediaCommands::Edit { id, fields } => commands::media::edit(&board, &id, fields),
            MediaCommands::Delete { id, yes } => commands::media::delete(&board, &id, yes),
        },
        Commands::Config => commands::config::run(&board),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default).
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
