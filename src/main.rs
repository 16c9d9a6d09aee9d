mod backend;
mod plugin;
mod search;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use plugin::{PLUGIN_NAME, PanSou};

/// Drives the PanSou plugin the way a video-browsing host would and prints
/// each call's JSON reply on stdout.
#[derive(Parser, Debug)]
#[command(name = "pansou")]
#[command(author, version, about = "Cloud-drive search aggregator plugin host")]
struct Args {
    /// Plugin ext JSON, e.g. '{"server":"http://127.0.0.1:8888","pan_priority":"quark,ali"}'
    #[arg(short, long)]
    ext: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Home screen categories
    Home,
    /// Home screen recommendations
    HomeVideo,
    /// Category placeholder listing
    Category {
        #[arg(default_value = "1")]
        cid: String,
        #[arg(short, long, default_value = "1")]
        page: String,
    },
    /// Search all drives for a keyword
    Search {
        keyword: String,
        #[arg(short, long, default_value = "1")]
        page: String,
        #[arg(short, long)]
        quick: bool,
    },
    /// Detail for a share link
    Detail { ids: Vec<String> },
    /// Player payload for a share link
    Play {
        id: String,
        #[arg(short, long, default_value = PLUGIN_NAME)]
        flag: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let directive = if args.debug { "pansou=debug" } else { "pansou=info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .init();

    let plugin = PanSou::init(args.ext.as_deref())
        .inspect_err(|e| tracing::error!("failed to build HTTP client: {e}"))?;
    info!(name = plugin.name(), "plugin ready");

    match args.command {
        Command::Home => print_json(&plugin.home_content(false)),
        Command::HomeVideo => print_json(&plugin.home_video_content()),
        Command::Category { cid, page } => {
            print_json(&plugin.category_content(&cid, &page, false, None))
        }
        Command::Search {
            keyword,
            page,
            quick,
        } => print_json(&plugin.search_content_page(&keyword, quick, &page).await),
        Command::Detail { ids } => print_json(&plugin.detail_content(&ids)),
        Command::Play { id, flag } => print_json(&plugin.player_content(&flag, &id, &[])),
    }
}

fn print_json(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
