use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use postpress::friends::load_friends_from_yaml;
use postpress::logger::configure_logger;
use postpress::post::Post;
use postpress::post_store::PostStore;

use crate::config::open_config;
use crate::export::export_posts;
use crate::render::{render_file, PresetArg};

mod config;
mod export;
mod render;

const CFG_FILE_NAME: &str = "postpress.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints the metadata of the posts as JSON
    List {
        /// Include posts that are not published
        #[arg(short, long)]
        all: bool,
    },
    /// Renders one markdown file to HTML on the stdout
    Render {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = PresetArg::Blog)]
        preset: PresetArg,
    },
    /// Renders every post into the output directory
    Export {
        /// Overrides paths.out_dir
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Prints a friends YAML file as JSON
    Friends {
        file: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run postpress --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match args.command {
        Command::List { all } => {
            let store = PostStore::load(&config.paths.content_dir)?;
            let posts: Vec<&Post> = if all {
                store.posts().iter().collect()
            } else {
                store.published().collect()
            };
            println!("{}", serde_json::to_string_pretty(&posts)?);
        }
        Command::Render { file, preset } => {
            print!("{}", render_file(&file, preset).await?);
        }
        Command::Export { out_dir } => {
            let out_dir = out_dir.unwrap_or(config.paths.out_dir);
            let store = PostStore::load(&config.paths.content_dir)?;
            let count = export_posts(&store, &out_dir, config.render).await?;
            info!("Exported {} posts to {}", count, out_dir.display());
        }
        Command::Friends { file } => {
            let yaml = fs::read_to_string(&file)
                .with_context(|| format!("Error reading {}", file.display()))?;
            let friends = load_friends_from_yaml(&yaml)?;
            println!("{}", serde_json::to_string_pretty(&friends)?);
        }
    }

    Ok(())
}
