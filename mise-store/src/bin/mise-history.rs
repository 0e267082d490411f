use anyhow::{bail, Context, Result};
use clap::Parser;
use itertools::Itertools;
use mise::{changes, mapper, RevisionRepository};
use mise_store::{config::Config, database::Database, models::Recipe};
use tracing_subscriber::EnvFilter;

/// Print the edit history of a recipe.
#[derive(Parser, Debug)]
struct Args {
    /// YAML configuration file. Built-in defaults are used without one.
    #[clap(long)]
    config: Option<String>,

    /// Emit JSON: one revision per line, and JSON logs.
    #[clap(long)]
    json: bool,

    /// The recipe to show
    recipe_id: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // initialize tracing
    if args.json {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    let config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("Loading config from {}", path))?,
        None => Config::default(),
    };
    let db = Database::connect(&config.database)
        .await
        .context("Connecting to database")?;

    let Some(recipe) = Recipe::get_by_id(&db, args.recipe_id)? else {
        bail!("Recipe {} not found", args.recipe_id);
    };
    let mut history = db
        .history(recipe.recipe_id)
        .context("Loading revision history")?;
    if config.history.newest_first {
        history = history.reversed();
    }

    if args.json {
        for dto in mapper::to_dtos(history.records()) {
            println!("{}", serde_json::to_string(&dto)?);
        }
        return Ok(());
    }

    println!("{} (#{}), {} revisions", recipe.name, recipe.recipe_id, history.len());
    let mut decoded = Vec::with_capacity(history.len());
    for (record, revision) in history.entries() {
        let revision = match revision {
            Ok(Some(revision)) => {
                let line = format!("{:?}", revision);
                decoded.push(revision);
                line
            }
            Ok(None) => "(no data)".to_string(),
            Err(e) => {
                tracing::error!(revision_id = ?record.revision_id, "{}", e);
                format!("unreadable: {}", e)
            }
        };
        println!(
            "{}  {} {}  by {}  {}\n    {}",
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.revision_category,
            record.revision_type,
            record.user_id,
            record.change_comment.as_deref().unwrap_or("-"),
            revision,
        );
    }
    let summary = changes::summarize(&decoded)
        .into_iter()
        .map(|((category, revision_type), count)| {
            format!("{} {} {}", count, category, revision_type)
        })
        .join(", ");
    if !summary.is_empty() {
        println!("{}", summary);
    }
    Ok(())
}
