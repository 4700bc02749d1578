use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

use rssgen::config::Config;
use rssgen::definition::FeedDefinition;
use rssgen::feed::render_rss;

/// Writes `content` to a uniquely named sibling temp file, then renames it
/// over `dst`.
fn atomic_write(dst: &Path, content: &[u8]) -> Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = dst.with_extension(format!("tmp.{:016x}", random_suffix));

    let mut temp_file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| {
            format!(
                "Failed to create temporary file '{}': check directory permissions or disk space",
                temp_path.display()
            )
        })?;

    temp_file.write_all(content).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to write to temporary file '{}': disk may be full",
            temp_path.display()
        )
    })?;

    temp_file.sync_all().with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to sync temporary file '{}' to disk: disk may be full",
            temp_path.display()
        )
    })?;

    drop(temp_file);
    #[cfg(windows)]
    if dst.exists() {
        std::fs::remove_file(dst).with_context(|| {
            let _ = std::fs::remove_file(&temp_path);
            format!(
                "Failed to remove existing '{}' before atomic replace",
                dst.display()
            )
        })?;
    }

    std::fs::rename(&temp_path, dst).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}': check permissions",
            temp_path.display(),
            dst.display()
        )
    })?;

    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "rssgen", about = "Render a TOML feed definition as RSS 2.0")]
struct Args {
    /// Feed definition (TOML with [channel] and [[items]])
    #[arg(value_name = "DEFINITION")]
    definition: PathBuf,

    /// Configuration file (element whitelist overrides, output options)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write output to FILE instead of stdout
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit the finalized channel/items structure as JSON instead of XML
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for the feed itself
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => Config::default(),
    };

    let content = std::fs::read_to_string(&args.definition).with_context(|| {
        format!(
            "Failed to read feed definition '{}'",
            args.definition.display()
        )
    })?;
    let definition = FeedDefinition::from_toml(&content).with_context(|| {
        format!(
            "Invalid feed definition '{}'",
            args.definition.display()
        )
    })?;

    let mut feed = config.new_feed()?;
    definition.apply(&mut feed)?;
    let rendered = feed.finalize().context("Feed cannot be rendered")?;

    let output = if args.json {
        serde_json::to_string_pretty(&rendered).context("Failed to serialize feed as JSON")?
    } else {
        render_rss(&rendered, &config.render_options())?
    };

    match &args.output {
        Some(path) => {
            atomic_write(path, output.as_bytes())?;
            tracing::info!(
                path = %path.display(),
                items = rendered.items.len(),
                "Wrote feed"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", output).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
