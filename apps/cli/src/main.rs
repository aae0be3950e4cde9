use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use media_console_core::{
    Backend, ConsoleConfig, HttpBackend, MediaConsole, MediaFile, MediaType, MediaUrlResolver,
    Transcription, UploadResult, Video, format_search_readable, format_timeline,
    format_transcription_readable, format_video_readable, resolve_media_url,
};

/// CLI wrapper for MediaType (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliMediaType {
    #[default]
    Video,
    Audio,
}

impl From<CliMediaType> for MediaType {
    fn from(cli: CliMediaType) -> Self {
        match cli {
            CliMediaType::Video => MediaType::Video,
            CliMediaType::Audio => MediaType::Audio,
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum ListKind {
    #[default]
    All,
    Videos,
    Transcriptions,
}

#[derive(Parser)]
#[command(name = "media-console")]
#[command(
    about = "Upload media, browse summaries and transcripts, and search by text or by a reference recording"
)]
struct Cli {
    /// Backend base URL (overrides MEDIA_CONSOLE_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides MEDIA_CONSOLE_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the backend is reachable
    Health,

    /// List processed videos and transcriptions
    List {
        #[arg(short, long, value_enum, default_value = "all")]
        kind: ListKind,
    },

    /// Upload files for processing, one at a time
    Upload {
        /// How the files should be processed
        #[arg(short = 't', long = "type", value_enum, default_value = "video")]
        media_type: CliMediaType,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Run a unified search
    Search {
        #[command(subcommand)]
        query: SearchCommand,
    },

    /// Show the pseudo-timeline of a transcription
    Timeline { transcription_id: i64 },

    /// Resolve a storage path to a media URL
    Resolve { path: String },
}

#[derive(Subcommand)]
enum SearchCommand {
    /// Search by free text
    Text {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },
    /// Search using a processed video as the reference
    Visual { video_id: i64 },
    /// Search using a transcription as the reference
    Audio { transcription_id: i64 },
}

/// A search query with its reference record already looked up
enum SearchTarget {
    Text(String),
    Visual(Video),
    Audio(Transcription),
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let whole = d.as_secs();
        format!("{}m {}s", whole / 60, whole % 60)
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("media_console=debug,media_console_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> ConsoleConfig {
    let mut config = ConsoleConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config
}

async fn load_console(config: &ConsoleConfig) -> Result<MediaConsole<HttpBackend>> {
    let backend = Arc::new(HttpBackend::new(config)?);
    let spinner = create_spinner("Loading media library...");
    match MediaConsole::load(backend).await {
        Ok(console) => {
            spinner.finish_with_message(format!(
                "{} Loaded {} video(s), {} transcription(s)",
                style("✓").green().bold(),
                console.videos().len(),
                console.transcriptions().len()
            ));
            Ok(console)
        }
        Err(e) => {
            spinner.finish_and_clear();
            Err(anyhow!("Failed to load media library: {e}"))
        }
    }
}

async fn run_health(config: &ConsoleConfig) -> Result<()> {
    let backend = HttpBackend::new(config)?;
    let health = backend.health().await?;
    println!(
        "{} {} {}",
        style("✓").green().bold(),
        style(backend.base_url()).cyan(),
        style(&health.status).dim()
    );
    Ok(())
}

async fn run_list(config: &ConsoleConfig, kind: ListKind) -> Result<()> {
    let console = load_console(config).await?;
    let resolver = MediaUrlResolver::new(&config.base_url);
    println!("{}", style("─".repeat(60)).dim());

    if matches!(kind, ListKind::All | ListKind::Videos) {
        println!("# Processed Videos ({})\n", console.videos().len());
        if console.videos().is_empty() {
            println!("No videos processed yet. Upload a few to get started.\n");
        }
        for video in console.videos() {
            println!("{}", format_video_readable(video, &resolver));
        }
    }

    if matches!(kind, ListKind::All | ListKind::Transcriptions) {
        println!("# Processed Audio ({})\n", console.transcriptions().len());
        if console.transcriptions().is_empty() {
            println!("No transcriptions available yet.\n");
        }
        for transcription in console.transcriptions() {
            println!("{}", format_transcription_readable(transcription));
        }
    }

    Ok(())
}

async fn run_upload(
    config: &ConsoleConfig,
    media_type: MediaType,
    paths: &[PathBuf],
) -> Result<()> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(MediaFile::from_path(path).await?);
    }

    let mut console = load_console(config).await?;

    let step_start = Instant::now();
    let spinner = create_spinner(&format!(
        "Processing {} {} file(s)...",
        files.len(),
        media_type.name()
    ));

    let results = match console.upload(&files, media_type).await {
        Ok(results) => results,
        Err(e) => {
            spinner.finish_with_message(format!("{} Upload failed", style("✗").red().bold()));
            return Err(e.into());
        }
    };

    spinner.finish_with_message(format!(
        "{} Uploaded {} {}(s) successfully {}",
        style("✓").green().bold(),
        results.len(),
        media_type.name(),
        style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
    ));

    let resolver = MediaUrlResolver::new(&config.base_url);
    println!("{}", style("─".repeat(60)).dim());
    for result in &results {
        match result {
            UploadResult::Video(video) => {
                println!("{}", format_video_readable(video, &resolver))
            }
            UploadResult::Transcription(item) => {
                println!("{}", format_transcription_readable(item))
            }
        }
    }

    Ok(())
}

async fn run_search(config: &ConsoleConfig, query: SearchCommand) -> Result<()> {
    let mut console = load_console(config).await?;

    let query = match query {
        SearchCommand::Text { term } => SearchTarget::Text(term.join(" ")),
        SearchCommand::Visual { video_id } => SearchTarget::Visual(
            console
                .video(video_id)
                .cloned()
                .ok_or_else(|| anyhow!("No video with id {video_id}"))?,
        ),
        SearchCommand::Audio { transcription_id } => SearchTarget::Audio(
            console
                .transcription(transcription_id)
                .cloned()
                .ok_or_else(|| anyhow!("No transcription with id {transcription_id}"))?,
        ),
    };

    let step_start = Instant::now();
    let spinner = create_spinner("Searching...");
    let searched = match &query {
        SearchTarget::Text(term) => console.search_text(term).await,
        SearchTarget::Visual(reference) => console.search_visual(reference).await,
        SearchTarget::Audio(reference) => console.search_audio(reference).await,
    };

    match searched {
        Ok(true) => spinner.finish_with_message(format!(
            "{} Search completed {}",
            style("✓").green().bold(),
            style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
        )),
        Ok(false) => {
            spinner.finish_with_message(format!(
                "{} Nothing to search for",
                style("!").yellow().bold()
            ));
            return Ok(());
        }
        Err(e) => {
            spinner.finish_with_message(format!("{} Search failed", style("✗").red().bold()));
            return Err(e.into());
        }
    }

    if let Some(results) = console.results() {
        if results.is_empty() {
            println!(
                "\n{} {}\n",
                style("No matches for").dim(),
                style(console.active_label()).cyan()
            );
            return Ok(());
        }

        let resolver = MediaUrlResolver::new(&config.base_url);
        println!("{}", style("─".repeat(60)).dim());
        println!(
            "{}",
            format_search_readable(console.active_label(), results, &resolver)
        );
    }

    Ok(())
}

async fn run_timeline(config: &ConsoleConfig, transcription_id: i64) -> Result<()> {
    let console = load_console(config).await?;
    let transcription = console
        .transcription(transcription_id)
        .ok_or_else(|| anyhow!("No transcription with id {transcription_id}"))?;

    println!("\n{}\n", style(&transcription.filename).cyan().bold());
    println!("{}", format_timeline(&transcription.transcript));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = build_config(&cli);
    debug!(base_url = %config.base_url, timeout = ?config.timeout, "configuration resolved");

    let outcome = match cli.command {
        Command::Health => run_health(&config).await,
        Command::List { kind } => run_list(&config, kind).await,
        Command::Upload { media_type, files } => {
            run_upload(&config, media_type.into(), &files).await
        }
        Command::Search { query } => run_search(&config, query).await,
        Command::Timeline { transcription_id } => run_timeline(&config, transcription_id).await,
        Command::Resolve { path } => {
            let url = resolve_media_url(&config.base_url, &path);
            if url.is_empty() {
                println!("{}", style("(unavailable)").dim());
            } else {
                println!("{}", url);
            }
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_floors_minutes() {
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(119)), "1m 59s");
        assert_eq!(format_duration(Duration::from_secs(600)), "10m 0s");
        assert_eq!(format_duration(Duration::from_millis(12_340)), "12.3s");
    }
}
