use std::fs;
use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use readalong::alignment::{self, validate_timeline};
use readalong::catalog::{self, Catalog};
use readalong::cli::{
    AlignArgs, Cli, Command, FeedArgs, GradeArgs, IngestArgs, RecommendArgs, WordsCommand,
};
use readalong::config::AppConfig;
use readalong::recommend::{self, VideoVocabulary};
use readalong::storage::read_json;
use readalong::text::readability_report;
use readalong::{CaptionLine, LearnerSession, MetricKind, Token, WordMastery};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::from_override(cli.data_dir.clone())
        .context("Failed to resolve data directory")?;

    match &cli.command {
        Command::Ingest(args) => handle_ingest(&config, args),
        Command::Grade(args) => handle_grade(args),
        Command::Recommend(args) => handle_recommend(&config, args),
        Command::Words(command) => handle_words(&config, command),
        Command::Align(args) => handle_align(&config, args),
        Command::Feed(args) => handle_feed(&config, args),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "readalong=debug"
    } else {
        "readalong=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_ingest(config: &AppConfig, args: &IngestArgs) -> Result<()> {
    let items = match (&args.dir, &args.json) {
        (Some(dir), _) => catalog::ingest_dir(dir)
            .with_context(|| format!("Failed to ingest transcripts from {:?}", dir))?,
        (None, Some(path)) => {
            let records = catalog::load_records(path)
                .with_context(|| format!("Failed to read transcript records {:?}", path))?;
            catalog::ingest(records).context("Failed to grade transcript records")?
        }
        (None, None) => anyhow::bail!("Provide transcripts via --dir or --json"),
    };

    config.ensure_data_dir()?;
    let catalog_path = config.catalog_path();
    let mut catalog = Catalog::load(&catalog_path)?;
    println!("Ingested {} transcripts", items.len());
    for item in &items {
        println!("   {}: grade {:.2}", item.title, item.grade_level);
    }
    catalog.extend(items);
    catalog
        .save(&catalog_path)
        .context("Failed to save catalog")?;
    println!("Catalog now holds {} items", catalog.len());
    Ok(())
}

fn handle_grade(args: &GradeArgs) -> Result<()> {
    let text = match args.input.as_deref() {
        Some(path) if !args.reads_stdin() => fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file {:?}", path))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer
        }
    };

    match readability_report(&text) {
        Some(report) => {
            println!("Grade level: {:.2}", report.grade);
            println!("Words: {}", report.words);
            println!("Sentences: {}", report.sentences);
            println!("Syllables: {}", report.syllables);
        }
        None => println!("Grade level: undefined (text contains no words)"),
    }
    Ok(())
}

fn handle_recommend(config: &AppConfig, args: &RecommendArgs) -> Result<()> {
    args.validate()?;
    let catalog = Catalog::load(&config.catalog_path()).context("Failed to load catalog")?;

    let (recommendation, no_known_words) = match args.level {
        Some(level) => (recommend::recommend_by_level(catalog.items(), level), false),
        None => {
            let session = LearnerSession::load(&config.learner_path())
                .context("Failed to load learner session")?;
            (
                recommend::recommend_by_coverage(catalog.items(), session.known_words.as_set()),
                session.known_words.is_empty(),
            )
        }
    };

    let Some(rec) = recommendation else {
        if no_known_words {
            println!("No known words stored. Add words using `readalong words add`.");
        } else {
            println!("No content available");
        }
        return Ok(());
    };
    println!("Recommended content: {}", rec.item.title);
    match rec.metric_kind {
        MetricKind::GradeDiff => {
            println!("Grade level: {:.2}", rec.item.grade_level);
            println!("Distance from target: {:.2}", rec.metric);
        }
        MetricKind::Coverage => {
            println!("Known word coverage: {:.1}%", rec.metric * 100.0);
        }
    }
    println!("--- Transcript ---");
    println!("{}", rec.item.transcript);
    Ok(())
}

fn handle_words(config: &AppConfig, command: &WordsCommand) -> Result<()> {
    let learner_path = config.learner_path();
    let mut session =
        LearnerSession::load(&learner_path).context("Failed to load learner session")?;

    match command {
        WordsCommand::Add { words } => {
            let added = session.add_words(&words.join(" "));
            persist_session(config, &session)?;
            println!(
                "Added {} new words ({} known)",
                added,
                session.known_words.len()
            );
        }
        WordsCommand::List => {
            for word in session.known_words.sorted() {
                println!("{}", word);
            }
        }
        WordsCommand::Set { word_id, level } => {
            let update = session.set_mastery(*word_id, *level);
            persist_session(config, &session)?;
            println!("{}", serde_json::to_string(&update)?);
        }
        WordsCommand::Answer { word_id, correct } => {
            let update = session.record_answer(*word_id, *correct);
            persist_session(config, &session)?;
            println!("{}", serde_json::to_string(&update)?);
        }
        WordsCommand::Summary => {
            let summary = session.mastery_summary();
            println!("Known words: {}", session.known_words.len());
            println!("Tracked words: {}", summary.total());
            for level in WordMastery::ALL {
                println!("{}: {}", level.as_str(), summary.count(level));
            }
        }
    }
    Ok(())
}

fn persist_session(config: &AppConfig, session: &LearnerSession) -> Result<()> {
    config.ensure_data_dir()?;
    session
        .save(&config.learner_path())
        .context("Failed to save learner session")
}

fn handle_align(config: &AppConfig, args: &AlignArgs) -> Result<()> {
    let lines: Vec<CaptionLine> =
        read_json(&args.lines, "caption lines").context("Failed to load caption lines")?;
    let tokens: Vec<Token> = read_json(&args.tokens, "tokens").context("Failed to load tokens")?;
    validate_timeline(&lines, &tokens).context("Timeline must be sorted and well-formed")?;
    let playback = args.playback_time()?;

    let session = LearnerSession::load(&config.learner_path())
        .context("Failed to load learner session")?;
    let dropped = alignment::dropped_tokens(&lines, &tokens).len();
    if dropped > 0 {
        warn!(dropped, "tokens crossing a line boundary were left unassigned");
    }
    let views = alignment::render_lines(&lines, &tokens, &session, playback);
    info!(
        lines = views.len(),
        tokens = tokens.len(),
        dropped,
        "aligned tokens to caption lines"
    );
    println!("{}", serde_json::to_string_pretty(&views)?);
    Ok(())
}

fn handle_feed(config: &AppConfig, args: &FeedArgs) -> Result<()> {
    let videos: Vec<VideoVocabulary> = read_json(&args.videos, "video vocabulary")
        .context("Failed to load video vocabulary")?;
    let session = LearnerSession::load(&config.learner_path())
        .context("Failed to load learner session")?;
    let ranked = recommend::rank_by_new_words(&videos, &session, args.max_new, args.limit);
    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}
