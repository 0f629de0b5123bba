use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::recommend::{DEFAULT_MAX_NEW_WORDS, DEFAULT_RANK_LIMIT};
use crate::types::WordMastery;

#[derive(Parser, Debug)]
#[command(
    name = "readalong",
    version,
    about = "Pick transcripts that match a learner's level and follow captions word by word"
)]
pub struct Cli {
    /// Directory holding catalog.json and learner.json (default: $READALONG_DATA_DIR or ./data)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Grade transcripts and append them to the catalog.
    Ingest(IngestArgs),
    /// Print the readability breakdown of a text.
    Grade(GradeArgs),
    /// Recommend one catalog item by level or by known vocabulary.
    Recommend(RecommendArgs),
    /// Manage the learner's known words and word mastery.
    #[command(subcommand)]
    Words(WordsCommand),
    /// Group word tokens under caption lines.
    Align(AlignArgs),
    /// Rank videos by how few unknown words they contain.
    Feed(FeedArgs),
}

#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    /// Directory of .txt transcripts (title = file stem)
    #[arg(long, value_name = "DIR", conflicts_with = "json", required_unless_present = "json")]
    pub dir: Option<PathBuf>,
    /// JSON array of {"title", "transcript"} records
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct GradeArgs {
    /// Text file to grade; `-` or nothing reads stdin
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

impl GradeArgs {
    pub fn reads_stdin(&self) -> bool {
        self.input
            .as_deref()
            .map_or(true, |path| path.as_os_str() == "-")
    }
}

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    /// Learner reading level; the target is one grade above
    #[arg(
        long,
        conflicts_with = "known",
        required_unless_present = "known",
        allow_negative_numbers = true
    )]
    pub level: Option<f64>,
    /// Use the stored known-word set instead of a level
    #[arg(long)]
    pub known: bool,
}

impl RecommendArgs {
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.level {
            ensure!(level.is_finite(), "Level must be a finite number");
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum WordsCommand {
    /// Add whitespace-separated known words.
    Add {
        #[arg(required = true, value_name = "WORD")]
        words: Vec<String>,
    },
    /// List known words alphabetically.
    List,
    /// Overwrite the mastery level of a word id.
    Set {
        word_id: u64,
        #[arg(value_parser = parse_mastery)]
        level: WordMastery,
    },
    /// Record a quiz answer for a word id.
    Answer {
        word_id: u64,
        /// The learner answered correctly
        #[arg(long)]
        correct: bool,
    },
    /// Count tracked words per mastery level.
    Summary,
}

#[derive(Args, Debug, Clone)]
pub struct AlignArgs {
    /// JSON array of caption lines ({"start_sec", "end_sec"})
    #[arg(long, value_name = "PATH")]
    pub lines: PathBuf,
    /// JSON array of tokens ({"word_id", "text", "start_sec", "end_sec"})
    #[arg(long, value_name = "PATH")]
    pub tokens: PathBuf,
    /// Playback position used to mark the active line (seconds or HH:MM:SS.mmm)
    #[arg(long, value_name = "TIME")]
    pub at: Option<String>,
}

impl AlignArgs {
    pub fn playback_time(&self) -> Result<Option<f64>> {
        parse_optional_time(self.at.as_deref(), "playback")
    }
}

#[derive(Args, Debug, Clone)]
pub struct FeedArgs {
    /// JSON array of {"id", "title", "score", "word_ids"}
    #[arg(long, value_name = "PATH")]
    pub videos: PathBuf,
    /// Largest number of unknown words a video may contain
    #[arg(long = "max-new", default_value_t = DEFAULT_MAX_NEW_WORDS)]
    pub max_new: usize,
    #[arg(long, default_value_t = DEFAULT_RANK_LIMIT)]
    pub limit: usize,
}

fn parse_mastery(raw: &str) -> std::result::Result<WordMastery, String> {
    raw.parse().map_err(|err: crate::ReadalongError| err.to_string())
}

pub fn parse_optional_time(value: Option<&str>, label: &str) -> Result<Option<f64>> {
    match value {
        Some(raw) => {
            let seconds = parse_time_to_seconds(raw)
                .with_context(|| format!("Invalid {} time '{}'", label, raw))?;
            Ok(Some(seconds))
        }
        None => Ok(None),
    }
}

fn parse_time_to_seconds(raw: &str) -> Result<f64> {
    if raw.contains(':') {
        return parse_hms_time(raw);
    }

    let seconds: f64 = raw
        .parse()
        .with_context(|| format!("Failed to parse seconds value '{}'", raw))?;
    ensure!(seconds.is_finite(), "Time values must be finite");
    ensure!(seconds >= 0.0, "Time values must be non-negative");
    Ok(seconds)
}

fn parse_hms_time(raw: &str) -> Result<f64> {
    let parts: Vec<&str> = raw.split(':').collect();
    ensure!(
        (2..=3).contains(&parts.len()),
        "Time format must be MM:SS or HH:MM:SS"
    );

    let component = |idx: usize, name: &str| -> Result<f64> {
        let value = parts[idx]
            .parse::<f64>()
            .with_context(|| format!("Invalid {} component '{}'", name, parts[idx]))?;
        ensure!(
            value.is_finite() && value >= 0.0,
            "{} must be non-negative",
            name
        );
        Ok(value)
    };

    let seconds = component(parts.len() - 1, "seconds")?;
    let minutes = component(parts.len() - 2, "minutes")?;
    let hours = if parts.len() == 3 {
        component(0, "hours")?
    } else {
        0.0
    };

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_time_seconds() {
        let result = parse_optional_time(Some("12.5"), "start").unwrap();
        assert_eq!(result, Some(12.5));
    }

    #[test]
    fn parse_time_hms() {
        let result = parse_optional_time(Some("01:02:03.5"), "at").unwrap();
        let expected = 3600.0 + 120.0 + 3.5;
        assert!((result.unwrap() - expected).abs() < 1e-6);
        let result = parse_optional_time(Some("2:30"), "at").unwrap();
        assert_eq!(result, Some(150.0));
    }

    #[test]
    fn rejects_bad_times() {
        assert!(parse_optional_time(Some("-1"), "at").is_err());
        assert!(parse_optional_time(Some("1:2:3:4"), "at").is_err());
        assert!(parse_optional_time(Some("aa:10"), "at").is_err());
        assert!(parse_optional_time(Some("inf"), "at").is_err());
        assert_eq!(parse_optional_time(None, "at").unwrap(), None);
    }

    #[test]
    fn recommend_requires_exactly_one_mode() {
        assert!(Cli::try_parse_from(["readalong", "recommend"]).is_err());
        assert!(Cli::try_parse_from(["readalong", "recommend", "--level", "3", "--known"]).is_err());

        let cli = Cli::try_parse_from(["readalong", "recommend", "--level", "4"]).unwrap();
        let Command::Recommend(args) = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(args.level, Some(4.0));
        assert!(!args.known);
    }

    #[test]
    fn ingest_sources_conflict() {
        assert!(Cli::try_parse_from(["readalong", "ingest"]).is_err());
        assert!(
            Cli::try_parse_from(["readalong", "ingest", "--dir", "t", "--json", "r.json"]).is_err()
        );
        assert!(Cli::try_parse_from(["readalong", "ingest", "--json", "r.json"]).is_ok());
    }

    #[test]
    fn words_set_parses_mastery_names() {
        let cli = Cli::try_parse_from(["readalong", "words", "set", "7", "Mastered"]).unwrap();
        match cli.command {
            Command::Words(WordsCommand::Set { word_id, level }) => {
                assert_eq!(word_id, 7);
                assert_eq!(level, WordMastery::Mastered);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["readalong", "words", "set", "7", "fluent"]).is_err());
    }

    #[test]
    fn global_flags_and_feed_defaults() {
        let cli = Cli::try_parse_from([
            "readalong",
            "feed",
            "--videos",
            "v.json",
            "--data-dir",
            "store",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("store")));
        let Command::Feed(args) = cli.command else {
            panic!("expected feed");
        };
        assert_eq!(args.max_new, DEFAULT_MAX_NEW_WORDS);
        assert_eq!(args.limit, DEFAULT_RANK_LIMIT);
    }

    #[test]
    fn grade_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["readalong", "grade"]).unwrap();
        let Command::Grade(args) = cli.command else {
            panic!("expected grade");
        };
        assert!(args.reads_stdin());
    }
}
