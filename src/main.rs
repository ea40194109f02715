use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use majlis::{
    HumanReport, MatchResult, MatchTier, MatcherConfig, SegmenterConfig, SessionReport,
    UNKNOWN_SPEAKER, build_variations, load_roster, match_name, read_transcript_file,
    segment_transcript,
};

#[derive(Parser)]
#[command(name = "majlis")]
#[command(author, version, about = "Parliamentary transcript segmentation and speaker attribution", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a session transcript and attribute speakers
    Segment {
        /// Input transcript file (plain text)
        #[arg(short, long)]
        input: PathBuf,

        /// Roster file (JSON array of entities)
        #[arg(short, long)]
        roster: PathBuf,

        /// Output file for the session report (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for a human-readable transcript (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Minimum fuzzy similarity for a roster match
        #[arg(long, default_value = "0.85")]
        threshold: f64,

        /// Minimum byte gap between kept handover transitions
        #[arg(long, default_value = "50")]
        min_transition_gap: usize,

        /// Estimated speaking speed in words per minute
        #[arg(long, default_value = "130")]
        words_per_minute: f64,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Match one noisy name against the roster
    MatchName {
        /// The name to resolve
        #[arg(short, long)]
        name: String,

        /// Roster file (JSON array of entities)
        #[arg(short, long)]
        roster: PathBuf,

        /// Minimum fuzzy similarity for a match
        #[arg(long, default_value = "0.85")]
        threshold: f64,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Segment a transcript and print statistics without writing output
    Analyze {
        /// Input transcript file (plain text)
        #[arg(short, long)]
        input: PathBuf,

        /// Roster file (JSON array of entities)
        #[arg(short, long)]
        roster: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Segment {
            input,
            roster,
            output,
            human_readable,
            threshold,
            min_transition_gap,
            words_per_minute,
            verbose,
        } => {
            setup_logging(verbose);
            run_segment(
                input,
                roster,
                output,
                human_readable,
                threshold,
                min_transition_gap,
                words_per_minute,
            )
        }
        Commands::MatchName {
            name,
            roster,
            threshold,
            verbose,
        } => {
            setup_logging(verbose);
            run_match(&name, roster, threshold)
        }
        Commands::Analyze {
            input,
            roster,
            verbose,
        } => {
            setup_logging(verbose);
            run_analyze(input, roster)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn run_segment(
    input: PathBuf,
    roster_path: PathBuf,
    output: PathBuf,
    human_readable: Option<PathBuf>,
    threshold: f64,
    min_transition_gap: usize,
    words_per_minute: f64,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let text = read_transcript_file(&input)?;

    info!("Loading roster from {:?}", roster_path);
    let roster = load_roster(&roster_path)?;
    info!("Loaded {} roster entities", roster.len());

    let mut config = SegmenterConfig::default();
    config.enrich.matcher.threshold = threshold;
    config.scan.min_transition_gap = min_transition_gap;
    config.timeline.words_per_minute = words_per_minute;

    let segments = segment_transcript(&text, &roster, &config)?;

    let unknown = segments
        .iter()
        .filter(|s| s.speaker_id == UNKNOWN_SPEAKER)
        .count();
    info!(
        "Segmented into {} segments ({} unresolved speakers)",
        segments.len(),
        unknown
    );

    if let Some(human_path) = human_readable {
        HumanReport::new(&segments).write_file(&human_path)?;
        info!("Human-readable transcript written to {:?}", human_path);
    }

    let report = SessionReport::from_segments(segments);
    report.write_json(&output)?;
    info!("Session report written to {:?}", output);

    Ok(())
}

fn run_match(name: &str, roster_path: PathBuf, threshold: f64) -> Result<()> {
    let roster = load_roster(&roster_path)?;
    let config = MatcherConfig { threshold };

    match match_name(name, &roster, &config) {
        MatchResult::Matched {
            id,
            full_name,
            tier,
        } => {
            let tier = match tier {
                MatchTier::Exact => "exact".to_string(),
                MatchTier::TokenSubset => "token-subset".to_string(),
                MatchTier::Fuzzy(ratio) => format!("fuzzy:{ratio:.3}"),
            };
            println!("{id}  {full_name}  ({tier})");
        }
        MatchResult::Unmatched => {
            println!("no match");
        }
    }

    Ok(())
}

fn run_analyze(input: PathBuf, roster_path: PathBuf) -> Result<()> {
    let text = read_transcript_file(&input)?;
    let roster = load_roster(&roster_path)?;
    let segments = segment_transcript(&text, &roster, &SegmenterConfig::default())?;

    println!("Session Analysis");
    println!("================");
    println!("Segments: {}", segments.len());

    let total_secs = segments
        .last()
        .map(|s| s.video_timestamp + s.duration_secs)
        .unwrap_or(0);
    println!("Estimated duration: {:.1} min", total_secs as f64 / 60.0);
    println!();

    println!("Speakers");
    println!("--------");
    let mut speaker_ids: Vec<&str> = segments.iter().map(|s| s.speaker_id.as_str()).collect();
    speaker_ids.sort();
    speaker_ids.dedup();

    for speaker_id in speaker_ids {
        let speaker_segments: Vec<_> = segments
            .iter()
            .filter(|s| s.speaker_id == speaker_id)
            .collect();
        let words: usize = speaker_segments.iter().map(|s| s.word_count()).sum();
        let name = &speaker_segments[0].speaker_name;
        let variation_count = roster
            .get(speaker_id)
            .map(|e| build_variations(&e.full_name).len())
            .unwrap_or(0);

        print!(
            "{}: {} segments, {} words",
            name,
            speaker_segments.len(),
            words
        );
        if variation_count > 0 {
            print!(" ({} name variations)", variation_count);
        }
        println!();
    }

    Ok(())
}
