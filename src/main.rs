use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use moodline::{
    detect_crisis, load_config, load_lexicon, parse_transcription_file, CheckInReport,
    CompiledLexicon, EngineConfig, HumanSummary, Lexicon, MoodAnalyzer, RealtimeEngine,
    ReportMetadata, TranscriptionRecord,
};

#[derive(Parser)]
#[command(name = "moodline")]
#[command(author, version, about = "Mood, energy and anxiety scoring for spoken check-ins", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one check-in transcript
    Analyze {
        /// Transcription record (JSON)
        #[arg(short, long, conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Analyze this text instead of a transcription file
        #[arg(short, long)]
        text: Option<String>,

        /// Replacement lexicon (JSON)
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Engine configuration (JSON); missing fields keep their defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file for the JSON report (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for a human-readable summary
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Score partial transcripts read line by line from stdin
    Stream {
        /// Replacement lexicon (JSON)
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Engine configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Screen text for crisis language only
    Crisis {
        /// Text to screen
        #[arg(short, long)]
        text: String,

        /// Replacement lexicon (JSON)
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            text,
            lexicon,
            config,
            output,
            human_readable,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_checkin(input, text, lexicon, config, output, human_readable)
        }
        Commands::Stream {
            lexicon,
            config,
            verbose,
        } => {
            setup_logging(verbose);
            stream_session(lexicon, config).await
        }
        Commands::Crisis {
            text,
            lexicon,
            verbose,
        } => {
            setup_logging(verbose);
            screen_crisis(&text, lexicon)
        }
    }
}

/// Logs go to stderr so stdout carries only JSON; `RUST_LOG` overrides
fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn build_lexicon(path: Option<&Path>) -> Result<Arc<CompiledLexicon>> {
    let lexicon = match path {
        Some(path) => {
            info!("Loading lexicon from {:?}", path);
            load_lexicon(path)?
        }
        None => Lexicon::default(),
    };
    let compiled = CompiledLexicon::compile(&lexicon).context("Invalid lexicon")?;
    info!("Compiled {} lexicon patterns", compiled.patterns.len());
    Ok(Arc::new(compiled))
}

fn build_config(path: Option<&Path>) -> Result<Arc<EngineConfig>> {
    let config = match path {
        Some(path) => {
            info!("Loading config from {:?}", path);
            load_config(path)?
        }
        None => EngineConfig::default(),
    };
    Ok(Arc::new(config))
}

fn analyze_checkin(
    input: Option<PathBuf>,
    text: Option<String>,
    lexicon: Option<PathBuf>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    human_readable: Option<PathBuf>,
) -> Result<()> {
    let lexicon = build_lexicon(lexicon.as_deref())?;
    let config = build_config(config.as_deref())?;

    let record = match (input, text) {
        (Some(path), _) => {
            info!("Loading transcription from {:?}", path);
            parse_transcription_file(&path).context("Failed to parse input transcription")?
        }
        (None, Some(text)) => {
            TranscriptionRecord::from_text(&text, config.confidence.default_transcription_confidence)
        }
        (None, None) => bail!("Provide either --input or --text"),
    };

    let analyzer = MoodAnalyzer::new(lexicon, config);
    let analysis = analyzer.analyze_transcription(&record);
    let crisis = analyzer.check_crisis(&record.text);

    info!(
        "Mood {}/10, energy {}/10, anxiety {}/10, emotion {}, confidence {:.2}",
        analysis.mood_score,
        analysis.energy_level,
        analysis.anxiety_level,
        analysis.dominant_emotion,
        analysis.confidence
    );
    if crisis.flagged {
        warn!("Crisis phrases present: {:?}", crisis.hits);
    }

    let metadata = ReportMetadata::new(
        Utc::now(),
        record.confidence,
        record.duration_seconds,
        record.language_tag.clone(),
    );
    let report = CheckInReport::new(analysis, crisis, metadata);

    match output {
        Some(path) => {
            report.write_json(&path)?;
            info!("Report written to {:?}", path);
        }
        None => println!("{}", report.to_json()?),
    }

    if let Some(path) = human_readable {
        HumanSummary::new(&report).write_file(&path)?;
        info!("Human-readable summary written to {:?}", path);
    }

    Ok(())
}

async fn emit<T: Serialize>(stdout: &mut tokio::io::Stdout, value: &T) -> Result<()> {
    let mut line = serde_json::to_string(value).context("Failed to serialize update")?;
    line.push('\n');
    stdout
        .write_all(line.as_bytes())
        .await
        .context("Failed to write to stdout")?;
    stdout.flush().await.context("Failed to flush stdout")
}

async fn stream_session(lexicon: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let lexicon = build_lexicon(lexicon.as_deref())?;
    let config = build_config(config.as_deref())?;
    let engine = RealtimeEngine::new(Arc::clone(&lexicon), config);

    let mut state = engine.begin();
    info!("Session {} reading partial transcripts from stdin", state.session_id());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut last_partial = String::new();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let (next, update) = engine.append_chunk(state, &line, Utc::now());
        state = next;
        last_partial = line;
        emit(&mut stdout, &update).await?;
    }

    let (state, update) = engine.finalize(state, &last_partial, Utc::now());
    emit(&mut stdout, &update).await?;

    let crisis = detect_crisis(&state.text(), &lexicon.crisis_phrases);
    if crisis.flagged {
        warn!("Crisis phrases present: {:?}", crisis.hits);
    }
    emit(&mut stdout, &crisis).await?;

    let coordinate = state.last_coordinate();
    info!(
        "Session {} {:?} after {} words: mood {}/10, energy {}/10, anxiety {}/10, coordinate ({:.2}, {:.2})",
        state.session_id(),
        state.phase(),
        state.tokens().len(),
        update.mood_score,
        update.energy_level,
        update.anxiety_level,
        coordinate.x,
        coordinate.y
    );

    Ok(())
}

fn screen_crisis(text: &str, lexicon: Option<PathBuf>) -> Result<()> {
    let lexicon = build_lexicon(lexicon.as_deref())?;
    let crisis = detect_crisis(text, &lexicon.crisis_phrases);
    println!(
        "{}",
        serde_json::to_string_pretty(&crisis).context("Failed to serialize assessment")?
    );
    Ok(())
}
