use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use log::{LevelFilter, debug};

use formcue::{
    ExerciseContext, KeyPointGenerator, LlmInterface, OllamaConfig, OpenAiConfig, build_prompt,
    extract_key_points,
};

#[derive(Parser, Debug)]
#[command(version, about = "formcue - exercise technique tips", long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum ProviderType {
    #[value(name = "openai")]
    OpenAI,
    Ollama,
    /// Canned reply, no network
    Mock,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::OpenAI => write!(f, "openai"),
            ProviderType::Ollama => write!(f, "ollama"),
            ProviderType::Mock => write!(f, "mock"),
        }
    }
}

#[derive(clap::Args, Debug)]
struct ExerciseArgs {
    /// Exercise name
    #[arg(short, long)]
    name: String,
    #[arg(short, long)]
    category: Option<String>,
    /// Target muscle, repeatable
    #[arg(long = "muscle")]
    muscles: Vec<String>,
    /// Equipment item, repeatable
    #[arg(long)]
    equipment: Vec<String>,
    #[arg(long = "type")]
    exercise_type: Option<String>,
}

impl From<ExerciseArgs> for ExerciseContext {
    fn from(args: ExerciseArgs) -> Self {
        ExerciseContext {
            name: args.name,
            category: args.category,
            muscles: Some(args.muscles).filter(|m| !m.is_empty()),
            equipment: Some(args.equipment).filter(|e| !e.is_empty()),
            exercise_type: args.exercise_type,
        }
    }
}

#[derive(clap::Args, Debug)]
struct ProviderArgs {
    #[arg(short, long, default_value_t = ProviderType::OpenAI)]
    provider: ProviderType,
    #[arg(short, long)]
    model: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate key points for a single exercise
    Tips {
        #[command(flatten)]
        exercise: ExerciseArgs,
        #[command(flatten)]
        provider: ProviderArgs,
    },
    /// Generate key points for every exercise in a JSON array file
    Batch {
        #[arg(short, long)]
        file: PathBuf,
        #[command(flatten)]
        provider: ProviderArgs,
    },
    /// Print the prompt that would be sent
    Prompt {
        #[command(flatten)]
        exercise: ExerciseArgs,
    },
    /// Run the key point extractor over a completion (stdin when no file)
    Extract {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

const MOCK_REPLY: &str = "1. Set up with a neutral spine\n\
                          2. Brace your core before each rep\n\
                          3. Move through a controlled full range\n\
                          4. Exhale on the hardest part of the lift";

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn make_llm(args: ProviderArgs) -> Result<LlmInterface> {
    let llm = match args.provider {
        ProviderType::OpenAI => {
            let mut config = OpenAiConfig::from_env()?;
            if let Some(model) = args.model {
                config = config.with_model(model);
            }
            LlmInterface::new_openai(config)?
        }
        ProviderType::Ollama => {
            let mut config = OllamaConfig::default();
            if let Some(model) = args.model {
                config = config.with_model(model);
            }
            LlmInterface::new_ollama(config)?
        }
        ProviderType::Mock => LlmInterface::new_mock_reply(MOCK_REPLY),
    };
    Ok(llm)
}

fn print_points(points: &[String]) {
    for (i, point) in points.iter().enumerate() {
        println!("{}. {}", i + 1, point);
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Tips { exercise, provider } => {
            let generator = KeyPointGenerator::new(make_llm(provider)?);
            debug!("using backend {}", generator.provider().describe());
            let ctx = ExerciseContext::from(exercise);
            let points = generator.generate_key_points(&ctx).await?;
            if points.is_empty() {
                eprintln!("No usable key points in the reply for {}", ctx.name);
            }
            print_points(&points);
            Ok(())
        }
        Commands::Batch { file, provider } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let contexts: Vec<ExerciseContext> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of exercises", file.display()))?;
            let generator = KeyPointGenerator::new(make_llm(provider)?);
            let results = generator.generate_many(&contexts).await;

            let report: Vec<serde_json::Value> = contexts
                .iter()
                .zip(results)
                .map(|(ctx, result)| match result {
                    Ok(points) => serde_json::json!({ "name": ctx.name, "keyPoints": points }),
                    Err(e) => serde_json::json!({ "name": ctx.name, "error": e.to_string() }),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Commands::Prompt { exercise } => {
            println!("{}", build_prompt(&exercise.into()));
            Ok(())
        }
        Commands::Extract { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };
            print_points(&extract_key_points(&text));
            Ok(())
        }
    }
}
