use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use enablement_hub::scoring::SessionState;
use enablement_hub::store::JsonFileStore;
use enablement_hub::{Config, ProgressTracker, now_millis};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "enablement-hub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which modules have been viewed
    Status,
    /// Mark a module as viewed
    View {
        /// Module id
        module: String,
    },
    /// Start a visit and offer to resume if it has been a while
    Visit,
    /// Run the readiness calculator with one score per question
    Assess {
        /// Score for each question, in order
        #[arg(required = true)]
        scores: Vec<u32>,
    },
    /// Find the module to move to: next, prev, or a 1-based number
    Navigate {
        /// next, prev, or module number
        target: String,
        /// Module the reader is in now
        #[arg(short, long)]
        current: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "enablement_hub=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Status => status(&config),
        Commands::View { module } => view(&config, &module),
        Commands::Visit => visit(&config),
        Commands::Assess { scores } => assess(&config, &scores),
        Commands::Navigate { target, current } => navigate(&config, &target, current.as_deref()),
    }
}

fn open_tracker(config: &Config) -> Result<ProgressTracker<JsonFileStore>> {
    let store = Config::open_store()?;
    Ok(ProgressTracker::load(store, config.modules.iter().cloned())
        .with_resume_after(config.resume_after_ms))
}

fn status(config: &Config) -> Result<()> {
    let tracker = open_tracker(config)?;
    let completion = tracker.completion();

    println!("{}/{} modules ({}%)", completion.viewed, completion.total, completion.percentage);
    for module in tracker.module_ids() {
        let mark = if tracker.viewed(module) { "x" } else { " " };
        println!("  [{}] {}", mark, module);
    }
    Ok(())
}

fn view(config: &Config, module: &str) -> Result<()> {
    let mut tracker = open_tracker(config)?;
    let outcome = tracker.record_view(module, now_millis())?;

    if outcome.created {
        let completion = tracker.completion();
        println!("Viewed {} ({}/{})", module, completion.viewed, completion.total);
    } else {
        println!("{} was already viewed", module);
    }
    Ok(())
}

fn visit(config: &Config) -> Result<()> {
    let mut tracker = open_tracker(config)?;

    match tracker.begin_visit(now_millis())? {
        Some(prompt) => {
            println!("Welcome back! Continue where you left off?");
            if let Some(last) = prompt.last_viewed {
                println!("  Last viewed: {}", last);
            }
            println!("  Continue with: {}", prompt.next_module);
        }
        None => println!("Welcome!"),
    }
    Ok(())
}

fn assess(config: &Config, scores: &[u32]) -> Result<()> {
    let mut engine = config.scoring_engine()?;
    let expected = engine.questionnaire().len();
    if scores.len() != expected {
        bail!("Expected {} scores, got {}", expected, scores.len());
    }

    for (i, &score) in scores.iter().enumerate() {
        let state = engine
            .answer(i + 1, score)
            .with_context(|| format!("Failed to answer question {}", i + 1))?;
        if state == SessionState::InProgress {
            tracing::debug!(preview = engine.current_percentage(), "score preview");
        }
    }

    let result = engine.finalize()?;
    let content = result.content();
    println!("{}% - {} ({}/{})", result.percentage, content.label, result.score, result.max_score);
    println!();
    println!("Recommendations:");
    for recommendation in content.recommendations {
        println!("  - {}", recommendation);
    }
    println!();
    println!("{:>8}  {}", content.revenue.value, content.revenue.label);
    println!("{:>8}  {}", content.tickets.value, content.tickets.label);
    Ok(())
}

fn navigate(config: &Config, target: &str, current: Option<&str>) -> Result<()> {
    let navigator = config.navigator();
    let current = match current {
        Some(id) => {
            Some(navigator.index_of(id).with_context(|| format!("Unknown module: {}", id))?)
        }
        None => None,
    };

    let destination = match target {
        "next" | "j" => navigator.next(current),
        "prev" | "k" => navigator.prev(current),
        number => {
            let number: usize =
                number.parse().with_context(|| format!("Invalid target: {}", number))?;
            navigator.jump(number)
        }
    };

    match destination {
        Some(module) => println!("{}", module),
        None => bail!("No module to navigate to"),
    }
    Ok(())
}
