use std::fs::OpenOptions;
use std::sync::Mutex;

use agent_portal::curriculum::{CATALOG, ContentBlock, LessonId, ModuleId};
use agent_portal::page::LessonContent;
use agent_portal::{App, Config};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "agent-portal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Open this module on launch (a, b, c, ...)
    #[arg(short, long)]
    module: Option<ModuleId>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List modules and their lessons
    List {
        /// Print the curriculum as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one lesson as plain text
    Show {
        /// Module name (a, b, c, ...)
        module: ModuleId,
        /// Lesson number within the module
        lesson: u32,
        /// Wrap width in columns
        #[arg(short, long, default_value_t = 80)]
        width: usize,
    },
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "agent_portal=info".into())
}

/// Log to a file while the TUI owns the terminal
fn init_file_logging() -> Result<()> {
    let dir = Config::data_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data directory {}", dir.display()))?;
    let path = dir.join("agent-portal.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List { json }) => {
            init_stderr_logging();
            list(json)
        }
        Some(Commands::Show { module, lesson, width }) => {
            init_stderr_logging();
            show(module, LessonId(lesson), width)
        }
        None => {
            init_file_logging()?;
            let config = Config::load()?;
            let mut app = App::new(config, cli.module)?;
            app.run().await
        }
    }
}

fn list(json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(CATALOG.modules())
            .context("failed to serialize curriculum")?;
        println!("{out}");
        return Ok(());
    }

    for module in CATALOG.modules() {
        if module.is_available() {
            println!("{} [{}]", module.heading(), module.tag);
        } else {
            println!("{} [{}] (coming soon)", module.heading(), module.tag);
        }
        for lesson in &module.lessons {
            println!(
                "  {:>2}. {:<40} {:>7}  {}",
                lesson.id,
                lesson.title,
                lesson.duration,
                lesson.kind.label()
            );
        }
    }
    Ok(())
}

fn show(module: ModuleId, lesson: LessonId, width: usize) -> Result<()> {
    let lesson = CATALOG
        .lesson(module, lesson)
        .with_context(|| format!("{module} has no lesson {lesson}"))?;
    let content = LessonContent { blocks: lesson.source.render() };

    println!("{}", lesson.title);
    println!("{} · {}", lesson.duration, lesson.kind.label());
    for block in &content.blocks {
        let Some(text) = block.plain_text() else { continue };
        println!();
        if let ContentBlock::Code(_) | ContentBlock::Table(_) | ContentBlock::Graph(_) = block {
            println!("{text}");
        } else {
            for line in text.lines() {
                println!("{}", textwrap::fill(line, width.max(20)));
            }
        }
    }
    Ok(())
}
