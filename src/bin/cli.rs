use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use todoer::config::Config;
use todoer::{FileStorage, TaskError, TaskStore};
use tracing_subscriber::EnvFilter;

/// Plain-text task list with priorities, due dates and recurring tasks.
#[derive(Parser)]
#[command(name = "todoer", version, about)]
struct Cli {
    /// Task file to use instead of the configured one.
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today when rolling recurring tasks.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Add a task.
    Add {
        name: String,
        /// URGENT, HIGH, MEDIUM or LOW.
        #[arg(short, long)]
        priority: Option<String>,
        /// Due date, YYYY-MM-DD.
        #[arg(short, long)]
        due: Option<String>,
        /// daily, weekly or monthly.
        #[arg(short, long)]
        recurring: Option<String>,
    },
    /// Remove the first task with this name.
    Remove {
        name: String,
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// Change a task's priority or due date.
    Update {
        name: String,
        #[arg(short, long)]
        priority: Option<String>,
        #[arg(short, long)]
        due: Option<String>,
    },
    /// Roll recurring tasks and print the sorted list.
    List,
    /// Roll recurring tasks without listing.
    Roll,
}

fn main() -> Result<ExitCode> {
    // Status lines go to stdout; keep diagnostics on stderr and quiet by default.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("todoer=warn")),
        )
        .init();

    let cli = Cli::parse();

    let task_file = match cli.file {
        Some(path) => path,
        None => Config::load()?.task_file,
    };
    let mut store = TaskStore::open(FileStorage::new(task_file))?;
    if let Some(today) = cli.today {
        store = store.with_today(today);
    }

    let outcome = match cli.command.unwrap_or(Command::List) {
        Command::Add {
            name,
            priority,
            due,
            recurring,
        } => store
            .add_task(&name, priority.as_deref(), due.as_deref(), recurring.as_deref())
            .map(|s| println!("{s}")),
        Command::Remove { name, priority } => store
            .remove_task(&name, priority.as_deref())
            .map(|s| println!("{s}")),
        Command::Update {
            name,
            priority,
            due,
        } => store
            .update_task(&name, priority.as_deref(), due.as_deref())
            .map(|s| println!("{s}")),
        Command::List => store.list_tasks().map(|tasks| {
            if tasks.is_empty() {
                println!("No tasks.");
            }
            for (i, task) in tasks.iter().enumerate() {
                println!("{:>3}. {}", i + 1, task);
            }
        }),
        Command::Roll => store
            .process_recurring()
            .map(|n| println!("{n} recurring task(s) renewed.")),
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Storage and corruption failures are real errors, not status lines.
        Err(e @ (TaskError::Storage(_) | TaskError::Corrupt { .. })) => Err(e.into()),
        Err(status) => {
            println!("{status}");
            Ok(ExitCode::FAILURE)
        }
    }
}
