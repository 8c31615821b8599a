mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bread-ics")]
#[command(about = "Backward-chained bread baking schedules, exported as ICS")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print the preparation schedule for a recipe
    Plan {
        /// Recipe id (e.g. sourdough, baguette, or a custom slug)
        #[arg(short, long)]
        recipe: String,

        /// Target completion time (format: YYYY-MM-DDTHH:MM)
        #[arg(short, long)]
        target: String,

        /// Also write the schedule to an ICS file at this path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Export the schedule for a recipe as an ICS calendar file
    Export {
        /// Recipe id
        #[arg(short, long)]
        recipe: String,

        /// Target completion time (format: YYYY-MM-DDTHH:MM)
        #[arg(short, long)]
        target: String,

        /// Output file path (default: <recipe name>-schedule.ics)
        #[arg(short, long)]
        output: Option<String>,

        /// Calendar name (X-WR-CALNAME)
        #[arg(long)]
        calendar_name: Option<String>,

        /// Display a reminder this many minutes before each step
        #[arg(long)]
        reminder_minutes: Option<u32>,
    },

    /// Recipe management commands
    Recipes {
        #[command(subcommand)]
        action: RecipeCommands,
    },
}

#[derive(Subcommand)]
enum RecipeCommands {
    /// List built-in and custom recipes
    List,

    /// Show the steps of a recipe
    Show {
        /// Recipe id
        recipe: String,
    },

    /// Add a custom recipe from a JSON file
    Add {
        /// JSON file path
        file: String,
    },

    /// Remove a custom recipe
    Remove {
        /// Recipe id
        recipe: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("bread_ics_cli={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Plan {
            recipe,
            target,
            output,
        } => commands::plan_command(recipe, target, output).await,

        Commands::Export {
            recipe,
            target,
            output,
            calendar_name,
            reminder_minutes,
        } => {
            commands::export_command(commands::ExportParams {
                recipe,
                target,
                output,
                calendar_name,
                reminder_minutes,
            })
            .await
        }

        Commands::Recipes { action } => match action {
            RecipeCommands::List => commands::recipes_list_command().await,
            RecipeCommands::Show { recipe } => commands::recipes_show_command(recipe).await,
            RecipeCommands::Add { file } => commands::recipes_add_command(file).await,
            RecipeCommands::Remove { recipe } => commands::recipes_remove_command(recipe).await,
        },
    }
}
