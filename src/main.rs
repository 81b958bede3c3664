use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use questforge::commands::{self, Session};
use questforge::config::Settings;
use questforge::domain::{
    Background, CharacterClass, CharacterTrait, Difficulty, Motivation, RoutineType, TaskCategory,
    TimeOfDay,
};

#[derive(Parser)]
#[command(name = "questforge")]
#[command(about = "Gamified task tracking - your to-do list as an RPG")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.questforge/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create your character
    Create {
        /// Character name
        name: String,

        /// Class: ranger, warrior, warrior_king, pirate, ice_mage, necromancer, dragon, angel
        #[arg(long)]
        class: CharacterClass,

        /// Background: student, athlete, artist, leader, explorer
        #[arg(long, default_value = "student")]
        background: Background,

        /// Motivation: achievement, knowledge, social, health, creative, balanced
        #[arg(long, default_value = "balanced")]
        motivation: Motivation,

        /// Personality traits (repeatable)
        #[arg(long = "trait")]
        traits: Vec<CharacterTrait>,

        /// Daily quest template ids to run every day (repeatable, see `templates`)
        #[arg(long = "daily")]
        dailies: Vec<String>,
    },

    /// Show the character sheet and active quests
    Status,

    /// Add a new quest
    New {
        /// Quest title
        title: String,

        /// Category: academic, social, fitness, health, creative, life_skills
        #[arg(short, long)]
        category: TaskCategory,

        /// Difficulty: easy, medium, hard (defaults to your character's preference)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Estimated minutes
        #[arg(short, long, default_value_t = 30)]
        time: u32,

        /// Subtask titles (repeatable)
        #[arg(short, long = "subtask")]
        subtasks: Vec<String>,
    },

    /// List quests
    List {
        /// Include completed quests
        #[arg(long)]
        all: bool,
    },

    /// Complete a quest
    Complete {
        /// Quest id prefix (from `list`)
        id: String,
    },

    /// Undo a completion (within one hour)
    Undo {
        /// Quest id prefix
        id: String,
    },

    /// Start the timer on a quest
    Start {
        /// Quest id prefix
        id: String,
    },

    /// Stop the timer on a quest
    Stop {
        /// Quest id prefix
        id: String,
    },

    /// Toggle a subtask
    Subtask {
        /// Quest id prefix
        id: String,

        /// Subtask number (from `list`)
        step: usize,
    },

    /// List the daily quest template catalog
    Templates {
        /// Only templates for this slot: morning, afternoon, evening, anytime
        #[arg(long)]
        time: Option<TimeOfDay>,
    },

    /// Suggest an adjusted time estimate for a new task
    Suggest {
        /// Category: academic, social, fitness, health, creative, life_skills
        category: TaskCategory,

        /// Your estimate in minutes
        time: u32,
    },

    /// Log a finished focus session
    Focus {
        /// Minutes focused
        minutes: u32,
    },

    /// Show achievements
    Achievements,

    /// Manage routines
    Routine {
        #[command(subcommand)]
        command: RoutineCommands,
    },
}

#[derive(Subcommand)]
enum RoutineCommands {
    /// Add a routine
    Add {
        /// Routine name
        name: String,

        /// Type: morning, evening, study, exercise, custom
        #[arg(short = 't', long = "type", default_value = "custom")]
        routine_type: RoutineType,

        /// Step titles in order (repeatable)
        #[arg(short, long = "step")]
        steps: Vec<String>,
    },

    /// List routines and today's progress
    List,

    /// Toggle a routine step for today
    Check {
        /// Routine id prefix or name
        id: String,

        /// Step number (from `routine list`)
        step: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::load()?,
    };

    let now = Local::now();
    let mut session = Session::load(&settings, now)?;

    match cli.command {
        Some(Commands::Create {
            name,
            class,
            background,
            motivation,
            traits,
            dailies,
        }) => {
            commands::create_character(
                &mut session, name, class, background, motivation, traits, dailies, now,
            )?;
        }
        Some(Commands::New {
            title,
            category,
            difficulty,
            time,
            subtasks,
        }) => {
            commands::add_quest(&mut session, title, category, difficulty, time, subtasks, now)?;
        }
        Some(Commands::List { all }) => {
            commands::list_quests(&session, all)?;
        }
        Some(Commands::Complete { id }) => {
            commands::complete_quest(&mut session, &id, now)?;
        }
        Some(Commands::Undo { id }) => {
            commands::undo_quest(&mut session, &id, now)?;
        }
        Some(Commands::Start { id }) => {
            commands::start_tracking(&mut session, &id, now)?;
        }
        Some(Commands::Stop { id }) => {
            commands::stop_tracking(&mut session, &id, now)?;
        }
        Some(Commands::Subtask { id, step }) => {
            commands::toggle_subtask(&mut session, &id, step, now)?;
        }
        Some(Commands::Templates { time }) => {
            commands::list_templates(time)?;
        }
        Some(Commands::Suggest { category, time }) => {
            commands::suggest(&session, category, time)?;
        }
        Some(Commands::Focus { minutes }) => {
            commands::focus(&mut session, minutes, now)?;
        }
        Some(Commands::Achievements) => {
            commands::list_achievements(&session)?;
        }
        Some(Commands::Routine { command }) => match command {
            RoutineCommands::Add {
                name,
                routine_type,
                steps,
            } => {
                commands::add_routine(&mut session, name, routine_type, steps, now)?;
            }
            RoutineCommands::List => {
                commands::list_routines(&session, now)?;
            }
            RoutineCommands::Check { id, step } => {
                commands::check_routine_step(&mut session, &id, step, now)?;
            }
        },
        Some(Commands::Status) | None => {
            commands::status(&session, now)?;
        }
    }

    Ok(())
}
