use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for Thymer
/// Terminal stopwatch with lap tracking, session history and habit streaks
#[derive(Parser)]
#[command(
    name = "thymer",
    version = env!("CARGO_PKG_VERSION"),
    about = "A terminal productivity timer: stopwatches, laps, session history and habit streaks",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Run interactive stopwatches (commands are read line by line from stdin)
    Run {
        /// Names of the timers to start with (repeatable)
        #[arg(long = "name", short = 'n', value_name = "NAME")]
        names: Vec<String>,
    },

    /// Record a finished session manually
    Add {
        /// Timer name the session belongs to
        timer: String,

        /// Duration (e.g. 1500, 25m, 1h30m, 01:02:03.5)
        duration: String,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Day of the session (default: today)")]
        date: Option<String>,

        #[arg(long = "at", value_name = "HH:MM", help = "Start time (default: now minus duration)")]
        at: Option<String>,

        #[arg(
            long,
            value_delimiter = ',',
            value_name = "SPLITS",
            help = "Lap durations, comma separated (same syntax as duration)"
        )]
        laps: Vec<String>,

        #[arg(long, help = "Free-form notes")]
        notes: Option<String>,
    },

    /// Show the most recently saved sessions
    Recent {
        #[arg(long, short = 'l', help = "Number of sessions to show")]
        limit: Option<usize>,
    },

    /// Show today, this week, habit streaks and per-timer statistics
    Stats {
        #[arg(long, short = 'd', help = "Window in days for per-timer statistics")]
        days: Option<u32>,

        #[arg(long, short = 't', help = "Restrict the per-timer table to one timer")]
        timer: Option<String>,
    },

    /// Export sessions and daily statistics
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Output file (default: timestamped name)")]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Append the sessions of a JSON export to the database
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Manage the database (integrity checks, info, vacuum)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },
}
