use crate::export::ExportFormat;
use crate::store::StoreKind;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for punchclock
#[derive(Parser)]
#[command(
    name = "punchclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple time clock: clock in/out and see hours worked today and this week",
    long_about = None
)]
pub struct Cli {
    /// Override the event store path (useful for tests or a shared file)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the store backend
    #[arg(global = true, long = "store", value_enum)]
    pub store: Option<StoreKind>,

    /// Override the timezone (IANA name, e.g. Europe/Rome)
    #[arg(global = true, long = "tz")]
    pub tz: Option<String>,

    /// Pin "now" to a fixed instant (RFC3339 or YYYY-MM-DD HH:MM[:SS])
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Print diagnostic logs on stderr
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Who is punching and when.
#[derive(Args, Debug, Clone)]
pub struct PunchArgs {
    /// Person name
    pub name: String,

    /// Role (free text; defaults to `default_role` from the config)
    #[arg(long = "role")]
    pub role: Option<String>,

    /// Record at this time instead of now (YYYY-MM-DD HH:MM[:SS] or RFC3339)
    #[arg(long = "at")]
    pub at: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the event store and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

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

    /// Clock in
    #[command(alias = "clock-in")]
    In(PunchArgs),

    /// Clock out
    #[command(alias = "clock-out")]
    Out(PunchArgs),

    /// Show hours worked today and this week
    Status {
        /// Person name
        name: String,
    },

    /// List sessions per day
    List {
        /// Person name
        name: String,

        #[arg(long, short, help = "Filter by year/month/day or a custom range (A:B)")]
        period: Option<String>,

        #[arg(long = "events", help = "List raw clock events instead of sessions")]
        events: bool,
    },

    /// List known people
    People,

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Export clock events
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "name", help = "Only export events for this person")]
        name: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
