use clap::{Parser, Subcommand};

/// Command-line interface definition for rCountdown
#[derive(Parser)]
#[command(
    name = "rcountdown",
    version = env!("CARGO_PKG_VERSION"),
    about = "A local countdown reminder: pre-alerts, start alerts and auto-opened links",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update, no sound/notification/browser)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
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

    /// Add a countdown target
    Add {
        /// Display title
        title: String,

        /// Link to open at start (https:// or an app deep link)
        url: String,

        /// Start time: "YYYY-MM-DD HH:MM[:SS]", "YYYY-MM-DDTHH:MM[:SS]" (local) or RFC 3339
        start: String,

        /// Seconds before start at which the pre-alert fires
        #[arg(long = "lead", value_name = "SECS")]
        lead: Option<u32>,

        /// Open the link automatically at start (overrides `default_auto_open`)
        #[arg(long = "auto-open", conflicts_with = "no_auto_open")]
        auto_open: bool,

        /// Do not open the link automatically at start
        #[arg(long = "no-auto-open")]
        no_auto_open: bool,
    },

    /// List targets ordered by start time
    List,

    /// Delete a target by id (or unique id prefix)
    Del {
        id: String,
    },

    /// Toggle automatic link opening for a target
    Toggle {
        id: String,
    },

    /// Open a target's link now
    Open {
        id: String,
    },

    /// Show or edit the local profile card
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Print the pre-start checklist
    Checklist,

    /// Watch targets and fire alerts as they come due
    Watch {
        /// Allow system notifications for this session
        #[arg(long)]
        notify: bool,

        /// Disable the sound alert
        #[arg(long)]
        mute: bool,

        /// Stop after N ticks (default: run until interrupted)
        #[arg(long, value_name = "N")]
        ticks: Option<u64>,

        /// Tick interval in milliseconds (overrides config)
        #[arg(long, value_name = "MS")]
        interval: Option<u64>,
    },

    /// Print the internal log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
