use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::matcher::OverlapPolicy;

/// Find common free time between two weekly availabilities.
#[derive(Debug, Parser)]
#[command(name = "schedule-matcher", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web interface
    Serve(ServeArgs),
    /// Match two availabilities and print the suggested slots
    Match(MatchArgs),
    /// Print the share link fragment for a saved state
    Share {
        /// JSON state file (as exported by the web interface)
        #[arg(long)]
        state: PathBuf,
    },
    /// Decode a share link into a JSON state file
    Unshare {
        /// Share link, `#share=` fragment or bare payload
        encoded: String,
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Secret used to encrypt session cookies, at least 32 bytes.
    /// A random key is generated when missing, so sessions do not survive restarts.
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true)]
    pub session_secret: Option<String>,

    /// Only send the session cookie over HTTPS
    #[arg(long, env = "SECURE_COOKIES")]
    pub secure_cookies: bool,
}

#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("input").required(true).args(["state", "you"])))]
pub struct MatchArgs {
    /// JSON state file holding both sides
    #[arg(long, conflicts_with_all = ["you", "them"])]
    pub state: Option<PathBuf>,

    /// CSV availability of the first side (`day,start,end`)
    #[arg(long, requires = "them")]
    pub you: Option<PathBuf>,

    /// CSV availability of the second side
    #[arg(long, requires = "you")]
    pub them: Option<PathBuf>,

    /// Meeting length in minutes
    #[arg(long, short, default_value_t = 30, allow_negative_numbers = true)]
    pub duration: i64,

    #[arg(long, value_enum, default_value_t = OverlapPolicy::KeepAll)]
    pub policy: OverlapPolicy,

    /// Also write the suggestions to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}
