use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "runpanel")]
#[command(about = "Submit automation jobs to a backend and follow their outcome")]
pub struct Cli {
    /// Backend base URL (defaults to the job file's, then http://localhost:5000)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Also write diagnostics to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that the backend is reachable
    Probe,

    /// Probe the backend, validate a job file and submit it
    Run {
        /// RON job file
        #[arg(short, long)]
        job: PathBuf,

        /// Override the job file's max comments
        #[arg(long)]
        max_comments: Option<String>,

        /// Override the job file's iterations
        #[arg(long)]
        iterations: Option<String>,

        /// Probe the backend once after this many milliseconds, before the run starts
        #[arg(long, value_name = "MS")]
        auto_probe_after: Option<u64>,

        /// Give up on the run request after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },
}
