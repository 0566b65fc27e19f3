use clap::Parser;

/// Startup arguments for a noto session
#[derive(Parser)]
#[clap(
    version,
    about = "Noto - an in-memory note organizer",
    long_about = "Noto keeps your notes, folders, and view filters in memory for the \
                  length of a session. The only file it ever writes is a JSON export."
)]
pub struct Cli {
    /// Start with sample folders and notes
    #[clap(long)]
    pub demo: bool,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,
}
