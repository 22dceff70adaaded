//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wayfinder")]
#[command(
    author,
    version,
    about = "Route questions to live weather or document retrieval and answer them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat session
    Chat(ChatArgs),

    /// Ask a single question
    Ask(AskArgs),

    /// Build the index and report its status
    Status(StatusArgs),
}

#[derive(Args)]
pub struct ChatArgs {
    /// Document to index for retrieval
    #[arg(long, value_name = "PATH")]
    pub document: PathBuf,
}

#[derive(Args)]
pub struct AskArgs {
    /// Document to index for retrieval
    #[arg(long, value_name = "PATH")]
    pub document: PathBuf,

    /// Question to answer
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Print the gathered context before the answer
    #[arg(long)]
    pub show_context: bool,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Document to index
    #[arg(long, value_name = "PATH")]
    pub document: PathBuf,
}
