use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "todo", about = concat!("todo v", env!("CARGO_PKG_VERSION"), " - a small task list in a JSON file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Data file to use (default: data.json, or [storage] data_file from the config)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,

    /// Config file to read (default: ./todo.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks, open ones first
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Flip tasks between open and done
    #[command(alias = "mark")]
    Toggle(IdsArgs),
    /// Delete tasks
    #[command(alias = "delete")]
    Rm(IdsArgs),
    /// Show one task
    Show(ShowArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only completed tasks
    #[arg(long, conflicts_with = "pending")]
    pub done: bool,
    /// Only open tasks
    #[arg(long)]
    pub pending: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,
}

#[derive(Args)]
pub struct IdsArgs {
    /// Task IDs or unique ID prefixes
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID or unique ID prefix
    pub id: String,
}
