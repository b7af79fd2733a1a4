//! CLI surface for the RAG chat tool.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// RAG chat CLI for markdown knowledge bases.
#[derive(Debug, Parser)]
#[command(name = "docchat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ingest markdown files from a directory into the vector store
    Ingest {
        /// Directory to walk for .md files
        #[arg(required = true)]
        dir: PathBuf,
    },

    /// Start an interactive RAG chat session
    Chat,
}
