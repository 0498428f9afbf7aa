// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod client_commands;
pub mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};

use client_commands::{BoundedTextArgs, ClientArgs, TextArgs};
use serve::ServeArgs;

/// Text embedding server and client
#[derive(Parser, Debug)]
#[command(name = "text-embedding-server")]
#[command(version)]
#[command(about = "Serve a sentence-embedding model over HTTP, or query a running server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the model and start the HTTP server
    Serve(ServeArgs),

    /// Print model metadata from a running server
    Info(ClientArgs),

    /// Count tokens in a text
    Count(TextArgs),

    /// Print the embedding of a text as JSON
    Encode(TextArgs),

    /// Truncate a text to a number of tokens
    Truncate(BoundedTextArgs),

    /// Split a text into token-sized chunks, one per line
    Chunk(BoundedTextArgs),

    /// Exercise every endpoint with a sample text
    Demo(ClientArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve(args) => serve::serve(args).await,
        Commands::Info(args) => client_commands::info(args).await,
        Commands::Count(args) => client_commands::count(args).await,
        Commands::Encode(args) => client_commands::encode(args).await,
        Commands::Truncate(args) => client_commands::truncate(args).await,
        Commands::Chunk(args) => client_commands::chunk(args).await,
        Commands::Demo(args) => client_commands::demo(args).await,
    }
}
