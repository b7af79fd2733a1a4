//! Interactive chat command implementation.

use std::io::Write as _;

use anyhow::{Context, Result};
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::models::Config;
use crate::rag::ChatSession;
use crate::services::{OllamaChat, OllamaEmbedder, QdrantBackend};

pub async fn handle_chat(config: &Config) -> Result<()> {
    let embedder = OllamaEmbedder::new(config);
    let model = OllamaChat::new(config);
    let store = QdrantBackend::new(config).context("failed to connect to vector store")?;

    let mut session = ChatSession::new(&embedder, &store, &model, config.top_k);

    println!("DocChat RAG Chat (type 'quit' to exit)");
    println!("{}", "-".repeat(40));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\n{} ", style("You:").bold().cyan());
        let _ = std::io::stdout().flush();

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim().to_string();
        if question.is_empty() {
            continue;
        }
        if question == "quit" || question == "exit" {
            println!("Goodbye!");
            break;
        }

        // A failed stage reports and returns to the prompt; history is only
        // appended to by a fully successful turn.
        let results = match session.ground(&question).await {
            Ok(results) => results,
            Err(e) => {
                eprintln!("{} {e}", style("Error:").bold().red());
                continue;
            }
        };
        println!(
            "{}",
            style(format!("Found {} relevant chunks", results.len())).dim()
        );

        print!("\n{} ", style("A:").bold().green());
        let _ = std::io::stdout().flush();

        let mut sink = |token: &str| {
            print!("{token}");
            let _ = std::io::stdout().flush();
        };
        match session.answer(&question, &results, &mut sink).await {
            Ok(_) => println!(),
            Err(e) => {
                println!();
                eprintln!("{} {e}", style("Error:").bold().red());
            }
        }
    }

    Ok(())
}
