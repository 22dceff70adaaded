//! Interactive chat session

use crate::app::ChatArgs;
use anyhow::Result;
use std::io::{BufRead, Write};
use wayfinder_core::{Config, Pipeline};

struct Turn {
    role: &'static str,
    content: String,
}

pub async fn run(args: ChatArgs, config: &Config) -> Result<()> {
    println!("Indexing {} ...", args.document.display());
    let pipeline = Pipeline::from_config(config, &args.document).await?;
    println!(
        "Ready ({} passages). Ask about weather or the document; :history shows the session, :quit exits.",
        pipeline.index().passage_count().await?
    );

    let mut transcript: Vec<Turn> = Vec::new();
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let query = line?.trim().to_string();

        if query.is_empty() {
            continue;
        }
        match query.as_str() {
            ":quit" | ":exit" => break,
            ":history" => {
                for turn in &transcript {
                    println!("{}: {}", turn.role, turn.content);
                }
                continue;
            }
            _ => {}
        }

        match pipeline.answer(&query).await {
            Ok(exchange) => {
                println!("{}", exchange.response);
                super::print_route_caption(exchange.route);

                transcript.push(Turn {
                    role: "you",
                    content: exchange.query,
                });
                transcript.push(Turn {
                    role: "assistant",
                    content: exchange.response,
                });
            }
            Err(e) => {
                eprintln!("Error: {:#}", e);
            }
        }
    }

    Ok(())
}
