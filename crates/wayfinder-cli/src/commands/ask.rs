//! One-shot question

use crate::app::AskArgs;
use anyhow::Result;
use wayfinder_core::{Config, Pipeline};

pub async fn run(args: AskArgs, config: &Config) -> Result<()> {
    let query = args.query.join(" ");

    let pipeline = Pipeline::from_config(config, &args.document).await?;
    let exchange = pipeline.answer(&query).await?;

    if args.show_context {
        println!("--- context ---");
        println!("{}", exchange.context);
        println!("--- answer ---");
    }
    println!("{}", exchange.response);
    super::print_route_caption(exchange.route);

    Ok(())
}
