use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use products_api::http::{Dispatcher, Event};
use products_api::products;

#[derive(Parser)]
#[command(name = "invoke-event")]
#[command(about = "Dispatch a single JSON event against the product routes", long_about = None)]
struct Cli {
    /// Event file to read; `-` reads from stdin
    #[arg(short, long, default_value = "-")]
    event: PathBuf,

    /// Pretty-print the response envelope
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let raw = if cli.event.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&cli.event)?
    };

    let event: Event = serde_json::from_str(&raw)?;
    let dispatcher = Dispatcher::new("invoke-event", products::router()?);
    let envelope = dispatcher.dispatch(event);

    let output = if cli.pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{output}");
    Ok(())
}
