mod client;
mod config;
mod error;
mod render;

use engine::{LocalFileGateway, NewEntry, Tracker};

use crate::{
    client::RemoteGateway,
    config::{AppConfig, Command},
    error::Result,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let (config, command) = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "fuelog_cli={level},engine={level}",
            level = config.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let mut tracker = build_tracker(&config)?;
    tracker.load().await?;

    match command {
        Command::List => print!("{}", render::history(tracker.entries())),
        Command::Stats => print!("{}", render::stats(&tracker.stats())),
        Command::Add {
            date,
            liters,
            price,
            odometer,
        } => {
            let stored = tracker
                .add(NewEntry {
                    date,
                    liters,
                    total_price: price,
                    odometer,
                })
                .await?;
            println!("Added fill-up {}", stored.id);
        }
        Command::Delete { id } => {
            tracker.delete(id).await?;
            println!("Deleted fill-up {id}");
        }
    }

    Ok(())
}

fn build_tracker(config: &AppConfig) -> Result<Tracker> {
    let builder = Tracker::builder().consumption_basis(config.consumption_basis);
    let builder = match &config.local_path {
        Some(path) => {
            tracing::debug!("using local file {path}");
            builder.gateway(LocalFileGateway::new(path))
        }
        None => builder.gateway(RemoteGateway::new(&config.base_url)?),
    };
    Ok(builder.build()?)
}
