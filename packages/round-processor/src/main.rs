mod processor;
mod scenario;
mod settings;

use clap::Parser;
use processor::{Error, RoundProcessor};
use scenario::Scenario;
use settings::Settings;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let settings = Settings::parse();

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level)
        .with_target(false)
        .without_time()
        .init();

    let scenario = Scenario::load(&settings.scenario_path)?;
    info!(
        "Running scenario {} from {}",
        scenario.name,
        settings.scenario_path.display()
    );

    let processor = RoundProcessor::new(&settings.manager_id);
    let standings = processor.run(&scenario).await?;

    println!("{}", serde_json::to_string_pretty(&standings)?);
    Ok(())
}
