use clap::Parser;
use schema_sampler::adapters::document::{load_document, select_schema};
use schema_sampler::cli::Cli;
use schema_sampler::config::Settings;
use schema_sampler::{GeneratedSample, SampleCache, SampleGenerator, SamplePort};
use std::num::NonZeroUsize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the sample
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("schema_sampler=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    let config = settings.sample_config();

    let document = load_document(&cli.schema)?;
    let schema = select_schema(&document, cli.pointer.as_deref())?;
    let example = cli.example_value();

    info!(
        "Sampling {}{} as {:?}",
        cli.schema.display(),
        cli.pointer.as_deref().unwrap_or_default(),
        settings.output.format
    );

    let port: Box<dyn SamplePort> = match NonZeroUsize::new(settings.cache.capacity) {
        Some(capacity) if settings.cache.enabled => Box::new(
            SampleCache::with_capacity(capacity).with_max_depth(settings.sample.max_depth),
        ),
        _ => Box::new(SampleGenerator::new(config).with_max_depth(settings.sample.max_depth)),
    };

    let sample = port.sample(Some(schema), &config, example.as_ref(), settings.output.format);
    debug!("Generated sample: {:?}", sample);

    match sample {
        Some(GeneratedSample::Json(value)) if settings.output.pretty => {
            println!("{}", serde_json::to_string_pretty(&value)?)
        }
        Some(GeneratedSample::Json(value)) => println!("{}", serde_json::to_string(&value)?),
        Some(GeneratedSample::Xml(sample)) => {
            if let Some(document) = schema_sampler::adapters::xml_writer::into_document(sample) {
                println!("{document}");
            }
        }
        None => info!("Schema produced no sample"),
    }

    Ok(())
}
