//! bqschema-gen
//!
//! Generates a Go file with one struct per table of a BigQuery dataset.

use anyhow::Context;
use bqschema::catalog::{AccessToken, BigQueryCatalogBuilder, CancellationToken, TokenSource};
use bqschema::codegen::{GofmtFormatter, GoimportsResolver, Generator};
use bqschema::config::{Cli, Config};
use bqschema::output::write_output;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli, |name| std::env::var(name).ok())?;

    init_logging(config.debug);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    runtime.block_on(run(config))
}

/// Logs go to stderr; stdout carries the debug dump.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(config: Config) -> anyhow::Result<()> {
    let token_source = match &config.access_token {
        Some(raw) => TokenSource::Static(AccessToken::new(raw)?),
        None => TokenSource::Gcloud,
    };

    let catalog = BigQueryCatalogBuilder::new(&config.project)
        .token_source(token_source)
        .connect()
        .await
        .with_context(|| format!("failed to connect to project '{}'", config.project))?;

    let generator = if config.no_format {
        Generator::new(&config.package)
    } else {
        Generator::new(&config.package)
            .with_formatter(GofmtFormatter::new())
            .with_import_resolver(GoimportsResolver::new())
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    tracing::info!(
        "Generating Go structs for {}:{} into {}",
        config.project,
        config.dataset,
        config.output.display()
    );

    let report = generator.collect(&catalog, &config.dataset, &cancel).await?;
    let source = generator.assemble(&report);
    if config.debug {
        println!("{}", source);
    }

    let processed = generator.post_process(&source)?;
    if config.debug {
        println!("{}", processed);
    }

    write_output(&config.output, processed.as_bytes())?;

    tracing::info!(
        "Wrote {} structs to {} ({} tables skipped)",
        report.units.len(),
        config.output.display(),
        report.skipped.len()
    );

    Ok(())
}
