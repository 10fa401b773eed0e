use clap::Parser;
use sankey_snippets::core::ConfigProvider;
use sankey_snippets::utils::{logger, validation::Validate};
use sankey_snippets::{CliConfig, CsvLoader, SankeyEngine, SankeyError, SankeyPipeline};

fn main() {
    let config = CliConfig::parse();

    // Logging goes to stderr so stdout carries only the snippet
    logger::init_cli_logger(config.verbose);

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config) {
        tracing::error!("Sankey generation failed: {} (Category: {:?})", e, e.category());
        tracing::debug!("Suggestion: {}", e.recovery_suggestion());

        eprintln!("error: {}", e);
        eprintln!("hint: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn run(config: CliConfig) -> Result<(), SankeyError> {
    config.validate()?;

    let loader = CsvLoader::new(config.csv_path(), config.columns());
    let pipeline = SankeyPipeline::new(loader, config);
    let output = SankeyEngine::new(pipeline).run()?;

    println!("{}", output);
    Ok(())
}
