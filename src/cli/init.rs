use marquee::config::{self, EMULATOR_HOST_ENV, ID_TOKEN_ENV};
use marquee::error::Result;

/// Write an example configuration to a file or stdout
pub fn run(output: Option<String>) -> Result<()> {
    let config = config::example_config();

    if let Some(output_path) = output {
        config::save_config(&config, &output_path)?;
        tracing::info!("📝 Generated example configuration: {}", output_path);
        tracing::info!("💡 Next steps:");
        tracing::info!("   1. Fill in firebase.project_id and firebase.api_key");
        tracing::info!("   2. Browse with 'marquee --config {} browse'", output_path);
    } else {
        let toml_string = toml::to_string_pretty(&config)?;
        println!("{}", toml_string);
        tracing::info!("💡 Tip: Add --output <file> to save to a file instead of stdout");
    }

    tracing::info!("   Set {} to use a local emulator, {} to act as a signed-in user", EMULATOR_HOST_ENV, ID_TOKEN_ENV);

    Ok(())
}
