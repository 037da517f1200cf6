//! Config command handler.

use deckport::config::DeckportConfig;

/// Prints the effective configuration.
pub fn cmd_config(config: &DeckportConfig) {
    println!("Current Configuration");
    println!("=====================");
    println!();

    println!("Config Files Loaded:");
    if config.config_sources.is_empty() {
        println!("  (none - using defaults)");
    } else {
        for source in &config.config_sources {
            println!("  - {}", source.display());
        }
    }
    println!();

    println!("Data Directory: {}", config.data_dir.display());
    println!("Database: {}", config.database_path().display());
    println!("Max File Size: {} bytes", config.max_file_size);
    println!("Default Description: {}", config.default_description);
    println!();

    println!("Logging:");
    println!(
        "  Format: {}",
        config.logging.format.as_deref().unwrap_or("pretty")
    );
    println!(
        "  Filter: {}",
        config.logging.filter.as_deref().unwrap_or("(default)")
    );
    println!(
        "  File: {}",
        config
            .logging
            .file
            .as_ref()
            .map_or_else(|| "(stderr)".to_string(), |p| p.display().to_string())
    );
}
