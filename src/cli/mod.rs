pub mod account;
pub mod browse;
pub mod exec;
pub mod init;
pub mod library;
pub mod search;
pub mod theatres;

use marquee::config::{self, Config};
use marquee::connect::DataConnect;
use marquee::error::Result;
use marquee::pages::MovieCard;
use std::sync::Arc;

/// Load config and build the Data Connect handle for a command
pub fn connect(config_path: &str) -> Result<(Config, Arc<DataConnect>)> {
    tracing::debug!("Loading configuration from {}", config_path);
    let config = config::load_config(config_path)?;
    let dc = Arc::new(DataConnect::from_config(&config));
    Ok((config, dc))
}

pub fn print_cards(cards: &[MovieCard]) {
    for card in cards {
        let year = card.year.map(|y| y.to_string()).unwrap_or_else(|| "----".to_string());
        let genre = card.genre.as_deref().unwrap_or("");
        println!("  {:<40} {}  {:<12} {}", card.title, year, genre, card.link);
    }
}
