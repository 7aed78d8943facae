//! `hindsight status` — Show resolved configuration and corpus statistics.

use hindsight_config::EngineConfig;
use hindsight_core::example::TaskType;
use hindsight_engine::store::{ExampleStore, JsonlStore};

pub fn run() {
    let config_path = EngineConfig::config_dir().join("config.toml");
    let config = match EngineConfig::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("⚠️  {e}");
            println!("   Falling back to defaults.\n");
            EngineConfig::default()
        }
    };

    println!("🧠 Hindsight Status");
    println!("===================");
    println!("  Config file:   {}", config_path.display());
    println!("  Enabled:       {}", config.enabled);
    println!("  Max examples:  {}", config.max_examples);
    println!("  Min rating:    {}", config.min_rating);
    println!("  Relevance:     ≥ {:.2}", config.relevance_floor);
    println!("  Debug log:     {}", if config.debug {
        config.debug_log_path.display().to_string()
    } else {
        "disabled".to_string()
    });
    println!("  Corpus:        {}", config.corpus_path.display());

    let store = JsonlStore::new(config.corpus_path.clone());
    let corpus = store.load();

    if corpus.is_empty() {
        println!("\n  ⚠️  Corpus is empty — nothing will be injected yet");
        return;
    }

    println!("\n  Examples:      {}", corpus.len());
    for task_type in TaskType::ALL {
        let count = corpus.count_for(task_type);
        if count > 0 {
            println!("    {:<12} {count}", format!("{task_type}:"));
        }
    }

    let ratings: Vec<u8> = corpus.examples.iter().map(|e| e.rating).collect();
    let min = ratings.iter().min().copied().unwrap_or(0);
    let max = ratings.iter().max().copied().unwrap_or(0);
    println!("  Ratings:       {min}–{max}");

    let eligible = corpus
        .examples
        .iter()
        .filter(|e| e.rating >= config.min_rating && e.is_rankable())
        .count();
    println!("  Eligible:      {eligible} (rating ≥ {} with keywords)", config.min_rating);
}
