use cardscan_cv::ScannerConfig;
use std::path::Path;

mod app;

const CONFIG_FILE: &str = "cardscan.json";

fn main() {
    let config = if Path::new(CONFIG_FILE).exists() {
        ScannerConfig::from_json_file(CONFIG_FILE).unwrap_or_else(|e| {
            eprintln!("Failed to load {}: {:#}", CONFIG_FILE, e);
            std::process::exit(1);
        })
    } else {
        ScannerConfig::default()
    };

    app::init_logging(config.verbose);

    match app::run(config) {
        Ok(summary) => {
            log::info!("Session ended after {} frames", summary.frames);
            for record in &summary.history {
                println!("{}: {}", record.label, record.price);
            }
        }
        Err(e) => {
            log::error!("Scan session failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
