use super::{format_currency, PriceSource, PRICE_NOT_AVAILABLE};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory of `<label>.txt` files, each holding a pre-formatted price.
#[derive(Debug, Clone)]
pub struct PriceBook {
    dir: PathBuf,
    missing: String,
}

impl PriceBook {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            missing: PRICE_NOT_AVAILABLE.to_string(),
        }
    }

    /// Override the text returned for labels without a price file.
    pub fn with_missing_text(mut self, text: impl Into<String>) -> Self {
        self.missing = text.into();
        self
    }

    fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", label))
    }

    /// Read the stored price for `label`, `None` if there is no readable file.
    pub fn lookup(&self, label: &str) -> Option<String> {
        fs::read_to_string(self.path_for(label))
            .ok()
            .map(|text| text.trim().to_string())
    }

    /// Write `amount` for `label` in display format.
    pub fn store(&self, label: &str, amount: f64) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create price directory: {:?}", self.dir))?;

        let path = self.path_for(label);
        fs::write(&path, format_currency(amount))
            .with_context(|| format!("Failed to write price file: {:?}", path))?;

        Ok(path)
    }
}

impl PriceSource for PriceBook {
    fn price_for(&self, label: &str) -> String {
        match self.lookup(label) {
            Some(price) => price,
            None => {
                log::debug!("no price on file for {}", label);
                self.missing.clone()
            }
        }
    }
}
