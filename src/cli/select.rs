use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};

use super::page::artwork_table;
use crate::api::{Artwork, HttpArtworkSource};
use crate::config::Config;
use crate::viewer::{accumulate_rows, Accumulation, Selection};

/// Select N artworks across consecutive pages and print them
#[derive(Args)]
pub struct SelectCommand {
    /// Number of rows to select
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Page to start selecting from
    #[arg(long = "from-page", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub from_page: u32,

    /// Print the selected records as JSON
    #[arg(long)]
    pub json: bool,
}

impl SelectCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        debug!(
            "Executing select command: {} rows from page {}",
            self.count, self.from_page
        );

        let source = HttpArtworkSource::new(config.client_options())?;
        let accumulation = accumulate_rows(&source, self.from_page, self.count as usize, &Selection::new())
            .await
            .with_context(|| format!("Failed to select {} rows", self.count))?;
        info!(
            "Selected {} rows over {} pages",
            accumulation.added.len(),
            accumulation.pages_fetched
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&accumulation.added)?);
        } else {
            println!("{}", render_selection(&accumulation, self.count as usize));
        }
        Ok(())
    }
}

fn render_selection(accumulation: &Accumulation, requested: usize) -> String {
    let rows: &[Artwork] = &accumulation.added;
    let mut footer = format!(
        "{} rows selected from {} pages",
        rows.len(),
        accumulation.pages_fetched
    );
    if rows.len() < requested {
        footer.push_str(&format!(" (only {} available)", rows.len()));
    }
    format!("{}{}", artwork_table(rows), footer)
}
