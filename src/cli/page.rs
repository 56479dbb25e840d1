use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};

use crate::api::{Artwork, ArtworkPage, ArtworkSource, HttpArtworkSource, COLUMN_HEADERS};
use crate::config::Config;
use crate::utils::text::string::format_table;

/// Widest cell printed in table output
pub(crate) const MAX_CELL_WIDTH: usize = 40;

/// Fetch one page of artworks and print it
#[derive(Args)]
pub struct PageCommand {
    /// Page number, starting at 1
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Print the raw page as JSON
    #[arg(long)]
    pub json: bool,
}

impl PageCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        debug!("Executing page command for page {}", self.page);

        let source = HttpArtworkSource::new(config.client_options())?;
        let page = source
            .fetch_page(self.page)
            .await
            .with_context(|| format!("Failed to fetch page {}", self.page))?;
        info!("Fetched {} artworks from page {}", page.data.len(), self.page);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&page)?);
        } else {
            println!("{}", render_page(&page));
        }
        Ok(())
    }
}

/// Aligned table of `artworks` with an ID column in front
pub(crate) fn artwork_table(artworks: &[Artwork]) -> String {
    let mut headers = vec!["ID"];
    headers.extend(COLUMN_HEADERS);

    let rows: Vec<Vec<String>> = artworks
        .iter()
        .map(|artwork| {
            let mut row = vec![artwork.id.to_string()];
            row.extend(artwork.columns());
            row
        })
        .collect();

    format_table(&headers, &rows, MAX_CELL_WIDTH)
}

fn render_page(page: &ArtworkPage) -> String {
    let p = &page.pagination;
    format!(
        "{}\nPage {} of {} · {} artworks",
        artwork_table(&page.data),
        p.current_page,
        p.total_pages,
        p.total
    )
}
