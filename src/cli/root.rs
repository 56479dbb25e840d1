use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{debug, info};

use super::page::PageCommand;
use super::select::SelectCommand;
use crate::api::HttpArtworkSource;
use crate::config::Config;
use crate::tui;

/// artview - browse the Art Institute of Chicago collection in your terminal
#[derive(Parser)]
#[command(
    name = "artview",
    version,
    about = "Browse the Art Institute of Chicago collection in your terminal",
    long_about = r#"artview shows the public /artworks listing as a paginated, selectable table.

Examples:
  artview                        # Start the interactive table at page 1
  artview --page 12              # Start at page 12
  artview page 3 --json          # Print page 3 as JSON
  artview select 25              # Print the first 25 artworks"#
)]
pub struct Cli {
    /// Base URL of the artworks API
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Page to open the interactive table at
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a single page and print it
    Page(PageCommand),

    /// Select N rows across pages and print them
    Select(SelectCommand),
}

impl Cli {
    /// Whether the run will take over the terminal
    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }

    /// Flags take precedence over file and environment settings
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
    }

    pub async fn execute(self, config: Config) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        config.validate()?;
        debug!("Configuration validated");

        match &self.command {
            Some(Commands::Page(cmd)) => cmd.execute(&config).await,
            Some(Commands::Select(cmd)) => cmd.execute(&config).await,
            None => self.start_interactive_mode(&config).await,
        }
    }

    async fn start_interactive_mode(&self, config: &Config) -> Result<()> {
        info!("Starting interactive mode");

        let source = Arc::new(HttpArtworkSource::new(config.client_options())?);
        tui::run(config, source, self.page).await?;

        info!("Application finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = Cli::try_parse_from(["artview", "--page", "4"]).unwrap();
        assert!(cli.is_interactive());
        assert_eq!(cli.page, 4);
    }

    #[test]
    fn test_page_subcommand() {
        let cli = Cli::try_parse_from(["artview", "page", "7", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Page(cmd)) => {
                assert_eq!(cmd.page, 7);
                assert!(cmd.json);
            }
            _ => panic!("expected page command"),
        }
    }

    #[test]
    fn test_select_subcommand_defaults() {
        let cli = Cli::try_parse_from(["artview", "select", "25", "-d"]).unwrap();
        assert!(cli.debug);
        match cli.command {
            Some(Commands::Select(cmd)) => {
                assert_eq!(cmd.count, 25);
                assert_eq!(cmd.from_page, 1);
                assert!(!cmd.json);
            }
            _ => panic!("expected select command"),
        }
    }

    #[test]
    fn test_zero_page_is_rejected() {
        assert!(Cli::try_parse_from(["artview", "page", "0"]).is_err());
        assert!(Cli::try_parse_from(["artview", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["artview", "select", "0"]).is_err());
    }

    #[test]
    fn test_base_url_flag_overrides_config() {
        let cli = Cli::try_parse_from(["artview", "page", "1", "--base-url", "http://localhost:9000"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.base_url, "http://localhost:9000");
    }
}
