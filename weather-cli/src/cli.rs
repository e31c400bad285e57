use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Text};
use tracing::info;
use weather_tool::{Config, Tool, WeatherInput, WeatherTool};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a place name")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively edit service hosts, timeout and diagnostics.
    Configure,

    /// Show current weather for a location.
    Show {
        /// Location name, e.g. "Tokyo".
        location: String,

        /// Print the tool's JSON output instead of a formatted summary.
        #[arg(long)]
        json: bool,
    },

    /// Invoke the tool with a raw JSON input object, e.g. '{"location":"Tokyo"}'.
    Invoke {
        input: String,
    },

    /// Print the tool definition (name, description, input and output schema).
    Schema,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = match &self.config {
            Some(path) => path.clone(),
            None => Config::config_file_path()?,
        };

        match self.command {
            Command::Configure => configure(&config_path)?,
            Command::Show { location, json } => {
                let tool = load_tool(&config_path)?;
                let input = WeatherInput::new(location.as_str());

                let report = tool
                    .report(&input)
                    .await
                    .with_context(|| format!("Failed to get weather for '{location}'"))?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&report.summary)?);
                } else {
                    println!("{}", output::render_report(&report));
                }
            }
            Command::Invoke { input } => {
                let tool = load_tool(&config_path)?;
                let input: serde_json::Value =
                    serde_json::from_str(&input).context("Tool input must be a JSON object")?;

                let output = tool.execute(input).await?;
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            Command::Schema => {
                let tool = load_tool(&config_path)?;
                println!("{}", serde_json::to_string_pretty(&tool.definition())?);
            }
        }

        Ok(())
    }
}

fn load_tool(config_path: &Path) -> anyhow::Result<WeatherTool> {
    let config = Config::load_from(config_path)?;
    Ok(WeatherTool::from_config(&config)?)
}

fn configure(config_path: &Path) -> anyhow::Result<()> {
    let current = Config::load_from(config_path)?;

    let geocoding_url = Text::new("Geocoding service URL:")
        .with_default(&current.geocoding_url)
        .prompt()?;
    let forecast_url =
        Text::new("Forecast service URL:").with_default(&current.forecast_url).prompt()?;
    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(current.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;
    let user_agent = Text::new("User-Agent:").with_default(&current.user_agent).prompt()?;
    let diagnostics = Confirm::new("Log network diagnostics before each lookup?")
        .with_default(current.diagnostics)
        .prompt()?;

    let updated = Config { geocoding_url, forecast_url, timeout_secs, user_agent, diagnostics };
    updated.save_to(config_path)?;

    info!(path = %config_path.display(), "Configuration saved");
    println!("Saved configuration to {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_with_json_flag() {
        let cli = Cli::try_parse_from(["weather", "show", "New York", "--json"]).unwrap();
        match cli.command {
            Command::Show { location, json } => {
                assert_eq!(location, "New York");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["weather", "schema", "--config", "/tmp/w.toml", "-v"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/w.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn show_requires_location() {
        assert!(Cli::try_parse_from(["weather", "show"]).is_err());
    }
}
