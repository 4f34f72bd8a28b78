//! Command-line interface parsing for txcounty
//!
//! This module handles parsing of CLI arguments using clap, validation into a
//! `StartupConfig`, and rendering of fetch results for the terminal.

use clap::Parser;
use thiserror::Error;

use crate::data::CensusConfig;
use crate::fetch::FetchState;

/// First ACS 5-year vintage published by the Census API
const FIRST_ACS5_YEAR: u16 = 2009;

/// Error types for CLI argument parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// A county argument was empty or only whitespace
    #[error("County names must not be blank")]
    BlankCounty,

    /// The requested survey year predates the ACS 5-year data
    #[error("Invalid year: {0}. ACS 5-year data starts in 2009")]
    InvalidYear(u16),
}

/// txcounty - Texas county demographics from the Census API
#[derive(Parser, Debug)]
#[command(name = "txcounty")]
#[command(about = "Look up Texas county demographics with an in-memory cache")]
#[command(version)]
pub struct Cli {
    /// County names to look up, e.g. "Harris" or "Fort Bend County"
    #[arg(required = true, value_name = "COUNTY")]
    pub counties: Vec<String>,

    /// Census API key
    #[arg(long, env = "CENSUS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the Census API base URL
    #[arg(long, env = "CENSUS_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// ACS 5-year vintage to query
    #[arg(long, default_value_t = 2022)]
    pub year: u16,

    /// Print records as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Print cache statistics after all lookups
    #[arg(long)]
    pub stats: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output style for fetch results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Counties to look up, in order
    pub counties: Vec<String>,
    /// Census API settings
    pub census: CensusConfig,
    /// How to print results
    pub output: OutputFormat,
    /// Whether to print cache statistics
    pub show_stats: bool,
    /// Whether debug logging is enabled
    pub verbose: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Errors
    /// * `CliError::BlankCounty` if any county argument is blank
    /// * `CliError::InvalidYear` if the year predates ACS 5-year data
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.counties.iter().any(|c| c.trim().is_empty()) {
            return Err(CliError::BlankCounty);
        }
        if cli.year < FIRST_ACS5_YEAR {
            return Err(CliError::InvalidYear(cli.year));
        }

        let mut census = CensusConfig::default()
            .with_year(cli.year)
            .with_api_key(cli.api_key.clone());
        if let Some(base_url) = &cli.base_url {
            census = census.with_base_url(base_url.clone());
        }

        Ok(StartupConfig {
            counties: cli.counties.clone(),
            census,
            output: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            show_stats: cli.stats,
            verbose: cli.verbose,
        })
    }
}

/// Renders one lookup result for the terminal
///
/// Errors render as their message; a successful request without a usable
/// record renders as "no data".
pub fn render_state(query: &str, state: &FetchState, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::json!({
            "query": query,
            "from_cache": state.is_from_cache,
            "error": state.error,
            "data": state.data,
        })
        .to_string(),
        OutputFormat::Text => {
            if let Some(error) = &state.error {
                return format!("{}: error: {}", query, error);
            }
            let Some(record) = &state.data else {
                return format!("{}: no data", query);
            };
            let source = if state.is_from_cache { " (cached)" } else { "" };
            format!(
                "{}{}\n  population: {}\n  median household income: ${}\n  median home value: ${}\n  total commute time: {} min\n  bachelor's degree: {}\n  owner-occupied units: {}\n  renter-occupied units: {}\n  FIPS: {}{}",
                record.name,
                source,
                record.population,
                record.median_household_income,
                record.median_home_value,
                record.total_commute_time,
                record.bachelors_degree_pop,
                record.owner_occupied_housing,
                record.renter_occupied_housing,
                record.state_code,
                record.county_code
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CountyRecord;
    use crate::fetch::FetchPhase;

    fn harris_state(from_cache: bool) -> FetchState {
        FetchState {
            data: Some(CountyRecord {
                name: "Harris County, Texas".to_string(),
                population: 4_731_145,
                median_household_income: 65_788,
                median_home_value: 220_300,
                total_commute_time: 100,
                bachelors_degree_pop: 200,
                owner_occupied_housing: 300,
                renter_occupied_housing: 400,
                state_code: "48".to_string(),
                county_code: "201".to_string(),
            }),
            is_from_cache: from_cache,
            phase: if from_cache {
                FetchPhase::CacheHit
            } else {
                FetchPhase::ParseOk
            },
            ..FetchState::default()
        }
    }

    #[test]
    fn test_cli_parse_single_county() {
        let cli = Cli::parse_from(["txcounty", "Harris"]);
        assert_eq!(cli.counties, vec!["Harris"]);
        assert_eq!(cli.year, 2022);
        assert!(!cli.json);
        assert!(!cli.stats);
    }

    #[test]
    fn test_cli_parse_multiple_counties_and_flags() {
        let cli = Cli::parse_from([
            "txcounty",
            "Harris",
            "Fort Bend County",
            "--json",
            "--stats",
            "--year",
            "2021",
        ]);
        assert_eq!(cli.counties, vec!["Harris", "Fort Bend County"]);
        assert!(cli.json);
        assert!(cli.stats);
        assert_eq!(cli.year, 2021);
    }

    #[test]
    fn test_cli_requires_a_county() {
        assert!(Cli::try_parse_from(["txcounty"]).is_err());
    }

    #[test]
    fn test_startup_config_from_cli() {
        let cli = Cli::parse_from([
            "txcounty",
            "Travis",
            "--base-url",
            "http://localhost:8080",
            "--api-key",
            "abc",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(config.counties, vec!["Travis"]);
        assert_eq!(config.census.base_url, "http://localhost:8080");
        assert_eq!(config.census.api_key.as_deref(), Some("abc"));
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_startup_config_rejects_blank_county() {
        let cli = Cli::parse_from(["txcounty", "Harris", "   "]);
        assert_eq!(StartupConfig::from_cli(&cli).unwrap_err(), CliError::BlankCounty);
    }

    #[test]
    fn test_startup_config_rejects_old_year() {
        let cli = Cli::parse_from(["txcounty", "Harris", "--year", "2000"]);
        let err = StartupConfig::from_cli(&cli).unwrap_err();
        assert_eq!(err, CliError::InvalidYear(2000));
        assert!(err.to_string().contains("2009"));
    }

    #[test]
    fn test_render_text_fresh_and_cached() {
        let fresh = render_state("Harris", &harris_state(false), OutputFormat::Text);
        assert!(fresh.starts_with("Harris County, Texas\n"));
        assert!(fresh.contains("population: 4731145"));
        assert!(fresh.contains("FIPS: 48201"));

        let cached = render_state("Harris", &harris_state(true), OutputFormat::Text);
        assert!(cached.starts_with("Harris County, Texas (cached)"));
    }

    #[test]
    fn test_render_text_error_and_no_data() {
        let error = FetchState {
            is_error: true,
            error: Some("Bad Request".to_string()),
            phase: FetchPhase::NetworkFail,
            ..FetchState::default()
        };
        assert_eq!(
            render_state("Harris", &error, OutputFormat::Text),
            "Harris: error: Bad Request"
        );

        let empty = FetchState {
            phase: FetchPhase::ParseFail,
            ..FetchState::default()
        };
        assert_eq!(render_state("Harris", &empty, OutputFormat::Text), "Harris: no data");
    }

    #[test]
    fn test_render_json() {
        let line = render_state("harris", &harris_state(true), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["query"], "harris");
        assert_eq!(value["from_cache"], true);
        assert_eq!(value["data"]["population"], 4731145);
        assert!(value["error"].is_null());
    }
}
