//! Census American Community Survey API support
//!
//! Builds county-level ACS requests (endpoint plus query pairs) and turns
//! the API's array-of-arrays response into a [`CountyRecord`].

use serde_json::Value;
use tracing::warn;

use super::CountyRecord;
use crate::request::RequestOptions;

/// Default base URL for the Census data API
const CENSUS_BASE_URL: &str = "https://api.census.gov/data";

/// State code for Texas
const TEXAS_STATE_CODE: &str = "48";

/// ACS variables requested for each county, in column order
///
/// The API appends the `state` and `county` geography columns after these,
/// giving ten columns per row.
pub const ACS_FIELDS: [&str; 8] = [
    "NAME",
    "B01001_001E", // total population
    "B19013_001E", // median household income
    "B25077_001E", // median home value
    "B08013_001E", // aggregate travel time to work
    "B15003_022E", // bachelor's degree
    "B25003_002E", // owner-occupied units
    "B25003_003E", // renter-occupied units
];

/// Minimum number of columns in a usable data row
const MIN_COLUMNS: usize = ACS_FIELDS.len() + 2;

/// Connection settings for the Census API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusConfig {
    /// Base URL (allows override for testing)
    pub base_url: String,
    /// ACS vintage year
    pub year: u16,
    /// Dataset path below the year
    pub dataset: String,
    /// State code used in the `in=state:` clause
    pub state_code: String,
    /// Optional API key, sent as the `key` query parameter
    pub api_key: Option<String>,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            base_url: CENSUS_BASE_URL.to_string(),
            year: 2022,
            dataset: "acs/acs5".to_string(),
            state_code: TEXAS_STATE_CODE.to_string(),
            api_key: None,
        }
    }
}

impl CensusConfig {
    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the ACS vintage year
    pub fn with_year(mut self, year: u16) -> Self {
        self.year = year;
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    /// Path component of request URLs, e.g. `/2022/acs/acs5`
    pub fn dataset_path(&self) -> String {
        format!("/{}/{}", self.year, self.dataset)
    }

    /// Dataset endpoint URL, without a query string
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.dataset_path()
        )
    }

    /// Builds request options for a single county
    ///
    /// The query pairs are left raw; the executor percent-encodes them.
    ///
    /// # Arguments
    /// * `county_code` - Three-digit county code from the county table
    pub fn county_request(&self, county_code: &str) -> RequestOptions {
        let mut options = RequestOptions::get()
            .with_query("get", ACS_FIELDS.join(","))
            .with_query("for", format!("county:{}", county_code))
            .with_query("in", format!("state:{}", self.state_code));
        if let Some(key) = &self.api_key {
            options = options.with_query("key", key.clone());
        }
        options
    }
}

/// Parses a Census response into a county record
///
/// Expects exactly two rows (header plus one data row) and at least ten
/// columns in the data row. Any other shape yields `None` rather than an
/// error; callers treat that as "no usable result".
///
/// Numeric cells that fail to parse become 0.
pub fn parse_county_response(body: &Value) -> Option<CountyRecord> {
    let rows = body.as_array()?;
    if rows.len() != 2 {
        warn!(rows = rows.len(), "Unexpected row count in Census response");
        return None;
    }

    let row = rows[1].as_array()?;
    if row.len() < MIN_COLUMNS {
        warn!(columns = row.len(), "Too few columns in Census response");
        return None;
    }

    let cells: Vec<String> = row.iter().map(cell_text).collect();

    Some(CountyRecord {
        name: cells[0].clone(),
        population: parse_int(&cells[1]),
        median_household_income: parse_int(&cells[2]),
        median_home_value: parse_int(&cells[3]),
        total_commute_time: parse_int(&cells[4]),
        bachelors_degree_pop: parse_int(&cells[5]),
        owner_occupied_housing: parse_int(&cells[6]),
        renter_occupied_housing: parse_int(&cells[7]),
        state_code: cells[8].clone(),
        county_code: cells[9].clone(),
    })
}

/// Renders a cell as text; the API sends strings but may send null
fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parses an integer cell, defaulting to 0
fn parse_int(cell: &str) -> i64 {
    cell.trim().parse().unwrap_or(0)
}
