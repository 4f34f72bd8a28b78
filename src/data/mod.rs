//! Core data models for Texas county lookups
//!
//! This module contains the county code table, the demographic record built
//! from Census responses, and the request/parse logic for the Census API.

pub mod census;
pub mod counties;

pub use census::{parse_county_response, CensusConfig, ACS_FIELDS};
pub use counties::{all_counties, county_count, find_county, CountyNotFoundError};

use serde::Serialize;

/// A Texas county and its Census county code
///
/// Uses `&'static str` for string fields to allow static initialization
/// of the COUNTIES array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct County {
    /// County name without the "County" suffix (e.g. "Harris")
    pub name: &'static str,
    /// Three-digit Census county code (e.g. "201")
    pub code: &'static str,
}

/// Demographic data for a single county
///
/// Built only by [`parse_county_response`] from a Census data row; never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountyRecord {
    /// Census display name (e.g. "Harris County, Texas")
    pub name: String,
    /// Total population
    pub population: i64,
    /// Median household income in dollars
    pub median_household_income: i64,
    /// Median value of owner-occupied homes in dollars
    pub median_home_value: i64,
    /// Aggregate travel time to work in minutes
    pub total_commute_time: i64,
    /// Population 25 and over holding a bachelor's degree
    pub bachelors_degree_pop: i64,
    /// Owner-occupied housing units
    pub owner_occupied_housing: i64,
    /// Renter-occupied housing units
    pub renter_occupied_housing: i64,
    /// Two-digit state code ("48" for Texas)
    pub state_code: String,
    /// Three-digit county code
    pub county_code: String,
}
