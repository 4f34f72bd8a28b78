//! Cache key normalization for county names
//!
//! Free-form county names typed by a user ("Harris", "HARRIS COUNTY",
//! " Harris County, Texas ") and the canonical names returned by the Census
//! API must land on the same cache entry. `normalize` reduces any of these
//! spellings to a single lowercase key.

/// Suffixes stripped from the end of a whitespace-free, lowercased name.
/// Longest first so "county,texas" wins over "county".
const COUNTY_SUFFIXES: [&str; 2] = ["county,texas", "county"];

/// Canonicalizes a county name into a stable cache key
///
/// Lowercases the input, drops all whitespace (so "De Witt", "DeWitt" and
/// " dewitt " agree), and strips a trailing "county" optionally followed by
/// ", texas". Never fails; blank input yields an empty key.
///
/// The result is a fixed point: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let mut key: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    // Repeat until no suffix is left, otherwise "harris county county"
    // would need two passes to settle.
    while let Some(len) = COUNTY_SUFFIXES
        .iter()
        .find_map(|suffix| key.strip_suffix(suffix).map(str::len))
    {
        key.truncate(len);
    }

    key
}
