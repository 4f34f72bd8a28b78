//! Static county code table for Texas
//!
//! Maps each of the 254 Texas counties to its three-digit Census county code.
//! Lookups are case-insensitive and tolerate the "County"/"County, Texas"
//! suffixes and spacing differences that the cache key normalizer accepts.

use thiserror::Error;

use super::County;
use crate::cache::normalize;

/// Returned when a county name has no entry in the code table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("County not found: '{0}'")]
pub struct CountyNotFoundError(pub String);

/// Static array of all Texas counties in alphabetical order
pub static COUNTIES: [County; 254] = [
    County { name: "Anderson", code: "001" },
    County { name: "Andrews", code: "003" },
    County { name: "Angelina", code: "005" },
    County { name: "Aransas", code: "007" },
    County { name: "Archer", code: "009" },
    County { name: "Armstrong", code: "011" },
    County { name: "Atascosa", code: "013" },
    County { name: "Austin", code: "015" },
    County { name: "Bailey", code: "017" },
    County { name: "Bandera", code: "019" },
    County { name: "Bastrop", code: "021" },
    County { name: "Baylor", code: "023" },
    County { name: "Bee", code: "025" },
    County { name: "Bell", code: "027" },
    County { name: "Bexar", code: "029" },
    County { name: "Blanco", code: "031" },
    County { name: "Borden", code: "033" },
    County { name: "Bosque", code: "035" },
    County { name: "Bowie", code: "037" },
    County { name: "Brazoria", code: "039" },
    County { name: "Brazos", code: "041" },
    County { name: "Brewster", code: "043" },
    County { name: "Briscoe", code: "045" },
    County { name: "Brooks", code: "047" },
    County { name: "Brown", code: "049" },
    County { name: "Burleson", code: "051" },
    County { name: "Burnet", code: "053" },
    County { name: "Caldwell", code: "055" },
    County { name: "Calhoun", code: "057" },
    County { name: "Callahan", code: "059" },
    County { name: "Cameron", code: "061" },
    County { name: "Camp", code: "063" },
    County { name: "Carson", code: "065" },
    County { name: "Cass", code: "067" },
    County { name: "Castro", code: "069" },
    County { name: "Chambers", code: "071" },
    County { name: "Cherokee", code: "073" },
    County { name: "Childress", code: "075" },
    County { name: "Clay", code: "077" },
    County { name: "Cochran", code: "079" },
    County { name: "Coke", code: "081" },
    County { name: "Coleman", code: "083" },
    County { name: "Collin", code: "085" },
    County { name: "Collingsworth", code: "087" },
    County { name: "Colorado", code: "089" },
    County { name: "Comal", code: "091" },
    County { name: "Comanche", code: "093" },
    County { name: "Concho", code: "095" },
    County { name: "Cooke", code: "097" },
    County { name: "Coryell", code: "099" },
    County { name: "Cottle", code: "101" },
    County { name: "Crane", code: "103" },
    County { name: "Crockett", code: "105" },
    County { name: "Crosby", code: "107" },
    County { name: "Culberson", code: "109" },
    County { name: "Dallam", code: "111" },
    County { name: "Dallas", code: "113" },
    County { name: "Dawson", code: "115" },
    County { name: "Deaf Smith", code: "117" },
    County { name: "Delta", code: "119" },
    County { name: "Denton", code: "121" },
    County { name: "DeWitt", code: "123" },
    County { name: "Dickens", code: "125" },
    County { name: "Dimmit", code: "127" },
    County { name: "Donley", code: "129" },
    County { name: "Duval", code: "131" },
    County { name: "Eastland", code: "133" },
    County { name: "Ector", code: "135" },
    County { name: "Edwards", code: "137" },
    County { name: "Ellis", code: "139" },
    County { name: "El Paso", code: "141" },
    County { name: "Erath", code: "143" },
    County { name: "Falls", code: "145" },
    County { name: "Fannin", code: "147" },
    County { name: "Fayette", code: "149" },
    County { name: "Fisher", code: "151" },
    County { name: "Floyd", code: "153" },
    County { name: "Foard", code: "155" },
    County { name: "Fort Bend", code: "157" },
    County { name: "Franklin", code: "159" },
    County { name: "Freestone", code: "161" },
    County { name: "Frio", code: "163" },
    County { name: "Gaines", code: "165" },
    County { name: "Galveston", code: "167" },
    County { name: "Garza", code: "169" },
    County { name: "Gillespie", code: "171" },
    County { name: "Glasscock", code: "173" },
    County { name: "Goliad", code: "175" },
    County { name: "Gonzales", code: "177" },
    County { name: "Gray", code: "179" },
    County { name: "Grayson", code: "181" },
    County { name: "Gregg", code: "183" },
    County { name: "Grimes", code: "185" },
    County { name: "Guadalupe", code: "187" },
    County { name: "Hale", code: "189" },
    County { name: "Hall", code: "191" },
    County { name: "Hamilton", code: "193" },
    County { name: "Hansford", code: "195" },
    County { name: "Hardeman", code: "197" },
    County { name: "Hardin", code: "199" },
    County { name: "Harris", code: "201" },
    County { name: "Harrison", code: "203" },
    County { name: "Hartley", code: "205" },
    County { name: "Haskell", code: "207" },
    County { name: "Hays", code: "209" },
    County { name: "Hemphill", code: "211" },
    County { name: "Henderson", code: "213" },
    County { name: "Hidalgo", code: "215" },
    County { name: "Hill", code: "217" },
    County { name: "Hockley", code: "219" },
    County { name: "Hood", code: "221" },
    County { name: "Hopkins", code: "223" },
    County { name: "Houston", code: "225" },
    County { name: "Howard", code: "227" },
    County { name: "Hudspeth", code: "229" },
    County { name: "Hunt", code: "231" },
    County { name: "Hutchinson", code: "233" },
    County { name: "Irion", code: "235" },
    County { name: "Jack", code: "237" },
    County { name: "Jackson", code: "239" },
    County { name: "Jasper", code: "241" },
    County { name: "Jeff Davis", code: "243" },
    County { name: "Jefferson", code: "245" },
    County { name: "Jim Hogg", code: "247" },
    County { name: "Jim Wells", code: "249" },
    County { name: "Johnson", code: "251" },
    County { name: "Jones", code: "253" },
    County { name: "Karnes", code: "255" },
    County { name: "Kaufman", code: "257" },
    County { name: "Kendall", code: "259" },
    County { name: "Kenedy", code: "261" },
    County { name: "Kent", code: "263" },
    County { name: "Kerr", code: "265" },
    County { name: "Kimble", code: "267" },
    County { name: "King", code: "269" },
    County { name: "Kinney", code: "271" },
    County { name: "Kleberg", code: "273" },
    County { name: "Knox", code: "275" },
    County { name: "Lamar", code: "277" },
    County { name: "Lamb", code: "279" },
    County { name: "Lampasas", code: "281" },
    County { name: "La Salle", code: "283" },
    County { name: "Lavaca", code: "285" },
    County { name: "Lee", code: "287" },
    County { name: "Leon", code: "289" },
    County { name: "Liberty", code: "291" },
    County { name: "Limestone", code: "293" },
    County { name: "Lipscomb", code: "295" },
    County { name: "Live Oak", code: "297" },
    County { name: "Llano", code: "299" },
    County { name: "Loving", code: "301" },
    County { name: "Lubbock", code: "303" },
    County { name: "Lynn", code: "305" },
    County { name: "McCulloch", code: "307" },
    County { name: "McLennan", code: "309" },
    County { name: "McMullen", code: "311" },
    County { name: "Madison", code: "313" },
    County { name: "Marion", code: "315" },
    County { name: "Martin", code: "317" },
    County { name: "Mason", code: "319" },
    County { name: "Matagorda", code: "321" },
    County { name: "Maverick", code: "323" },
    County { name: "Medina", code: "325" },
    County { name: "Menard", code: "327" },
    County { name: "Midland", code: "329" },
    County { name: "Milam", code: "331" },
    County { name: "Mills", code: "333" },
    County { name: "Mitchell", code: "335" },
    County { name: "Montague", code: "337" },
    County { name: "Montgomery", code: "339" },
    County { name: "Moore", code: "341" },
    County { name: "Morris", code: "343" },
    County { name: "Motley", code: "345" },
    County { name: "Nacogdoches", code: "347" },
    County { name: "Navarro", code: "349" },
    County { name: "Newton", code: "351" },
    County { name: "Nolan", code: "353" },
    County { name: "Nueces", code: "355" },
    County { name: "Ochiltree", code: "357" },
    County { name: "Oldham", code: "359" },
    County { name: "Orange", code: "361" },
    County { name: "Palo Pinto", code: "363" },
    County { name: "Panola", code: "365" },
    County { name: "Parker", code: "367" },
    County { name: "Parmer", code: "369" },
    County { name: "Pecos", code: "371" },
    County { name: "Polk", code: "373" },
    County { name: "Potter", code: "375" },
    County { name: "Presidio", code: "377" },
    County { name: "Rains", code: "379" },
    County { name: "Randall", code: "381" },
    County { name: "Reagan", code: "383" },
    County { name: "Real", code: "385" },
    County { name: "Red River", code: "387" },
    County { name: "Reeves", code: "389" },
    County { name: "Refugio", code: "391" },
    County { name: "Roberts", code: "393" },
    County { name: "Robertson", code: "395" },
    County { name: "Rockwall", code: "397" },
    County { name: "Runnels", code: "399" },
    County { name: "Rusk", code: "401" },
    County { name: "Sabine", code: "403" },
    County { name: "San Augustine", code: "405" },
    County { name: "San Jacinto", code: "407" },
    County { name: "San Patricio", code: "409" },
    County { name: "San Saba", code: "411" },
    County { name: "Schleicher", code: "413" },
    County { name: "Scurry", code: "415" },
    County { name: "Shackelford", code: "417" },
    County { name: "Shelby", code: "419" },
    County { name: "Sherman", code: "421" },
    County { name: "Smith", code: "423" },
    County { name: "Somervell", code: "425" },
    County { name: "Starr", code: "427" },
    County { name: "Stephens", code: "429" },
    County { name: "Sterling", code: "431" },
    County { name: "Stonewall", code: "433" },
    County { name: "Sutton", code: "435" },
    County { name: "Swisher", code: "437" },
    County { name: "Tarrant", code: "439" },
    County { name: "Taylor", code: "441" },
    County { name: "Terrell", code: "443" },
    County { name: "Terry", code: "445" },
    County { name: "Throckmorton", code: "447" },
    County { name: "Titus", code: "449" },
    County { name: "Tom Green", code: "451" },
    County { name: "Travis", code: "453" },
    County { name: "Trinity", code: "455" },
    County { name: "Tyler", code: "457" },
    County { name: "Upshur", code: "459" },
    County { name: "Upton", code: "461" },
    County { name: "Uvalde", code: "463" },
    County { name: "Val Verde", code: "465" },
    County { name: "Van Zandt", code: "467" },
    County { name: "Victoria", code: "469" },
    County { name: "Walker", code: "471" },
    County { name: "Waller", code: "473" },
    County { name: "Ward", code: "475" },
    County { name: "Washington", code: "477" },
    County { name: "Webb", code: "479" },
    County { name: "Wharton", code: "481" },
    County { name: "Wheeler", code: "483" },
    County { name: "Wichita", code: "485" },
    County { name: "Wilbarger", code: "487" },
    County { name: "Willacy", code: "489" },
    County { name: "Williamson", code: "491" },
    County { name: "Wilson", code: "493" },
    County { name: "Winkler", code: "495" },
    County { name: "Wise", code: "497" },
    County { name: "Wood", code: "499" },
    County { name: "Yoakum", code: "501" },
    County { name: "Young", code: "503" },
    County { name: "Zapata", code: "505" },
    County { name: "Zavala", code: "507" },
];

/// Get a county by name
///
/// # Arguments
///
/// * `name` - County name in any spelling the cache normalizer accepts
///   (e.g. "harris", "Harris County", "HARRIS COUNTY, TEXAS")
///
/// # Returns
///
/// Returns `Ok(&County)` if found, `Err(CountyNotFoundError)` otherwise.
/// Unknown names are never defaulted to another county.
pub fn find_county(name: &str) -> Result<&'static County, CountyNotFoundError> {
    let key = normalize(name);
    COUNTIES
        .iter()
        .find(|county| !key.is_empty() && normalize(county.name) == key)
        .ok_or_else(|| CountyNotFoundError(name.trim().to_string()))
}

/// Returns all Texas counties
pub fn all_counties() -> &'static [County] {
    &COUNTIES
}

/// Returns the number of counties in the table
pub fn county_count() -> usize {
    COUNTIES.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_county_count_is_254() {
        assert_eq!(county_count(), 254);
        assert_eq!(all_counties().len(), 254);
    }

    #[test]
    fn test_codes_are_unique_three_digit() {
        let mut seen = HashSet::new();
        for county in all_counties() {
            assert_eq!(county.code.len(), 3, "bad code for {}", county.name);
            assert!(county.code.chars().all(|c| c.is_ascii_digit()));
            assert!(seen.insert(county.code), "duplicate code {}", county.code);
        }
    }

    #[test]
    fn test_normalized_names_are_unique() {
        let keys: HashSet<String> = all_counties().iter().map(|c| normalize(c.name)).collect();
        assert_eq!(keys.len(), 254);
    }

    #[test]
    fn test_find_county_known_codes() {
        assert_eq!(find_county("Harris").unwrap().code, "201");
        assert_eq!(find_county("Anderson").unwrap().code, "001");
        assert_eq!(find_county("Travis").unwrap().code, "453");
        assert_eq!(find_county("Zavala").unwrap().code, "507");
    }

    #[test]
    fn test_find_county_is_case_insensitive() {
        assert_eq!(find_county("HARRIS").unwrap().name, "Harris");
        assert_eq!(find_county("el paso").unwrap().code, "141");
    }

    #[test]
    fn test_find_county_accepts_suffixes() {
        assert_eq!(find_county("Harris County").unwrap().code, "201");
        assert_eq!(find_county("Harris County, Texas").unwrap().code, "201");
        assert_eq!(find_county("Fort Bend County, Texas").unwrap().code, "157");
    }

    #[test]
    fn test_find_county_unknown() {
        let err = find_county("Nonexistent").unwrap_err();
        assert_eq!(err, CountyNotFoundError("Nonexistent".to_string()));
        assert!(err.to_string().contains("Nonexistent"));
    }

    #[test]
    fn test_find_county_empty_name() {
        assert!(find_county("").is_err());
        assert!(find_county("County").is_err());
    }
}
