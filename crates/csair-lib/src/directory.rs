//! City directory: the code/name bijection and the validated metro records.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use crate::dataset::MetroRecord;
use crate::error::{Error, Result};

/// Three-letter airport-style identifier for a metro.
pub type CityCode = String;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Display region a metro belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    #[serde(rename = "Americas")]
    Americas,
    #[serde(rename = "Africa")]
    Africa,
    #[serde(rename = "Europe")]
    Europe,
    #[serde(rename = "Asia and Oceania")]
    AsiaOceania,
}

impl Region {
    /// Map the numeric region code used by the data file.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Region::Americas),
            2 => Some(Region::Africa),
            3 => Some(Region::Europe),
            4 => Some(Region::AsiaOceania),
            _ => None,
        }
    }

    /// Human-readable label shown in reports.
    pub fn label(self) -> &'static str {
        match self {
            Region::Americas => "Americas",
            Region::Africa => "Africa",
            Region::Europe => "Europe",
            Region::AsiaOceania => "Asia and Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One axis of a coordinate pair, e.g. 33 degrees south.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinate {
    pub direction: String,
    pub degrees: f64,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{}", self.degrees, self.direction)
    }
}

/// Latitude/longitude pair of a metro.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: Coordinate,
    pub longitude: Coordinate,
}

impl Coordinates {
    fn from_labels(code: &str, labels: &BTreeMap<String, f64>) -> Result<Self> {
        let invalid = |message: String| Error::InvalidCoordinates {
            code: code.to_string(),
            message,
        };

        if labels.len() != 2 {
            return Err(invalid(format!(
                "expected 2 direction labels, found {}",
                labels.len()
            )));
        }

        let mut latitude = None;
        let mut longitude = None;
        for (label, &degrees) in labels {
            if !degrees.is_finite() {
                return Err(invalid(format!("degrees for {label} must be finite")));
            }
            let direction = label.to_ascii_uppercase();
            let axis = Coordinate {
                direction: direction.clone(),
                degrees,
            };
            match direction.as_str() {
                "N" | "S" if latitude.is_none() => latitude = Some(axis),
                "E" | "W" if longitude.is_none() => longitude = Some(axis),
                _ => return Err(invalid(format!("unexpected direction label {label:?}"))),
            }
        }

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Ok(Self {
                latitude,
                longitude,
            }),
            _ => Err(invalid("needs one latitude and one longitude".to_string())),
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Validated per-city metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metro {
    pub code: CityCode,
    pub name: String,
    pub country: String,
    pub continent: String,
    pub timezone: f64,
    pub coordinates: Coordinates,
    pub population: u64,
    pub region: Region,
}

impl Metro {
    fn from_record(record: &MetroRecord) -> Result<Self> {
        let code = record.code.as_str();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(Error::InvalidCode {
                code: code.to_string(),
            });
        }
        if !record.timezone.is_finite() {
            return Err(Error::InvalidTimezone {
                code: code.to_string(),
            });
        }
        let region = Region::from_code(record.region).ok_or_else(|| Error::InvalidRegion {
            code: code.to_string(),
            region: record.region,
        })?;
        let coordinates = Coordinates::from_labels(code, &record.coordinates)?;

        Ok(Self {
            code: code.to_string(),
            name: record.name.clone(),
            country: record.country.clone(),
            continent: record.continent.clone(),
            timezone: record.timezone,
            coordinates,
            population: record.population,
            region,
        })
    }

    /// Timezone offset rendered as `GMT +N` / `GMT -N`.
    pub fn timezone_label(&self) -> String {
        if self.timezone >= 0.0 {
            // `abs` folds a negative zero into `+0`.
            format!("GMT +{}", self.timezone.abs())
        } else {
            format!("GMT {}", self.timezone)
        }
    }

    /// Coordinates rendered with degree symbols, latitude first.
    pub fn coordinates_label(&self) -> String {
        self.coordinates.to_string()
    }
}

/// Authoritative lookup of metros by code and by name.
#[derive(Debug, Clone, Default)]
pub struct CityDirectory {
    metros: BTreeMap<CityCode, Metro>,
    name_to_code: HashMap<String, CityCode>,
}

impl CityDirectory {
    /// Build a directory from loader output. Fails on the first invalid record.
    pub fn from_records(records: &[MetroRecord]) -> Result<Self> {
        let mut directory = Self::default();
        for record in records {
            directory.register_metro(record)?;
        }
        Ok(directory)
    }

    /// Validate and register one metro, returning its code.
    pub fn register_metro(&mut self, record: &MetroRecord) -> Result<CityCode> {
        let metro = Metro::from_record(record)?;
        if self.metros.contains_key(&metro.code) {
            return Err(Error::DuplicateCode { code: metro.code });
        }
        if self.name_to_code.contains_key(&metro.name) {
            return Err(Error::DuplicateName { name: metro.name });
        }

        let code = metro.code.clone();
        self.name_to_code.insert(metro.name.clone(), code.clone());
        self.metros.insert(code.clone(), metro);
        Ok(code)
    }

    /// Resolve a display name to its code.
    pub fn encode(&self, name: &str) -> Result<&str> {
        self.name_to_code
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownCity {
                name: name.to_string(),
                suggestions: self.fuzzy_name_matches(name, 3),
            })
    }

    /// Resolve a code to its display name.
    pub fn decode(&self, code: &str) -> Result<&str> {
        self.metro_for(code).map(|metro| metro.name.as_str())
    }

    /// Metadata for a code.
    pub fn metro_for(&self, code: &str) -> Result<&Metro> {
        self.metros.get(code).ok_or_else(|| Error::UnknownCode {
            code: code.to_string(),
        })
    }

    /// Whether the code belongs to a registered metro.
    pub fn contains_code(&self, code: &str) -> bool {
        self.metros.contains_key(code)
    }

    /// Every registered name in case-sensitive alphabetical order.
    pub fn all_names(&self) -> BTreeSet<&str> {
        self.metros.values().map(|metro| metro.name.as_str()).collect()
    }

    /// Metros in code-lexicographic order.
    pub fn metros(&self) -> impl Iterator<Item = &Metro> {
        self.metros.values()
    }

    pub fn len(&self) -> usize {
        self.metros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metros.is_empty()
    }

    /// Names that closely resemble `name`, best match first.
    pub fn fuzzy_name_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .name_to_code
            .keys()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}
