//! Location metadata parsed from the `LOCATION` header line.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::EpwError;
use crate::format::format_number;

/// Header keyword of the first EPW line.
pub(crate) const LOCATION_KEYWORD: &str = "LOCATION";

/// Number of comma-separated fields on the `LOCATION` line, keyword included.
const LOCATION_FIELDS: usize = 10;

/// A scalar metadata value: either free text or a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Free-text value such as a city name.
    Text(String),
    /// Numeric value such as a coordinate.
    Number(f64),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(v) => f.write_str(&format_number(*v)),
        }
    }
}

/// Site metadata of an EPW file.
///
/// Field names follow the EPW `LOCATION` record. [`to_map`](Self::to_map)
/// exposes the same values under the keys used by pvlib
/// (`city`, `state-prov`, `country`, `data_type`, `WMO_code`, `latitude`,
/// `longitude`, `TZ`, `altitude`).
#[derive(Debug, Clone, PartialEq)]
pub struct EpwMetadata {
    /// City or site name.
    pub city: String,
    /// State, province or region.
    pub state_province: String,
    /// Country code or name.
    pub country: String,
    /// Data source, e.g. `TMY3` or `IWEC`.
    pub data_type: String,
    /// WMO station identifier, kept as text to preserve leading zeros.
    pub wmo_code: String,
    /// Latitude in decimal degrees, north positive.
    pub latitude: f64,
    /// Longitude in decimal degrees, east positive.
    pub longitude: f64,
    /// Time zone as hours offset from GMT.
    pub timezone: f64,
    /// Site elevation in metres.
    pub altitude: f64,
}

impl EpwMetadata {
    /// Parses a `LOCATION` header line.
    ///
    /// # Errors
    ///
    /// Returns [`EpwError::Format`] if the keyword is missing, the line has
    /// too few fields, a numeric field does not parse, or a coordinate is out
    /// of range.
    pub(crate) fn parse_location(line: &str, line_no: usize) -> Result<Self, EpwError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        if !fields[0].eq_ignore_ascii_case(LOCATION_KEYWORD) {
            return Err(EpwError::format(
                line_no,
                format!("expected {LOCATION_KEYWORD} header, got {:?}", fields[0]),
            ));
        }
        if fields.len() < LOCATION_FIELDS {
            return Err(EpwError::format(
                line_no,
                format!(
                    "{LOCATION_KEYWORD} header has {} fields, expected {LOCATION_FIELDS}",
                    fields.len()
                ),
            ));
        }

        let number = |idx: usize, name: &str| -> Result<f64, EpwError> {
            fields[idx].parse::<f64>().map_err(|_| {
                EpwError::format(line_no, format!("invalid {name}: {:?}", fields[idx]))
            })
        };

        let latitude = number(6, "latitude")?;
        let longitude = number(7, "longitude")?;
        let timezone = number(8, "time zone")?;
        let altitude = number(9, "elevation")?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(EpwError::format(
                line_no,
                format!("latitude {latitude} outside -90..=90"),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(EpwError::format(
                line_no,
                format!("longitude {longitude} outside -180..=180"),
            ));
        }

        Ok(Self {
            city: fields[1].to_string(),
            state_province: fields[2].to_string(),
            country: fields[3].to_string(),
            data_type: fields[4].to_string(),
            wmo_code: fields[5].to_string(),
            latitude,
            longitude,
            timezone,
            altitude,
        })
    }

    /// Renders the metadata back into a `LOCATION` header line.
    pub(crate) fn to_location_line(&self) -> String {
        format!(
            "{LOCATION_KEYWORD},{},{},{},{},{},{},{},{},{}",
            self.city,
            self.state_province,
            self.country,
            self.data_type,
            self.wmo_code,
            format_number(self.latitude),
            format_number(self.longitude),
            format_number(self.timezone),
            format_number(self.altitude),
        )
    }

    /// Returns `true` when the site lies in the southern hemisphere.
    pub fn is_southern(&self) -> bool {
        self.latitude < 0.0
    }

    /// Returns the metadata as a key/value mapping.
    pub fn to_map(&self) -> BTreeMap<String, MetadataValue> {
        let text = |s: &str| MetadataValue::Text(s.to_string());
        BTreeMap::from([
            ("city".to_string(), text(&self.city)),
            ("state-prov".to_string(), text(&self.state_province)),
            ("country".to_string(), text(&self.country)),
            ("data_type".to_string(), text(&self.data_type)),
            ("WMO_code".to_string(), text(&self.wmo_code)),
            ("latitude".to_string(), MetadataValue::Number(self.latitude)),
            ("longitude".to_string(), MetadataValue::Number(self.longitude)),
            ("TZ".to_string(), MetadataValue::Number(self.timezone)),
            ("altitude".to_string(), MetadataValue::Number(self.altitude)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "LOCATION,Chicago Ohare Intl Ap,IL,USA,TMY3,725300,41.98,-87.92,-6.0,201.0";

    #[test]
    fn parses_location_line() {
        let meta = EpwMetadata::parse_location(LINE, 1).expect("valid line");
        assert_eq!(meta.city, "Chicago Ohare Intl Ap");
        assert_eq!(meta.state_province, "IL");
        assert_eq!(meta.country, "USA");
        assert_eq!(meta.data_type, "TMY3");
        assert_eq!(meta.wmo_code, "725300");
        assert_eq!(meta.latitude, 41.98);
        assert_eq!(meta.longitude, -87.92);
        assert_eq!(meta.timezone, -6.0);
        assert_eq!(meta.altitude, 201.0);
        assert!(!meta.is_southern());
    }

    #[test]
    fn wrong_keyword_is_format_error() {
        let err = EpwMetadata::parse_location("SITE,a,b,c,d,e,1,2,3,4", 1).unwrap_err();
        assert!(matches!(err, EpwError::Format { line: 1, .. }));
    }

    #[test]
    fn short_line_is_format_error() {
        let err = EpwMetadata::parse_location("LOCATION,Chicago,IL", 1).unwrap_err();
        match err {
            EpwError::Format { reason, .. } => assert!(reason.contains("3 fields")),
            other => panic!("expected Format, got {other:?}"),
        }
    }

    #[test]
    fn bad_number_is_format_error() {
        let line = "LOCATION,Chicago,IL,USA,TMY3,725300,north,-87.92,-6.0,201.0";
        let err = EpwMetadata::parse_location(line, 1).unwrap_err();
        match err {
            EpwError::Format { reason, .. } => assert!(reason.contains("latitude")),
            other => panic!("expected Format, got {other:?}"),
        }
    }

    #[test]
    fn latitude_out_of_range_is_format_error() {
        let line = "LOCATION,Nowhere,-,-,TMY3,0,91.5,0,0,0";
        assert!(EpwMetadata::parse_location(line, 1).is_err());
    }

    #[test]
    fn location_line_round_trips() {
        let meta = EpwMetadata::parse_location(LINE, 1).unwrap();
        let again = EpwMetadata::parse_location(&meta.to_location_line(), 1).unwrap();
        assert_eq!(meta, again);
    }

    #[test]
    fn map_uses_pvlib_keys() {
        let map = EpwMetadata::parse_location(LINE, 1).unwrap().to_map();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "TZ",
                "WMO_code",
                "altitude",
                "city",
                "country",
                "data_type",
                "latitude",
                "longitude",
                "state-prov"
            ]
        );
        assert_eq!(map["latitude"], MetadataValue::Number(41.98));
        assert_eq!(map["WMO_code"].to_string(), "725300");
        assert_eq!(map["TZ"].to_string(), "-6");
    }

    #[test]
    fn values_serialize_untagged() {
        let map = EpwMetadata::parse_location(LINE, 1).unwrap().to_map();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["city"], "Chicago Ohare Intl Ap");
        assert_eq!(json["WMO_code"], "725300");
        assert_eq!(json["altitude"], 201.0);
    }
}
