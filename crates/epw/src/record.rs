//! Hourly data records.

use crate::error::EpwError;
use crate::format::format_number;

/// Number of comma-separated fields in one hourly record.
pub const RECORD_FIELDS: usize = 35;

/// Number of numeric meteorological fields held by [`EpwRecord`].
const NUMERIC_FIELDS: usize = 28;

/// Column of the present-weather-codes text field.
const PRESENT_WEATHER_CODES_COLUMN: usize = 27;

/// Numeric meteorological fields of an hourly record, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpwField {
    /// Dry bulb temperature (°C).
    DryBulb = 0,
    /// Dew point temperature (°C).
    DewPoint,
    /// Relative humidity (%).
    RelativeHumidity,
    /// Atmospheric station pressure (Pa).
    Pressure,
    /// Extraterrestrial horizontal radiation (Wh/m²).
    ExtraterrestrialHorizontalRadiation,
    /// Extraterrestrial direct normal radiation (Wh/m²).
    ExtraterrestrialDirectNormalRadiation,
    /// Horizontal infrared radiation intensity (Wh/m²).
    HorizontalInfraredRadiation,
    /// Global horizontal radiation (Wh/m²).
    GlobalHorizontalRadiation,
    /// Direct normal radiation (Wh/m²).
    DirectNormalRadiation,
    /// Diffuse horizontal radiation (Wh/m²).
    DiffuseHorizontalRadiation,
    /// Global horizontal illuminance (lux).
    GlobalHorizontalIlluminance,
    /// Direct normal illuminance (lux).
    DirectNormalIlluminance,
    /// Diffuse horizontal illuminance (lux).
    DiffuseHorizontalIlluminance,
    /// Zenith luminance (Cd/m²).
    ZenithLuminance,
    /// Wind direction (degrees from north).
    WindDirection,
    /// Wind speed (m/s).
    WindSpeed,
    /// Total sky cover (tenths).
    TotalSkyCover,
    /// Opaque sky cover (tenths).
    OpaqueSkyCover,
    /// Visibility (km).
    Visibility,
    /// Ceiling height (m).
    CeilingHeight,
    /// Present weather observation flag.
    PresentWeatherObservation,
    /// Precipitable water (mm).
    PrecipitableWater,
    /// Aerosol optical depth (thousandths).
    AerosolOpticalDepth,
    /// Snow depth (cm).
    SnowDepth,
    /// Days since last snowfall.
    DaysSinceLastSnowfall,
    /// Albedo.
    Albedo,
    /// Liquid precipitation depth (mm).
    LiquidPrecipitationDepth,
    /// Liquid precipitation quantity (hours).
    LiquidPrecipitationQuantity,
}

impl EpwField {
    /// Every numeric field, in file order.
    pub const ALL: [EpwField; NUMERIC_FIELDS] = [
        Self::DryBulb,
        Self::DewPoint,
        Self::RelativeHumidity,
        Self::Pressure,
        Self::ExtraterrestrialHorizontalRadiation,
        Self::ExtraterrestrialDirectNormalRadiation,
        Self::HorizontalInfraredRadiation,
        Self::GlobalHorizontalRadiation,
        Self::DirectNormalRadiation,
        Self::DiffuseHorizontalRadiation,
        Self::GlobalHorizontalIlluminance,
        Self::DirectNormalIlluminance,
        Self::DiffuseHorizontalIlluminance,
        Self::ZenithLuminance,
        Self::WindDirection,
        Self::WindSpeed,
        Self::TotalSkyCover,
        Self::OpaqueSkyCover,
        Self::Visibility,
        Self::CeilingHeight,
        Self::PresentWeatherObservation,
        Self::PrecipitableWater,
        Self::AerosolOpticalDepth,
        Self::SnowDepth,
        Self::DaysSinceLastSnowfall,
        Self::Albedo,
        Self::LiquidPrecipitationDepth,
        Self::LiquidPrecipitationQuantity,
    ];

    /// Position of the field within [`EpwRecord`] storage.
    fn slot(self) -> usize {
        self as usize
    }

    /// Zero-based column of the field within a data line.
    ///
    /// Columns 0-5 hold the timestamp and source flags, and column 27 holds
    /// the present-weather codes, so numeric slots are offset around them.
    pub fn column(self) -> usize {
        let slot = self.slot();
        if slot + 6 < PRESENT_WEATHER_CODES_COLUMN {
            slot + 6
        } else {
            slot + 7
        }
    }

    /// Sentinel EPW uses for a missing value in this field, if any.
    pub fn missing_value(self) -> Option<f64> {
        match self {
            Self::DryBulb | Self::DewPoint => Some(99.9),
            Self::RelativeHumidity => Some(999.0),
            Self::Pressure => Some(999_999.0),
            Self::GlobalHorizontalRadiation
            | Self::DirectNormalRadiation
            | Self::DiffuseHorizontalRadiation
            | Self::ExtraterrestrialHorizontalRadiation
            | Self::ExtraterrestrialDirectNormalRadiation
            | Self::HorizontalInfraredRadiation => Some(9999.0),
            Self::WindDirection | Self::WindSpeed => Some(999.0),
            Self::TotalSkyCover | Self::OpaqueSkyCover => Some(99.0),
            _ => None,
        }
    }
}

/// One hourly observation line of an EPW file.
#[derive(Debug, Clone, PartialEq)]
pub struct EpwRecord {
    /// Calendar year of the observation.
    pub year: i32,
    /// Month (1..=12).
    pub month: u8,
    /// Day of month (1..=31).
    pub day: u8,
    /// Hour ending (1..=24).
    pub hour: u8,
    /// Minute (0..=60).
    pub minute: u8,
    /// Data source and uncertainty flags, kept verbatim.
    pub data_flags: String,
    /// Present weather codes, kept verbatim to preserve leading zeros.
    pub present_weather_codes: String,
    values: [f64; NUMERIC_FIELDS],
}

impl EpwRecord {
    /// Parses one data line from its comma-separated fields.
    ///
    /// Fields beyond [`RECORD_FIELDS`] are ignored.
    pub(crate) fn parse(fields: &csv::StringRecord, line_no: usize) -> Result<Self, EpwError> {
        if fields.len() < RECORD_FIELDS {
            return Err(EpwError::format(
                line_no,
                format!("expected {RECORD_FIELDS} fields, got {}", fields.len()),
            ));
        }

        let field = |idx: usize| fields.get(idx).map(str::trim).unwrap_or_default();

        fn int<T: std::str::FromStr>(raw: &str, name: &str, line_no: usize) -> Result<T, EpwError> {
            raw.parse::<T>()
                .map_err(|_| EpwError::format(line_no, format!("invalid {name}: {raw:?}")))
        }

        let year: i32 = int(field(0), "year", line_no)?;
        let month: u8 = int(field(1), "month", line_no)?;
        let day: u8 = int(field(2), "day", line_no)?;
        let hour: u8 = int(field(3), "hour", line_no)?;
        let minute: u8 = int(field(4), "minute", line_no)?;

        if !(1..=12).contains(&month) {
            return Err(EpwError::format(line_no, format!("month {month} outside 1..=12")));
        }
        if !(1..=31).contains(&day) {
            return Err(EpwError::format(line_no, format!("day {day} outside 1..=31")));
        }
        if !(1..=24).contains(&hour) {
            return Err(EpwError::format(line_no, format!("hour {hour} outside 1..=24")));
        }
        if minute > 60 {
            return Err(EpwError::format(line_no, format!("minute {minute} outside 0..=60")));
        }

        let mut values = [0.0; NUMERIC_FIELDS];
        for f in EpwField::ALL {
            let raw = field(f.column());
            values[f.slot()] = raw.parse::<f64>().map_err(|_| {
                EpwError::format(line_no, format!("invalid {f:?} value: {raw:?}"))
            })?;
        }

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            data_flags: field(5).to_string(),
            present_weather_codes: field(PRESENT_WEATHER_CODES_COLUMN).to_string(),
            values,
        })
    }

    /// Renders the record as its 35 text fields, in file order.
    pub(crate) fn to_fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(RECORD_FIELDS);
        out.push(self.year.to_string());
        out.push(self.month.to_string());
        out.push(self.day.to_string());
        out.push(self.hour.to_string());
        out.push(self.minute.to_string());
        out.push(self.data_flags.clone());
        for f in EpwField::ALL {
            if f.column() == PRESENT_WEATHER_CODES_COLUMN + 1 {
                out.push(self.present_weather_codes.clone());
            }
            out.push(format_number(self.get(f)));
        }
        out
    }

    /// Returns the value of a numeric field.
    pub fn get(&self, field: EpwField) -> f64 {
        self.values[field.slot()]
    }

    /// Overwrites the value of a numeric field.
    pub fn set(&mut self, field: EpwField, value: f64) {
        self.values[field.slot()] = value;
    }

    /// Returns `true` when the field holds EPW's missing-value sentinel.
    pub fn is_missing(&self, field: EpwField) -> bool {
        field
            .missing_value()
            .is_some_and(|sentinel| self.get(field) >= sentinel)
    }

    /// Dry bulb temperature (°C).
    pub fn dry_bulb(&self) -> f64 {
        self.get(EpwField::DryBulb)
    }

    /// Dew point temperature (°C).
    pub fn dew_point(&self) -> f64 {
        self.get(EpwField::DewPoint)
    }

    /// Relative humidity (%).
    pub fn relative_humidity(&self) -> f64 {
        self.get(EpwField::RelativeHumidity)
    }

    /// Wind speed (m/s).
    pub fn wind_speed(&self) -> f64 {
        self.get(EpwField::WindSpeed)
    }
}
