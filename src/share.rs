//! Share-link query parameters
//!
//! Format: `?birth=YYYYMMDD&gender=male|female&life-expectancy=N&median-pop-age=N`.
//! Older links carry `median-age`, which meant life expectancy at the time
//! and is still read as such.
//!
//! Keys and values are percent-decoded (`%XX` and `+`); links built here
//! never need escaping.
//!
//! Parsing never fails loudly: any malformed link yields `None` and the
//! caller falls back to asking for input.

use crate::person::{BirthInfo, Gender};
use crate::validation::is_valid_birth_date;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const PARAM_BIRTH: &str = "birth";
pub const PARAM_GENDER: &str = "gender";
pub const PARAM_LIFE_EXPECTANCY: &str = "life-expectancy";
pub const PARAM_MEDIAN_POP_AGE: &str = "median-pop-age";
/// Legacy name for [`PARAM_LIFE_EXPECTANCY`]
pub const PARAM_LEGACY_MEDIAN_AGE: &str = "median-age";

/// Largest numeric value a share link may carry (years)
pub const MAX_SHARED_YEARS: f64 = 150.0;

/// Parameters carried by a share link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareParams {
    /// Birth date as `YYYYMMDD`
    pub birth: String,
    pub gender: Gender,
    pub life_expectancy: Option<f64>,
    pub population_median_age: Option<f64>,
}

impl ShareParams {
    pub fn from_birth_info(info: &BirthInfo) -> Self {
        Self {
            birth: date_to_birth_string(info.birth_date),
            gender: info.gender,
            life_expectancy: info.life_expectancy,
            population_median_age: info.population_median_age,
        }
    }

    /// Convert back into calculation input; `None` if `birth` is not a real date
    pub fn to_birth_info(&self) -> Option<BirthInfo> {
        Some(BirthInfo {
            birth_date: birth_string_to_date(&self.birth)?,
            gender: self.gender,
            life_expectancy: self.life_expectancy,
            population_median_age: self.population_median_age,
        })
    }
}

/// Parse `YYYYMMDD` into a date; `None` unless it is 8 digits naming a real day
pub fn birth_string_to_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[4..6].parse().ok()?;
    let day: u32 = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a date as `YYYYMMDD`
pub fn date_to_birth_string(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// Decode `+` and `%XX` escapes; `None` if an escape is malformed or the bytes are not UTF-8
fn decode_component(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = raw.get(i + 1..i + 3)?;
                if !hex.bytes().all(|h| h.is_ascii_hexdigit()) {
                    return None;
                }
                out.push(u8::from_str_radix(hex, 16).ok()?);
                i += 2;
            }
            b => out.push(b),
        }
        i += 1;
    }

    String::from_utf8(out).ok()
}

/// Split a query string (optionally a full URL or `?`-prefixed) into decoded key/value pairs
///
/// A component with a malformed escape is kept verbatim, so it fails the
/// value checks further on rather than silently disappearing.
fn query_pairs(input: &str) -> impl Iterator<Item = (String, String)> + '_ {
    let query = match input.split_once('?') {
        Some((_, q)) => q,
        None => input,
    };
    let query = query.split('#').next().unwrap_or("");

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (
                decode_component(key).unwrap_or_else(|| key.to_string()),
                decode_component(value).unwrap_or_else(|| value.to_string()),
            )
        })
}

fn parse_years(value: &str) -> Option<f64> {
    let years: f64 = value.trim().parse().ok()?;
    if years.is_finite() && years > 0.0 && years <= MAX_SHARED_YEARS {
        Some(years)
    } else {
        None
    }
}

/// Parse share parameters; `None` if anything required is missing or malformed
///
/// When a key repeats, its first occurrence wins.
pub fn parse_share_params(input: &str, now: DateTime<Utc>) -> Option<ShareParams> {
    let mut birth = None;
    let mut gender = None;
    let mut life_expectancy = None;
    let mut legacy_median_age = None;
    let mut median_pop_age = None;

    for (key, value) in query_pairs(input) {
        let slot = match key.as_str() {
            PARAM_BIRTH => &mut birth,
            PARAM_GENDER => &mut gender,
            PARAM_LIFE_EXPECTANCY => &mut life_expectancy,
            PARAM_LEGACY_MEDIAN_AGE => &mut legacy_median_age,
            PARAM_MEDIAN_POP_AGE => &mut median_pop_age,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    let (Some(birth), Some(gender)) = (birth, gender) else {
        log::debug!("Share link missing birth or gender");
        return None;
    };

    let gender = match gender.as_str() {
        "male" => Gender::Male,
        "female" => Gender::Female,
        other => {
            log::warn!("Share link has unknown gender: {}", other);
            return None;
        }
    };

    let Some(birth_date) = birth_string_to_date(&birth) else {
        log::warn!("Share link has malformed birth date: {}", birth);
        return None;
    };
    if !is_valid_birth_date(birth_date, now) {
        log::warn!("Share link birth date out of range: {}", birth_date);
        return None;
    }

    let life_expectancy = match life_expectancy.or(legacy_median_age) {
        Some(raw) => match parse_years(&raw) {
            Some(years) => Some(years),
            None => {
                log::warn!("Share link has invalid life expectancy: {}", raw);
                return None;
            }
        },
        None => None,
    };

    let population_median_age = match median_pop_age {
        Some(raw) => match parse_years(&raw) {
            Some(years) => Some(years),
            None => {
                log::warn!("Share link has invalid median population age: {}", raw);
                return None;
            }
        },
        None => None,
    };

    Some(ShareParams {
        birth,
        gender,
        life_expectancy,
        population_median_age,
    })
}

/// Encode share parameters as a query string without the leading `?`
pub fn build_share_query(params: &ShareParams) -> String {
    let mut query = format!(
        "{}={}&{}={}",
        PARAM_BIRTH,
        params.birth,
        PARAM_GENDER,
        params.gender.as_str()
    );
    if let Some(years) = params.life_expectancy {
        query.push_str(&format!("&{}={}", PARAM_LIFE_EXPECTANCY, years));
    }
    if let Some(years) = params.population_median_age {
        query.push_str(&format!("&{}={}", PARAM_MEDIAN_POP_AGE, years));
    }
    query
}

/// Attach share parameters to `base`, replacing any existing query or fragment
pub fn build_share_url(base: &str, params: &ShareParams) -> String {
    let base = base.split(|c| c == '?' || c == '#').next().unwrap_or(base);
    format!("{}?{}", base, build_share_query(params))
}
