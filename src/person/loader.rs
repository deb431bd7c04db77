//! Load batches of people from CSV
//!
//! Expected columns: `id,birth,gender,life_expectancy,median_pop_age`.
//! `birth` uses the share-link `YYYYMMDD` format; the two override columns
//! may be left empty.

use super::{BirthInfo, Gender};
use crate::share::birth_string_to_date;
use csv::{Reader, Trim};
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching the batch input columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: String,
    birth: String,
    gender: String,
    #[serde(default)]
    life_expectancy: Option<f64>,
    #[serde(default)]
    median_pop_age: Option<f64>,
}

impl CsvRow {
    fn to_birth_info(self) -> Result<(String, BirthInfo), Box<dyn Error>> {
        let birth_date = birth_string_to_date(&self.birth)
            .ok_or_else(|| format!("Invalid birth date for {}: {}", self.id, self.birth))?;

        let gender: Gender = self.gender.parse()?;

        let info = BirthInfo {
            birth_date,
            gender,
            life_expectancy: self.life_expectancy,
            population_median_age: self.median_pop_age,
        };

        Ok((self.id, info))
    }
}

/// Load all people from a CSV file
pub fn load_people<P: AsRef<Path>>(path: P) -> Result<Vec<(String, BirthInfo)>, Box<dyn Error>> {
    let file = std::fs::File::open(path)?;
    load_people_from_reader(file)
}

/// Load people from any reader (e.g., string buffer, stdin)
pub fn load_people_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<(String, BirthInfo)>, Box<dyn Error>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    read_rows(&mut csv_reader)
}

fn read_rows<R: std::io::Read>(
    csv_reader: &mut Reader<R>,
) -> Result<Vec<(String, BirthInfo)>, Box<dyn Error>> {
    let mut people = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        people.push(row.to_birth_info()?);
    }

    log::debug!("Loaded {} people from CSV", people.len());
    Ok(people)
}
