//! Person input data and batch loading

mod data;
pub mod loader;

pub use data::{BirthInfo, Gender, UnknownGender};
pub use loader::{load_people, load_people_from_reader};
