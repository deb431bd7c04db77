//! Demographic reference figures: default life expectancy, median age, and override ranges

mod life_table;

pub use life_table::{
    DemographicDefaults, DEFAULT_LIFE_EXPECTANCY_FEMALE, DEFAULT_LIFE_EXPECTANCY_MALE,
    DEFAULT_POPULATION_MEDIAN_AGE, LIFE_EXPECTANCY_RANGE, MAX_HUMAN_AGE,
    POPULATION_MEDIAN_AGE_RANGE,
};
