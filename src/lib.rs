//! popio
//!
//! A small blocking Rust client for the population.io world population API.
//! Pairs with the `popio` CLI.
//!
//! ### Features
//! - List the countries the service knows about
//! - World population rank by date, age, offset, or the day a rank is reached
//! - Remaining, total and diabetes-adjusted life expectancy
//! - Population tables by age and year, by date, today and tomorrow
//! - Mortality distributions, with or without diabetes adjustment
//!
//! Every call sends one GET and returns one field of the JSON answer. Failures
//! come back as [`ApiError`]; the CLI turns them into a non-zero exit.
//!
//! ### Example
//! ```no_run
//! use popio::{Client, PopulationMode, Sex};
//!
//! let client = Client::default();
//! let males = client
//!     .population("Germany")
//!     .population(2020, 30, PopulationMode::try_from(2)?)?;
//! let years = client
//!     .life_expectancy(Sex::Female, "United Kingdom")
//!     .total("1990-05-17".parse()?)?;
//! println!("{males} men aged 30, {years:.1} years expected");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod endpoints;
pub mod error;
pub mod models;

pub use api::{Client, DEFAULT_BASE_URL, escape_spaces};
pub use endpoints::{CountryList, LifeExpectancy, MortalityDistribution, Population, WpRank};
pub use error::{ApiError, ParseParamError};
pub use models::{DiabetesStatus, MortalityBucket, PopulationMode, Sex};
