//! One type per population.io resource.
//!
//! Each type captures its configuration at construction (country already
//! space-escaped) and never mutates it. Every operation builds one URL, sends
//! one request through [`Client::get_json`] and returns one field of the
//! response.

use crate::api::{Client, Result, escape_spaces, extract};
use crate::error::ApiError;
use crate::models::{DiabetesStatus, MortalityBucket, PopulationMode, Sex};
use chrono::NaiveDate;
use serde_json::Value;
use std::fmt::Display;

/// Countries the service accepts as input.
#[derive(Debug, Clone, Default)]
pub struct CountryList {
    client: Client,
}

impl CountryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// All valid country names (`countries`).
    pub fn get(&self) -> Result<Vec<String>> {
        let url = self.client.url("/countries");
        self.client.fetch_field(&url, "/countries")
    }
}

/// World population rank of a person with a fixed date of birth, sex and
/// country.
///
/// The rank is the position of someone's birthday among living people of the
/// same sex and country, ordered by date of birth decreasing; the last person
/// born has rank 1. "Today" is always the current UTC date on the server.
#[derive(Debug, Clone)]
pub struct WpRank {
    client: Client,
    dob: NaiveDate,
    sex: Sex,
    country: String,
    url: String,
}

impl WpRank {
    pub fn new(dob: NaiveDate, sex: Sex, country: &str) -> Self {
        Self::with_client(Client::default(), dob, sex, country)
    }

    pub fn with_client(client: Client, dob: NaiveDate, sex: Sex, country: &str) -> Self {
        let country = escape_spaces(country);
        let url = client.url(&format!("/wp-rank/{}/{}/{}/", dob, sex, country));
        Self {
            client,
            dob,
            sex,
            country,
            url,
        }
    }

    pub fn dob(&self) -> NaiveDate {
        self.dob
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    /// Escaped country as used in the URL.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// URL prefix shared by all rank queries of this instance.
    pub fn base_url(&self) -> &str {
        &self.url
    }

    fn rank_at(&self, suffix: &str) -> Result<u64> {
        let url = format!("{}{}", self.url, suffix);
        self.client.fetch_field(&url, "/rank")
    }

    /// Rank as of today.
    pub fn today(&self) -> Result<u64> {
        self.rank_at("today")
    }

    /// Rank on `date`.
    pub fn on(&self, date: NaiveDate) -> Result<u64> {
        self.rank_at(&format!("on/{}", date))
    }

    /// Rank on the day the person reaches `age` (e.g. `30` or `"30y6m"`).
    pub fn aged(&self, age: impl Display) -> Result<u64> {
        self.rank_at(&format!("aged/{}", age))
    }

    /// Rank `offset` in the past (e.g. `"2y"`).
    pub fn ago(&self, offset: impl Display) -> Result<u64> {
        self.rank_at(&format!("ago/{}", offset))
    }

    /// Rank `offset` in the future (the service's `in/` query).
    pub fn ahead(&self, offset: impl Display) -> Result<u64> {
        self.rank_at(&format!("in/{}", offset))
    }

    /// Day on which the person reached (or will reach) `rank`. Very small or
    /// very large ranks are often rejected by the service.
    pub fn ranked(&self, rank: u64) -> Result<NaiveDate> {
        let url = format!("{}ranked/{}", self.url, rank);
        self.client.fetch_field(&url, "/date_on_rank")
    }
}

/// Life expectancy for a fixed sex and country.
#[derive(Debug, Clone)]
pub struct LifeExpectancy {
    client: Client,
    sex: Sex,
    country: String,
    url: String,
}

impl LifeExpectancy {
    pub fn new(sex: Sex, country: &str) -> Self {
        Self::with_client(Client::default(), sex, country)
    }

    pub fn with_client(client: Client, sex: Sex, country: &str) -> Self {
        let url = client.url("/life-expectancy/");
        Self {
            client,
            sex,
            country: escape_spaces(country),
            url,
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Remaining years for someone aged `age` on `date`.
    pub fn remaining(&self, date: NaiveDate, age: impl Display) -> Result<f64> {
        let url = format!(
            "{}remaining/{}/{}/{}/{}",
            self.url, self.sex, self.country, date, age
        );
        self.client.fetch_field(&url, "/remaining_life_expectancy")
    }

    /// Total life expectancy for someone born on `dob`.
    ///
    /// The service derives this from the remaining life expectancy at age 35,
    /// so it is of limited accuracy.
    pub fn total(&self, dob: NaiveDate) -> Result<f64> {
        let url = format!("{}total/{}/{}/{}/", self.url, self.sex, self.country, dob);
        self.client.fetch_field(&url, "/total_life_expectancy")
    }

    /// Total life expectancy at `age`, adjusted for diabetes.
    /// `status` defaults to [`DiabetesStatus::Yes`].
    pub fn diabetes(&self, age: impl Display, status: Option<DiabetesStatus>) -> Result<f64> {
        let status = status.unwrap_or(DiabetesStatus::Yes);
        let url = format!(
            "{}diabetes/{}/{}/{}/{}/",
            self.url, self.sex, self.country, age, status
        );
        self.client.fetch_field(&url, "/total_life_expectancy")
    }
}

/// Population tables for one country.
#[derive(Debug, Clone)]
pub struct Population {
    client: Client,
    country: String,
    url: String,
}

impl Population {
    pub fn new(country: &str) -> Self {
        Self::with_client(Client::default(), country)
    }

    pub fn with_client(client: Client, country: &str) -> Self {
        let url = client.url("/population/");
        Self {
            client,
            country: escape_spaces(country),
            url,
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Number of people of `age` in `year`, counted per `mode`.
    ///
    /// The service answers with one record per country; the record whose
    /// `country` equals this instance's (escaped) country is used.
    pub fn population(&self, year: i32, age: u32, mode: PopulationMode) -> Result<u64> {
        let url = format!("{}{}/aged/{}/", self.url, year, age);
        let table = self.client.get_json(&url)?;
        let record = find_country(table, &self.country).ok_or_else(|| ApiError::CountryNotFound {
            url: url.clone(),
            country: self.country.clone(),
        })?;
        extract(record, &format!("/{}", mode.field()), &url)
    }

    /// Total population on `date` (the service covers 2013-01-01 to 2022-12-31).
    pub fn by_date(&self, date: NaiveDate) -> Result<u64> {
        let url = format!("{}{}/{}/", self.url, self.country, date);
        self.client
            .fetch_field(&url, "/total_population/population")
    }

    /// Total population today.
    pub fn today(&self) -> Result<u64> {
        self.today_and_tomorrow(0)
    }

    /// Total population tomorrow.
    pub fn tomorrow(&self) -> Result<u64> {
        self.today_and_tomorrow(1)
    }

    fn today_and_tomorrow(&self, index: usize) -> Result<u64> {
        let url = format!("{}{}/today-and-tomorrow", self.url, self.country);
        self.client
            .fetch_field(&url, &format!("/total_population/{}/population", index))
    }
}

/// Linear scan over per-country records.
fn find_country(table: Value, country: &str) -> Option<Value> {
    match table {
        Value::Array(records) => records
            .into_iter()
            .find(|r| r.get("country").and_then(Value::as_str) == Some(country)),
        _ => None,
    }
}

/// Mortality distribution for a fixed sex, country and age.
#[derive(Debug, Clone)]
pub struct MortalityDistribution {
    client: Client,
    sex: Sex,
    country: String,
    age: u32,
    url: String,
}

impl MortalityDistribution {
    pub fn new(sex: Sex, country: &str, age: u32) -> Self {
        Self::with_client(Client::default(), sex, country, age)
    }

    pub fn with_client(client: Client, sex: Sex, country: &str, age: u32) -> Self {
        let url = client.url("/mortality-distribution/");
        Self {
            client,
            sex,
            country: escape_spaces(country),
            age,
            url,
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Distribution of the age of death, as of today.
    pub fn by_age(&self) -> Result<Vec<MortalityBucket>> {
        let url = format!(
            "{}{}/{}/{}/today/",
            self.url, self.country, self.sex, self.age
        );
        self.client.fetch_field(&url, "/mortality_distribution")
    }

    /// Diabetes-adjusted distribution. `status` defaults to
    /// [`DiabetesStatus::Unknown`].
    pub fn diabetes(&self, status: Option<DiabetesStatus>) -> Result<Vec<MortalityBucket>> {
        let status = status.unwrap_or(DiabetesStatus::Unknown);
        let url = format!(
            "{}diabetes/{}/{}/{}/{}/",
            self.url, status, self.country, self.sex, self.age
        );
        self.client.fetch_field(&url, "/mortality_distribution")
    }
}

impl Client {
    pub fn countries(&self) -> Result<Vec<String>> {
        CountryList::with_client(self.clone()).get()
    }

    pub fn wp_rank(&self, dob: NaiveDate, sex: Sex, country: &str) -> WpRank {
        WpRank::with_client(self.clone(), dob, sex, country)
    }

    pub fn life_expectancy(&self, sex: Sex, country: &str) -> LifeExpectancy {
        LifeExpectancy::with_client(self.clone(), sex, country)
    }

    pub fn population(&self, country: &str) -> Population {
        Population::with_client(self.clone(), country)
    }

    pub fn mortality_distribution(
        &self,
        sex: Sex,
        country: &str,
        age: u32,
    ) -> MortalityDistribution {
        MortalityDistribution::with_client(self.clone(), sex, country, age)
    }
}
