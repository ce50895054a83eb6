use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use popio::{Client, DEFAULT_BASE_URL, DiabetesStatus, PopulationMode, Sex};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "popio",
    version,
    about = "Query world population statistics from population.io"
)]
struct Cli {
    /// Base URL of the population.io API.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the countries the service accepts.
    Countries,
    /// World population rank of a person.
    Rank(RankArgs),
    /// Life expectancy.
    Life(LifeArgs),
    /// Population counts for a country.
    Population(PopulationArgs),
    /// Mortality distribution.
    Mortality(MortalityArgs),
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    dob: NaiveDate,
    /// male, female or unisex
    #[arg(long)]
    sex: Sex,
    /// Country name as listed by `popio countries`
    #[arg(long)]
    country: String,
    #[command(subcommand)]
    query: RankQuery,
}

#[derive(Subcommand, Debug)]
enum RankQuery {
    /// Rank as of today.
    Today,
    /// Rank on a date.
    On { date: NaiveDate },
    /// Rank at an age (e.g. 30 or 30y6m).
    Aged { age: String },
    /// Rank some time ago (e.g. 2y).
    Ago { offset: String },
    /// Rank some time from now (e.g. 1y6m).
    In { offset: String },
    /// Date on which a rank is reached.
    Ranked { rank: u64 },
}

#[derive(Args, Debug)]
struct LifeArgs {
    #[arg(long)]
    sex: Sex,
    #[arg(long)]
    country: String,
    #[command(subcommand)]
    query: LifeQuery,
}

#[derive(Subcommand, Debug)]
enum LifeQuery {
    /// Remaining life expectancy at an age on a date.
    Remaining {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        age: String,
    },
    /// Total life expectancy from a date of birth.
    Total {
        #[arg(long)]
        dob: NaiveDate,
    },
    /// Diabetes-adjusted total life expectancy.
    Diabetes {
        #[arg(long)]
        age: String,
        /// yes, no or unknown (default yes)
        #[arg(long)]
        status: Option<DiabetesStatus>,
    },
}

#[derive(Args, Debug)]
struct PopulationArgs {
    #[arg(long)]
    country: String,
    #[command(subcommand)]
    query: PopulationQuery,
}

#[derive(Subcommand, Debug)]
enum PopulationQuery {
    /// People of an age in a year.
    Aged {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        age: u32,
        /// 1 = total, 2 = male, 3 = female
        #[arg(long, default_value = "1")]
        mode: PopulationMode,
    },
    /// Total population on a date.
    On { date: NaiveDate },
    /// Total population today.
    Today,
    /// Total population tomorrow.
    Tomorrow,
}

#[derive(Args, Debug)]
struct MortalityArgs {
    #[arg(long)]
    sex: Sex,
    #[arg(long)]
    country: String,
    #[arg(long)]
    age: u32,
    #[command(subcommand)]
    query: MortalityQuery,
}

#[derive(Subcommand, Debug)]
enum MortalityQuery {
    /// Distribution as of today.
    ByAge,
    /// Diabetes-adjusted distribution.
    Diabetes {
        /// yes, no or unknown (default unknown)
        #[arg(long)]
        status: Option<DiabetesStatus>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// Only the error's own message goes to stderr, so a service error prints its
// `detail` text verbatim.
fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let client = Client::with_base_url(cli.base_url);
    match cli.cmd {
        Command::Countries => print_json(&client.countries()?),
        Command::Rank(args) => cmd_rank(&client, args),
        Command::Life(args) => cmd_life(&client, args),
        Command::Population(args) => cmd_population(&client, args),
        Command::Mortality(args) => cmd_mortality(&client, args),
    }
}

fn cmd_rank(client: &Client, args: RankArgs) -> Result<()> {
    let r = client.wp_rank(args.dob, args.sex, &args.country);
    match args.query {
        RankQuery::Today => println!("{}", r.today()?),
        RankQuery::On { date } => println!("{}", r.on(date)?),
        RankQuery::Aged { age } => println!("{}", r.aged(age)?),
        RankQuery::Ago { offset } => println!("{}", r.ago(offset)?),
        RankQuery::In { offset } => println!("{}", r.ahead(offset)?),
        RankQuery::Ranked { rank } => println!("{}", r.ranked(rank)?),
    }
    Ok(())
}

fn cmd_life(client: &Client, args: LifeArgs) -> Result<()> {
    let life = client.life_expectancy(args.sex, &args.country);
    let years = match args.query {
        LifeQuery::Remaining { date, age } => life.remaining(date, age)?,
        LifeQuery::Total { dob } => life.total(dob)?,
        LifeQuery::Diabetes { age, status } => life.diabetes(age, status)?,
    };
    println!("{}", years);
    Ok(())
}

fn cmd_population(client: &Client, args: PopulationArgs) -> Result<()> {
    let pop = client.population(&args.country);
    let count = match args.query {
        PopulationQuery::Aged { year, age, mode } => pop.population(year, age, mode)?,
        PopulationQuery::On { date } => pop.by_date(date)?,
        PopulationQuery::Today => pop.today()?,
        PopulationQuery::Tomorrow => pop.tomorrow()?,
    };
    println!("{}", count);
    Ok(())
}

fn cmd_mortality(client: &Client, args: MortalityArgs) -> Result<()> {
    let m = client.mortality_distribution(args.sex, &args.country, args.age);
    let dist = match args.query {
        MortalityQuery::ByAge => m.by_age()?,
        MortalityQuery::Diabetes { status } => m.diabetes(status)?,
    };
    print_json(&dist)
}
