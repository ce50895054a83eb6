//! Live API tests. Run with: `cargo test --features online -- --nocapture`
#![cfg(feature = "online")]

use popio::{Client, Sex};

#[test]
fn countries_are_listed() {
    let countries = Client::default().countries().unwrap();
    assert!(countries.iter().any(|c| c == "Germany"));
}

#[test]
fn rank_today_is_positive() {
    let dob = chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    let rank = Client::default()
        .wp_rank(dob, Sex::Unisex, "United Kingdom")
        .today()
        .unwrap();
    assert!(rank > 0);
}
