//! A migrated in-memory league with two stages, three rounds and a recurve
//! handicap table where allowance(n) = max(0, 8n - 80) for n in 0..=100.

use league::domain::HandicapRow;
use league::entities::{match_results, scores, BowStyle};
use league::repos::competitions::{self, Competition};
use league::repos::entries::{self, Entry, EntryData};
use league::repos::rounds::{self, Round, RoundData};
use league::repos::stages::{self, Stage};
use league::{bootstrap_db, DbOwner, DbProfile, EntryService, HandicapService};
use league_test_support::unique_name;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub const MAX_HANDICAP: i16 = 100;

pub fn allowance_for(number: i16) -> i32 {
    (8 * i32::from(number) - 80).max(0)
}

pub fn recurve_rows() -> Vec<HandicapRow> {
    (0..=MAX_HANDICAP)
        .map(|number| HandicapRow {
            number,
            match_allowance: allowance_for(number),
        })
        .collect()
}

pub struct League {
    pub conn: DatabaseConnection,
    pub competition: Competition,
    /// January and February rounds
    pub autumn: Stage,
    /// March round
    pub spring: Stage,
    pub january: Round,
    pub february: Round,
    pub march: Round,
}

pub async fn league() -> League {
    let conn = bootstrap_db(DbProfile::InMemory, DbOwner::App)
        .await
        .expect("bootstrap in-memory db");

    HandicapService::new()
        .seed(&conn, BowStyle::Recurve, &recurve_rows())
        .await
        .expect("seed handicaps");

    let competition = competitions::create_competition(&conn, &unique_name("league"))
        .await
        .expect("create competition");
    let autumn = stages::create_stage(&conn, competition.id, "Autumn", 1)
        .await
        .expect("create autumn stage");
    let spring = stages::create_stage(&conn, competition.id, "Spring", 2)
        .await
        .expect("create spring stage");

    let january = round(
        &conn,
        autumn.id,
        ("Round 1", 1),
        (date!(2025 - 01 - 01), date!(2025 - 01 - 31)),
    )
    .await;
    let february = round(
        &conn,
        autumn.id,
        ("Round 2", 2),
        (date!(2025 - 02 - 01), date!(2025 - 02 - 28)),
    )
    .await;
    let march = round(
        &conn,
        spring.id,
        ("Round 1", 1),
        (date!(2025 - 03 - 01), date!(2025 - 03 - 31)),
    )
    .await;

    League {
        conn,
        competition,
        autumn,
        spring,
        january,
        february,
        march,
    }
}

async fn round(
    conn: &DatabaseConnection,
    stage_id: i64,
    (name, sequence): (&str, i16),
    (starts_on, ends_on): (Date, Date),
) -> Round {
    rounds::create_round(
        conn,
        RoundData {
            stage_id,
            name: name.into(),
            starts_on,
            ends_on,
            sequence,
        },
    )
    .await
    .expect("create round")
}

impl League {
    /// Enrol a recurve archer on `handicap`.
    pub async fn entry(&self, name: &str, handicap: i16) -> Entry {
        entries::create_entry(
            &self.conn,
            EntryData {
                competition_id: self.competition.id,
                name: name.into(),
                bow_style: BowStyle::Recurve,
                handicap,
            },
        )
        .await
        .expect("create entry")
    }

    pub async fn reload(&self, entry: &Entry) -> Entry {
        EntryService::new()
            .find_entry(&self.conn, entry.id)
            .await
            .expect("reload entry")
    }

    /// Match rows of any state, tombstoned included.
    pub async fn match_rows(&self) -> u64 {
        match_results::Entity::find()
            .count(&self.conn)
            .await
            .expect("count match rows")
    }

    /// Score rows of any state, tombstoned included.
    pub async fn score_rows(&self) -> u64 {
        scores::Entity::find()
            .count(&self.conn)
            .await
            .expect("count score rows")
    }
}

pub fn jan(day: u8) -> OffsetDateTime {
    datetime!(2025-01-01 18:00 UTC)
        .replace_day(day)
        .expect("valid January day")
}

pub fn feb(day: u8) -> OffsetDateTime {
    datetime!(2025-02-01 18:00 UTC)
        .replace_day(day)
        .expect("valid February day")
}

pub fn mar(day: u8) -> OffsetDateTime {
    datetime!(2025-03-01 18:00 UTC)
        .replace_day(day)
        .expect("valid March day")
}
