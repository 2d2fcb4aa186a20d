//! Handicap reference-table repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::handicaps_sea as handicaps_adapter;
use crate::domain::{HandicapRow, HandicapTable};
use crate::entities::{handicaps, BowStyle};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handicap {
    pub bow_style: BowStyle,
    pub number: i16,
    pub match_allowance: i32,
}

impl From<Handicap> for HandicapRow {
    fn from(h: Handicap) -> Self {
        HandicapRow {
            number: h.number,
            match_allowance: h.match_allowance,
        }
    }
}

pub async fn find_handicap<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bow_style: BowStyle,
    number: i16,
) -> Result<Handicap, DomainError> {
    handicaps_adapter::find_one(conn, bow_style, number)
        .await?
        .map(Handicap::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Handicap,
                format!("No {bow_style:?} handicap numbered {number}"),
            )
        })
}

/// Load every row for a bow style into a lookup table.
pub async fn load_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bow_style: BowStyle,
) -> Result<HandicapTable, DomainError> {
    let rows = handicaps_adapter::find_all_by_bow_style(conn, bow_style).await?;
    Ok(HandicapTable::new(
        bow_style,
        rows.into_iter().map(|m| HandicapRow::from(Handicap::from(m))),
    ))
}

/// Seed or refresh reference rows for one bow style.
pub async fn upsert_rows<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bow_style: BowStyle,
    rows: &[HandicapRow],
) -> Result<u64, DomainError> {
    let dtos = rows
        .iter()
        .map(|row| handicaps_adapter::HandicapUpsert {
            bow_style,
            number: row.number,
            match_allowance: row.match_allowance,
        })
        .collect();
    Ok(handicaps_adapter::upsert_rows(conn, dtos).await?)
}

impl From<handicaps::Model> for Handicap {
    fn from(model: handicaps::Model) -> Self {
        Self {
            bow_style: model.bow_style,
            number: model.number,
            match_allowance: model.match_allowance,
        }
    }
}
