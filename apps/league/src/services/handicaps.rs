//! Handicap reference data access.

use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::domain::{self, HandicapRow, HandicapTable};
use crate::entities::BowStyle;
use crate::errors::domain::DomainError;
use crate::repos::handicaps::{self, Handicap};

#[derive(Debug, Default, Clone, Copy)]
pub struct HandicapService;

impl HandicapService {
    pub fn new() -> Self {
        Self
    }

    /// Load the full table for a bow style.
    pub async fn table_for<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bow_style: BowStyle,
    ) -> Result<HandicapTable, DomainError> {
        let table = handicaps::load_table(conn, bow_style).await?;
        debug!(?bow_style, rows = table.rows().len(), "Loaded handicap table");
        Ok(table)
    }

    pub async fn find_handicap<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bow_style: BowStyle,
        number: i16,
    ) -> Result<Handicap, DomainError> {
        handicaps::find_handicap(conn, bow_style, number).await
    }

    /// Handicap an entry on `current` moves to after shooting `match_points`.
    pub fn recalculate_handicap(
        &self,
        table: &HandicapTable,
        current: i16,
        match_points: i32,
    ) -> Result<i16, DomainError> {
        domain::recalculate(table, current, match_points)
    }

    /// Seed or refresh the reference rows for a bow style.
    pub async fn seed<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        bow_style: BowStyle,
        rows: &[HandicapRow],
    ) -> Result<u64, DomainError> {
        handicaps::upsert_rows(conn, bow_style, rows).await
    }
}
