//! Round repository functions.

use std::ops::RangeInclusive;

use sea_orm::ConnectionTrait;
use time::Date;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::entities::rounds;
use crate::errors::domain::{DomainError, NotFoundKind};

/// A dated window within a stage in which matches are shot.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub id: i64,
    pub stage_id: i64,
    pub name: String,
    pub starts_on: Date,
    pub ends_on: Date,
    pub sequence: i16,
}

impl Round {
    /// Inclusive date range covered by the round.
    pub fn period(&self) -> RangeInclusive<Date> {
        self.starts_on..=self.ends_on
    }

    pub fn covers(&self, on: Date) -> bool {
        self.period().contains(&on)
    }
}

#[derive(Debug, Clone)]
pub struct RoundData {
    pub stage_id: i64,
    pub name: String,
    pub starts_on: Date,
    pub ends_on: Date,
    pub sequence: i16,
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    data: RoundData,
) -> Result<Round, DomainError> {
    if data.ends_on < data.starts_on {
        return Err(DomainError::validation_other(format!(
            "Round '{}' ends before it starts",
            data.name
        )));
    }
    let dto = rounds_adapter::RoundCreate {
        stage_id: data.stage_id,
        name: data.name,
        starts_on: data.starts_on,
        ends_on: data.ends_on,
        sequence: data.sequence,
    };
    let round = rounds_adapter::create_round(conn, dto).await?;
    Ok(Round::from(round))
}

pub async fn require_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Round, DomainError> {
    rounds_adapter::find_by_id(conn, round_id)
        .await?
        .map(Round::from)
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
        })
}

/// Stage a round belongs to; a match's stage is its round's stage.
pub async fn stage_id_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<i64, DomainError> {
    rounds_adapter::find_stage_id(conn, round_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
        })
}

/// The round of `stage_id` whose window contains `on`.
pub async fn find_round_covering<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
    on: Date,
) -> Result<Round, DomainError> {
    rounds_adapter::find_covering(conn, stage_id, on)
        .await?
        .map(Round::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Round,
                format!("No round covers {on} in stage {stage_id}"),
            )
        })
}

pub async fn find_all_by_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
) -> Result<Vec<Round>, DomainError> {
    let rounds = rounds_adapter::find_all_by_stage(conn, stage_id).await?;
    Ok(rounds.into_iter().map(Round::from).collect())
}

pub async fn find_ids_for_stages<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_ids: &[i64],
) -> Result<Vec<i64>, DomainError> {
    Ok(rounds_adapter::find_ids_for_stages(conn, stage_ids).await?)
}

impl From<rounds::Model> for Round {
    fn from(model: rounds::Model) -> Self {
        Self {
            id: model.id,
            stage_id: model.stage_id,
            name: model.name,
            starts_on: model.starts_on,
            ends_on: model.ends_on,
            sequence: model.sequence,
        }
    }
}
