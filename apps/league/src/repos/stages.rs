//! Stage repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::stages_sea as stages_adapter;
use crate::entities::stages;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub id: i64,
    pub competition_id: i64,
    pub name: String,
    pub sequence: i16,
}

pub async fn create_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: i64,
    name: &str,
    sequence: i16,
) -> Result<Stage, DomainError> {
    let dto = stages_adapter::StageCreate::new(competition_id, name, sequence);
    let stage = stages_adapter::create_stage(conn, dto).await?;
    Ok(Stage::from(stage))
}

pub async fn require_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
) -> Result<Stage, DomainError> {
    stages_adapter::find_by_id(conn, stage_id)
        .await?
        .map(Stage::from)
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Stage, format!("Stage {stage_id} not found"))
        })
}

pub async fn find_ids_for_competition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(stages_adapter::find_ids_for_competition(conn, competition_id).await?)
}

impl From<stages::Model> for Stage {
    fn from(model: stages::Model) -> Self {
        Self {
            id: model.id,
            competition_id: model.competition_id,
            name: model.name,
            sequence: model.sequence,
        }
    }
}
