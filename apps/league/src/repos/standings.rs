//! Standings repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::standings_sea as standings_adapter;
use crate::adapters::standings_sea::StandingUpsert;
use crate::entities::standings;
use crate::errors::domain::DomainError;

/// One entry's aggregated results within a stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Standing {
    pub stage_id: i64,
    pub entry_id: i64,
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub league_points: i32,
    pub bonus_points: i32,
    pub total_points: i32,
    pub match_points_adjusted: i64,
}

impl Standing {
    pub fn empty(stage_id: i64, entry_id: i64) -> Self {
        Self {
            stage_id,
            entry_id,
            ..Self::default()
        }
    }
}

pub async fn save<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    standing: &Standing,
) -> Result<Standing, DomainError> {
    let dto = StandingUpsert {
        stage_id: standing.stage_id,
        entry_id: standing.entry_id,
        played: standing.played,
        won: standing.won,
        drawn: standing.drawn,
        lost: standing.lost,
        league_points: standing.league_points,
        bonus_points: standing.bonus_points,
        match_points_adjusted: standing.match_points_adjusted,
    };
    let model = standings_adapter::upsert_standing(conn, dto).await?;
    Ok(Standing::from(model))
}

pub async fn find_one<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
    entry_id: i64,
) -> Result<Option<Standing>, DomainError> {
    let model = standings_adapter::find_one(conn, stage_id, entry_id).await?;
    Ok(model.map(Standing::from))
}

/// Stage table, best first.
pub async fn find_all_by_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stage_id: i64,
) -> Result<Vec<Standing>, DomainError> {
    let models = standings_adapter::find_all_by_stage(conn, stage_id).await?;
    Ok(models.into_iter().map(Standing::from).collect())
}

impl From<standings::Model> for Standing {
    fn from(model: standings::Model) -> Self {
        Self {
            stage_id: model.stage_id,
            entry_id: model.entry_id,
            played: model.played,
            won: model.won,
            drawn: model.drawn,
            lost: model.lost,
            league_points: model.league_points,
            bonus_points: model.bonus_points,
            total_points: model.total_points,
            match_points_adjusted: model.match_points_adjusted,
        }
    }
}
