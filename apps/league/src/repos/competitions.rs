//! Competition repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::competitions_sea as competitions_adapter;
use crate::entities::competitions;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Competition {
    pub id: i64,
    pub name: String,
}

pub async fn create_competition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Competition, DomainError> {
    let dto = competitions_adapter::CompetitionCreate::new(name);
    let competition = competitions_adapter::create_competition(conn, dto).await?;
    Ok(Competition::from(competition))
}

pub async fn require_competition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: i64,
) -> Result<Competition, DomainError> {
    competitions_adapter::find_by_id(conn, competition_id)
        .await?
        .map(Competition::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Competition,
                format!("Competition {competition_id} not found"),
            )
        })
}

impl From<competitions::Model> for Competition {
    fn from(model: competitions::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
