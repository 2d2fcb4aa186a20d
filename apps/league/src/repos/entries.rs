//! Entry repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::entries_sea as entries_adapter;
use crate::entities::{entries, BowStyle};
use crate::errors::domain::{DomainError, NotFoundKind};

/// A competitor enrolled in a competition.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: i64,
    pub competition_id: i64,
    pub name: String,
    pub bow_style: BowStyle,
    pub initial_handicap: i16,
    pub current_handicap: i16,
    pub lock_version: i32,
}

#[derive(Debug, Clone)]
pub struct EntryData {
    pub competition_id: i64,
    pub name: String,
    pub bow_style: BowStyle,
    pub handicap: i16,
}

pub async fn create_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    data: EntryData,
) -> Result<Entry, DomainError> {
    let dto = entries_adapter::EntryCreate::new(data.competition_id, data.name)
        .with_bow_style(data.bow_style)
        .with_handicap(data.handicap);
    let entry = entries_adapter::create_entry(conn, dto).await?;
    Ok(Entry::from(entry))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entry_id: i64,
) -> Result<Option<Entry>, DomainError> {
    let entry = entries_adapter::find_by_id(conn, entry_id).await?;
    Ok(entry.map(Entry::from))
}

pub async fn require_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entry_id: i64,
) -> Result<Entry, DomainError> {
    find_by_id(conn, entry_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Entry, format!("Entry {entry_id} not found"))
    })
}

pub async fn find_all_by_competition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: i64,
) -> Result<Vec<Entry>, DomainError> {
    let entries = entries_adapter::find_all_by_competition(conn, competition_id).await?;
    Ok(entries.into_iter().map(Entry::from).collect())
}

/// Store a new current handicap, guarded by the entry's lock version.
pub async fn update_current_handicap<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entry_id: i64,
    current_handicap: i16,
    expected_version: i32,
) -> Result<Entry, DomainError> {
    let dto = entries_adapter::EntryHandicapUpdate {
        id: entry_id,
        current_handicap,
        expected_version,
    };
    let entry = entries_adapter::update_current_handicap(conn, dto).await?;
    Ok(Entry::from(entry))
}

impl From<entries::Model> for Entry {
    fn from(model: entries::Model) -> Self {
        Self {
            id: model.id,
            competition_id: model.competition_id,
            name: model.name,
            bow_style: model.bow_style,
            initial_handicap: model.initial_handicap,
            current_handicap: model.current_handicap,
            lock_version: model.lock_version,
        }
    }
}
