//! DTOs for entries_sea adapter.

use crate::entities::BowStyle;

/// DTO for enrolling an entry; `handicap` seeds both the initial and current handicap.
#[derive(Debug, Clone)]
pub struct EntryCreate {
    pub competition_id: i64,
    pub name: String,
    pub bow_style: BowStyle,
    pub handicap: i16,
}

impl EntryCreate {
    pub fn new(competition_id: i64, name: impl Into<String>) -> Self {
        Self {
            competition_id,
            name: name.into(),
            bow_style: BowStyle::Recurve,
            handicap: 0,
        }
    }

    pub fn with_bow_style(mut self, bow_style: BowStyle) -> Self {
        self.bow_style = bow_style;
        self
    }

    pub fn with_handicap(mut self, handicap: i16) -> Self {
        self.handicap = handicap;
        self
    }
}

/// Optimistic handicap write; `expected_version` must match the stored lock version.
#[derive(Debug, Clone)]
pub struct EntryHandicapUpdate {
    pub id: i64,
    pub current_handicap: i16,
    pub expected_version: i32,
}
