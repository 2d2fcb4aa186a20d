//! DTOs for competitions_sea adapter.

#[derive(Debug, Clone)]
pub struct CompetitionCreate {
    pub name: String,
}

impl CompetitionCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
