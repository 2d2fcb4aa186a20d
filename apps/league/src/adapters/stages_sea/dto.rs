//! DTOs for stages_sea adapter.

#[derive(Debug, Clone)]
pub struct StageCreate {
    pub competition_id: i64,
    pub name: String,
    pub sequence: i16,
}

impl StageCreate {
    pub fn new(competition_id: i64, name: impl Into<String>, sequence: i16) -> Self {
        Self {
            competition_id,
            name: name.into(),
            sequence,
        }
    }
}
