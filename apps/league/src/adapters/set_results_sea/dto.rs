//! DTOs for set_results_sea adapter.

#[derive(Debug, Clone)]
pub struct SetResultCreate {
    pub match_result_id: i64,
    pub winner_id: Option<i64>,
    pub sequence: i16,
}
