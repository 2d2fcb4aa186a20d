//! Per-side score computation and the match outcome rule.

use super::handicap::{recalculate, HandicapTable, MAX_MATCH_SCORE};
use crate::entities::Side;
use crate::errors::domain::{DomainError, ValidationKind};

pub const LEAGUE_POINTS_FOR_WIN: i32 = 3;
pub const LEAGUE_POINTS_FOR_DRAW: i32 = 1;
pub const LEAGUE_POINTS_FOR_LOSS: i32 = 0;

pub const BONUS_POINTS_FOR_HANDICAP_HIT: i32 = 1;
pub const BONUS_POINTS_FOR_CLOSE_LOSS: i32 = 1;

/// Largest adjusted-points gap that still earns the loser a bonus.
pub const CLOSE_LOSS_THRESHOLD: i32 = 5;

/// Raw points plus allowance; a sum that does not fit is rejected as bad input.
pub fn adjusted_points(match_points: i32, allowance: i32) -> Result<i32, DomainError> {
    match_points.checked_add(allowance).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::MatchPointsOutOfRange,
            format!("Match points {match_points} are out of range"),
        )
    })
}

pub fn handicap_hit_bonus(match_points_adjusted: i32) -> i32 {
    if match_points_adjusted >= MAX_MATCH_SCORE {
        BONUS_POINTS_FOR_HANDICAP_HIT
    } else {
        0
    }
}

/// One side's computed numbers, before and after outcome resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCard {
    pub side: Side,
    pub entry_id: i64,
    pub handicap_before: i16,
    pub handicap_after: i16,
    pub allowance: i32,
    pub match_points: i32,
    pub match_points_adjusted: i32,
    pub bonus_points: i32,
    pub league_points: i32,
}

impl ScoreCard {
    /// Build a card from the handicap held at the time of the match.
    ///
    /// League points start at zero; only [`resolve_outcome`] assigns them.
    pub fn compute(
        side: Side,
        entry_id: i64,
        table: &HandicapTable,
        handicap_before: i16,
        match_points: i32,
    ) -> Result<Self, DomainError> {
        let allowance = table.allowance(handicap_before)?;
        let handicap_after = recalculate(table, handicap_before, match_points)?;
        let match_points_adjusted = adjusted_points(match_points, allowance)?;

        Ok(Self {
            side,
            entry_id,
            handicap_before,
            handicap_after,
            allowance,
            match_points,
            match_points_adjusted,
            bonus_points: handicap_hit_bonus(match_points_adjusted),
            league_points: 0,
        })
    }

    pub fn improves_handicap(&self) -> bool {
        self.handicap_after < self.handicap_before
    }

    pub fn handicap_change(&self) -> i16 {
        self.handicap_before - self.handicap_after
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Draw,
    Decisive {
        winner: Side,
        margin: i32,
        close_loss: bool,
    },
}

impl MatchOutcome {
    pub fn winner_side(&self) -> Option<Side> {
        match self {
            MatchOutcome::Draw => None,
            MatchOutcome::Decisive { winner, .. } => Some(*winner),
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, MatchOutcome::Draw)
    }
}

/// Assign league points and the close-loss bonus to both cards.
///
/// Bonus points are rebuilt from the handicap-hit bonus on every call, so
/// resolving the same pair twice gives the same result.
pub fn resolve_outcome(left: &mut ScoreCard, right: &mut ScoreCard) -> MatchOutcome {
    left.bonus_points = handicap_hit_bonus(left.match_points_adjusted);
    right.bonus_points = handicap_hit_bonus(right.match_points_adjusted);

    if left.match_points_adjusted == right.match_points_adjusted {
        left.league_points = LEAGUE_POINTS_FOR_DRAW;
        right.league_points = LEAGUE_POINTS_FOR_DRAW;
        return MatchOutcome::Draw;
    }

    let (winner, loser) = if left.match_points_adjusted > right.match_points_adjusted {
        (left, right)
    } else {
        (right, left)
    };

    winner.league_points = LEAGUE_POINTS_FOR_WIN;
    loser.league_points = LEAGUE_POINTS_FOR_LOSS;

    let margin = winner
        .match_points_adjusted
        .saturating_sub(loser.match_points_adjusted);
    let close_loss = margin <= CLOSE_LOSS_THRESHOLD;
    if close_loss {
        loser.bonus_points += BONUS_POINTS_FOR_CLOSE_LOSS;
    }

    MatchOutcome::Decisive {
        winner: winner.side,
        margin,
        close_loss,
    }
}
