use crate::types::{Pitcher, Team, User};

/// Which pitches an aggregation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFilter {
    /// Every pitch thrown by one pitcher.
    Pitcher(i64),
    /// Every pitch thrown by the pitchers currently on one team.
    Team(i64),
}

/// A scope filter that has passed the ownership check.
///
/// The only way to obtain one is from entity records that belong to the
/// requesting user, so the aggregator cannot be reached with a scope the
/// caller may not see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizedScope {
    filter: ScopeFilter,
}

impl AuthorizedScope {
    /// Scope over all pitchers of `team`, if `user` owns it.
    #[must_use]
    pub fn team(user: &User, team: &Team) -> Option<Self> {
        (team.owner_id == user.id).then_some(Self {
            filter: ScopeFilter::Team(team.id),
        })
    }

    /// Scope over a single pitcher. `team` must be the pitcher's team and be
    /// owned by `user`.
    #[must_use]
    pub fn pitcher(user: &User, pitcher: &Pitcher, team: &Team) -> Option<Self> {
        (pitcher.team_id == team.id && team.owner_id == user.id).then_some(Self {
            filter: ScopeFilter::Pitcher(pitcher.id),
        })
    }

    #[must_use]
    pub const fn filter(&self) -> ScopeFilter {
        self.filter
    }
}
