use serde::{Deserialize, Serialize};

use crate::domain::types::{TeamId, TeamName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: TeamName,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTeam {
    pub name: TeamName,
}

impl NewTeam {
    pub fn new(name: TeamName) -> Self {
        Self { name }
    }
}

/// Aggregated ages of the members belonging to one team.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TeamAgeStats {
    pub team_name: String,
    pub member_count: usize,
    pub age_sum: i64,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl TeamAgeStats {
    /// Mean member age, `None` for a team without members.
    pub fn average_age(&self) -> Option<f64> {
        if self.member_count == 0 {
            None
        } else {
            Some(self.age_sum as f64 / self.member_count as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_age_divides_sum_by_count() {
        let stats = TeamAgeStats {
            team_name: "teamA".to_string(),
            member_count: 2,
            age_sum: 30,
            min_age: Some(10),
            max_age: Some(20),
        };
        assert_eq!(stats.average_age(), Some(15.0));
    }

    #[test]
    fn average_age_of_empty_team_is_none() {
        let stats = TeamAgeStats {
            team_name: "empty".to_string(),
            member_count: 0,
            age_sum: 0,
            min_age: None,
            max_age: None,
        };
        assert_eq!(stats.average_age(), None);
    }
}
