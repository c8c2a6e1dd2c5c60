use diesel::prelude::*;

use crate::domain::team::{NewTeam as DomainNewTeam, Team as DomainTeam, TeamAgeStats};
use crate::domain::types::{TeamId, TeamName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::teams)]
/// Diesel model for [`crate::domain::team::Team`].
pub struct Team {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::teams)]
/// Insertable form of [`Team`].
pub struct NewTeam<'a> {
    pub name: &'a str,
}

/// Row of the grouped team age query: name, count, sum, min, max.
pub type TeamAgeRow = (String, i64, Option<i64>, Option<i32>, Option<i32>);

impl TryFrom<Team> for DomainTeam {
    type Error = TypeConstraintError;

    fn try_from(team: Team) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TeamId::new(team.id)?,
            name: TeamName::new(team.name)?,
        })
    }
}

impl<'a> From<&'a DomainNewTeam> for NewTeam<'a> {
    fn from(team: &'a DomainNewTeam) -> Self {
        Self {
            name: team.name.as_str(),
        }
    }
}

pub fn team_age_stats_from_row(row: TeamAgeRow) -> TeamAgeStats {
    let (team_name, member_count, age_sum, min_age, max_age) = row;
    TeamAgeStats {
        team_name,
        member_count: member_count as usize,
        age_sum: age_sum.unwrap_or_default(),
        min_age,
        max_age,
    }
}
