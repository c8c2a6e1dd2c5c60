//! Repository implementation for teams.

use diesel::dsl::{count, max, min, sum};
use diesel::prelude::*;

use crate::{
    domain::{
        team::{NewTeam, Team, TeamAgeStats},
        types::TeamId,
    },
    models::team::{
        NewTeam as DbNewTeam, Team as DbTeam, TeamAgeRow, team_age_stats_from_row,
    },
    repository::{
        DieselRepository, TeamReader, TeamWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{members, teams},
};

impl TeamWriter for DieselRepository {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team> {
        let mut conn = self.conn()?;
        let db_new_team: DbNewTeam = new_team.into();

        let db_team = diesel::insert_into(teams::table)
            .values(&db_new_team)
            .get_result::<DbTeam>(&mut conn)?;

        Team::try_from(db_team).map_err(RepositoryError::from)
    }
}

impl TeamReader for DieselRepository {
    fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>> {
        let mut conn = self.conn()?;
        let db_team = teams::table
            .find(id.get())
            .first::<DbTeam>(&mut conn)
            .optional()?;

        db_team
            .map(|team| Team::try_from(team).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_team_by_name(&self, name: &str) -> RepositoryResult<Option<Team>> {
        let mut conn = self.conn()?;
        let db_team = teams::table
            .filter(teams::name.eq(name))
            .first::<DbTeam>(&mut conn)
            .optional()?;

        db_team
            .map(|team| Team::try_from(team).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_teams(&self) -> RepositoryResult<Vec<Team>> {
        let mut conn = self.conn()?;
        let db_teams = teams::table
            .order(teams::name.asc())
            .load::<DbTeam>(&mut conn)?;

        db_teams
            .into_iter()
            .map(|team| Team::try_from(team).map_err(RepositoryError::from))
            .collect()
    }

    fn team_age_stats(&self) -> RepositoryResult<Vec<TeamAgeStats>> {
        let mut conn = self.conn()?;
        let rows = teams::table
            .inner_join(members::table)
            .group_by(teams::name)
            .select((
                teams::name,
                count(members::id),
                sum(members::age),
                min(members::age),
                max(members::age),
            ))
            .order(teams::name.asc())
            .load::<TeamAgeRow>(&mut conn)?;

        Ok(rows.into_iter().map(team_age_stats_from_row).collect())
    }
}
