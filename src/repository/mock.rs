//! Mock repository implementations for isolating services in tests.
//!
//! Only the primitive operations are mocked; the provided search methods of
//! [`MemberReader`] run their real implementation on top of them.

use mockall::mock;

use crate::domain::member::{Member, MemberTeam, NewMember};
use crate::domain::search::SortOrder;
use crate::domain::team::{NewTeam, Team, TeamAgeStats};
use crate::domain::types::{MemberId, TeamId};
use crate::filter::MemberFilter;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    MemberQuery, MemberReader, MemberWriter, TeamReader, TeamWriter,
};

mock! {
    pub Repository {}

    impl MemberReader for Repository {
        fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
        fn find_members_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;
        fn list_members(
            &self,
            filter: &MemberFilter,
            sort: &[SortOrder],
        ) -> RepositoryResult<Vec<Member>>;
        fn fetch_member_rows(&self, query: &MemberQuery) -> RepositoryResult<Vec<MemberTeam>>;
        fn count_member_rows(&self, filter: &MemberFilter) -> RepositoryResult<usize>;
    }

    impl MemberWriter for Repository {
        fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
        fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize>;
        fn rename_members(&self, filter: &MemberFilter, username: &str) -> RepositoryResult<usize>;
        fn shift_member_ages(&self, filter: &MemberFilter, delta: i32) -> RepositoryResult<usize>;
        fn delete_members(&self, filter: &MemberFilter) -> RepositoryResult<usize>;
    }

    impl TeamReader for Repository {
        fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>>;
        fn get_team_by_name(&self, name: &str) -> RepositoryResult<Option<Team>>;
        fn list_teams(&self) -> RepositoryResult<Vec<Team>>;
        fn team_age_stats(&self) -> RepositoryResult<Vec<TeamAgeStats>>;
    }

    impl TeamWriter for Repository {
        fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
    }
}
