use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        member::{Member, MemberTeam, NewMember},
        search::{MemberSearchCondition, SortOrder},
        team::{NewTeam, Team, TeamAgeStats},
        types::{MemberId, TeamId},
    },
    filter::MemberFilter,
    pagination::{Page, PageRequest, assemble},
    repository::errors::{RepositoryError, RepositoryResult},
};

pub mod errors;
pub mod member;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod team;

/// Diesel-backed repository shared by every reader and writer trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Filter, ordering and window applied to the members LEFT JOIN teams source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberQuery {
    pub filter: MemberFilter,
    pub sort: Vec<SortOrder>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl MemberQuery {
    pub fn new(filter: MemberFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn sort(mut self, sort: &[SortOrder]) -> Self {
        self.sort = sort.to_vec();
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn paginate(self, page: &PageRequest) -> Self {
        self.sort(page.sort())
            .offset(page.offset())
            .limit(page.size())
    }
}

pub trait MemberReader {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
    fn find_members_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;
    /// Loads whole members matching an arbitrary composed filter.
    fn list_members(
        &self,
        filter: &MemberFilter,
        sort: &[SortOrder],
    ) -> RepositoryResult<Vec<Member>>;
    /// Loads projected rows. An empty sort orders by member id.
    fn fetch_member_rows(&self, query: &MemberQuery) -> RepositoryResult<Vec<MemberTeam>>;
    /// Counts rows matching `filter`, ignoring any ordering or window.
    fn count_member_rows(&self, filter: &MemberFilter) -> RepositoryResult<usize>;

    /// Single-result fetch; more than one match is an error.
    fn find_one_member_row(&self, filter: &MemberFilter) -> RepositoryResult<Option<MemberTeam>> {
        let mut rows = self.fetch_member_rows(&MemberQuery::new(filter.clone()).limit(2))?;
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            found => Err(RepositoryError::AmbiguousResult(found)),
        }
    }

    fn first_member_row(
        &self,
        filter: &MemberFilter,
        sort: &[SortOrder],
    ) -> RepositoryResult<Option<MemberTeam>> {
        let rows = self.fetch_member_rows(&MemberQuery::new(filter.clone()).sort(sort).limit(1))?;
        Ok(rows.into_iter().next())
    }

    fn search_members(&self, cond: &MemberSearchCondition) -> RepositoryResult<Vec<MemberTeam>> {
        self.fetch_member_rows(&MemberQuery::new(MemberFilter::from_condition(cond)))
    }

    fn search_members_paged(
        &self,
        cond: &MemberSearchCondition,
        page: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeam>> {
        let filter = MemberFilter::from_condition(cond);
        let content = self.fetch_member_rows(&MemberQuery::new(filter.clone()).paginate(page))?;

        assemble(content, page, || {
            log::debug!("Counting members for page {}", page.index());
            self.count_member_rows(&filter)
        })
    }
}

pub trait MemberWriter {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
    fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize>;
    /// Sets the username of every matching member.
    fn rename_members(&self, filter: &MemberFilter, username: &str) -> RepositoryResult<usize>;
    /// Adds `delta` to the age of every matching member.
    fn shift_member_ages(&self, filter: &MemberFilter, delta: i32) -> RepositoryResult<usize>;
    fn delete_members(&self, filter: &MemberFilter) -> RepositoryResult<usize>;
}

pub trait TeamReader {
    fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>>;
    fn get_team_by_name(&self, name: &str) -> RepositoryResult<Option<Team>>;
    fn list_teams(&self) -> RepositoryResult<Vec<Team>>;
    /// Age aggregates per team, ordered by team name. Teams without
    /// members are omitted.
    fn team_age_stats(&self) -> RepositoryResult<Vec<TeamAgeStats>>;
}

pub trait TeamWriter {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
}
