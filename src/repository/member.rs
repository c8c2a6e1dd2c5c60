//! Repository implementation for members and the member/team projection.

use diesel::dsl::{IntoBoxed, LeftJoin};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        member::{Member, MemberTeam, NewMember},
        search::{MemberSortKey, SortDirection, SortOrder},
        types::MemberId,
    },
    filter::{MemberFilter, MemberPredicate},
    models::member::{
        Member as DbMember, MemberTeam as DbMemberTeam, NewMember as DbNewMember,
    },
    repository::{
        DieselRepository, MemberQuery, MemberReader, MemberWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{members, teams},
};

type JoinedQuery<'a> = IntoBoxed<'a, LeftJoin<members::table, teams::table>, Sqlite>;

/// Escapes LIKE wildcards so `prefix` is matched literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// `members LEFT JOIN teams` restricted by every predicate of `filter`.
fn filtered<'a>(filter: &MemberFilter) -> JoinedQuery<'a> {
    let mut query = members::table.left_join(teams::table).into_boxed::<Sqlite>();

    for predicate in filter.predicates() {
        query = match predicate {
            MemberPredicate::UsernameEq(name) => query.filter(members::username.eq(name.clone())),
            MemberPredicate::UsernameStartsWith(prefix) => {
                query.filter(members::username.like(like_prefix(prefix)).escape('\\'))
            }
            MemberPredicate::TeamNameEq(name) => query.filter(teams::name.eq(name.clone())),
            MemberPredicate::AgeEq(age) => query.filter(members::age.eq(*age)),
            MemberPredicate::AgeGoe(age) => query.filter(members::age.ge(*age)),
            MemberPredicate::AgeLoe(age) => query.filter(members::age.le(*age)),
            MemberPredicate::AgeGt(age) => query.filter(members::age.gt(*age)),
            MemberPredicate::AgeLt(age) => query.filter(members::age.lt(*age)),
        };
    }

    query
}

/// Applies `sort`, falling back to the member id. NULL usernames and
/// missing teams sort last in either direction.
fn ordered<'a>(mut query: JoinedQuery<'a>, sort: &[SortOrder]) -> JoinedQuery<'a> {
    if sort.is_empty() {
        return query.order_by(members::id.asc());
    }

    for order in sort {
        query = match (order.key, order.direction) {
            (MemberSortKey::Id, SortDirection::Asc) => query.then_order_by(members::id.asc()),
            (MemberSortKey::Id, SortDirection::Desc) => query.then_order_by(members::id.desc()),
            (MemberSortKey::Age, SortDirection::Asc) => query.then_order_by(members::age.asc()),
            (MemberSortKey::Age, SortDirection::Desc) => query.then_order_by(members::age.desc()),
            (MemberSortKey::Username, SortDirection::Asc) => query
                .then_order_by(members::username.is_null())
                .then_order_by(members::username.asc()),
            (MemberSortKey::Username, SortDirection::Desc) => query
                .then_order_by(members::username.is_null())
                .then_order_by(members::username.desc()),
            (MemberSortKey::TeamName, SortDirection::Asc) => query
                .then_order_by(teams::name.is_null())
                .then_order_by(teams::name.asc()),
            (MemberSortKey::TeamName, SortDirection::Desc) => query
                .then_order_by(teams::name.is_null())
                .then_order_by(teams::name.desc()),
        };
    }

    query
}

/// Converts a row offset or limit into SQLite's integer range.
fn sql_bound(name: &str, value: usize) -> RepositoryResult<i64> {
    i64::try_from(value).map_err(|_| {
        RepositoryError::ValidationError(format!("{name} {value} exceeds the SQL integer range"))
    })
}

fn to_domain_members(rows: Vec<DbMember>) -> RepositoryResult<Vec<Member>> {
    rows.into_iter()
        .map(|row| Member::try_from(row).map_err(RepositoryError::from))
        .collect()
}

fn matching_ids(conn: &mut SqliteConnection, filter: &MemberFilter) -> QueryResult<Vec<i32>> {
    filtered(filter).select(members::id).load::<i32>(conn)
}

impl MemberReader for DieselRepository {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>> {
        let mut conn = self.conn()?;
        let db_member = members::table
            .find(id.get())
            .first::<DbMember>(&mut conn)
            .optional()?;

        match db_member {
            Some(db_member) => Ok(Some(
                Member::try_from(db_member).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn find_members_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let mut conn = self.conn()?;
        let rows = members::table
            .filter(members::username.eq(username))
            .order(members::id.asc())
            .load::<DbMember>(&mut conn)?;

        to_domain_members(rows)
    }

    fn list_members(
        &self,
        filter: &MemberFilter,
        sort: &[SortOrder],
    ) -> RepositoryResult<Vec<Member>> {
        let mut conn = self.conn()?;
        let rows = ordered(filtered(filter), sort)
            .select(members::all_columns)
            .load::<DbMember>(&mut conn)?;

        to_domain_members(rows)
    }

    fn fetch_member_rows(&self, query: &MemberQuery) -> RepositoryResult<Vec<MemberTeam>> {
        let mut conn = self.conn()?;

        let mut items = ordered(filtered(&query.filter), &query.sort);
        if let Some(offset) = query.offset {
            items = items.offset(sql_bound("offset", offset)?);
        }
        if let Some(limit) = query.limit {
            items = items.limit(sql_bound("limit", limit)?);
        }

        let rows = items
            .select((
                members::id,
                members::username,
                members::age,
                teams::id.nullable(),
                teams::name.nullable(),
            ))
            .load::<DbMemberTeam>(&mut conn)?;

        rows.into_iter()
            .map(|row| MemberTeam::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn count_member_rows(&self, filter: &MemberFilter) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let total = filtered(filter).count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl MemberWriter for DieselRepository {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member> {
        let mut conn = self.conn()?;
        let db_new_member: DbNewMember = new_member.into();

        let db_member = diesel::insert_into(members::table)
            .values(&db_new_member)
            .get_result::<DbMember>(&mut conn)?;

        Member::try_from(db_member).map_err(RepositoryError::from)
    }

    fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let insertables: Vec<DbNewMember> = new_members.iter().map(Into::into).collect();

        let affected = diesel::insert_into(members::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn rename_members(&self, filter: &MemberFilter, username: &str) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let ids = matching_ids(conn, filter)?;
            diesel::update(members::table.filter(members::id.eq_any(&ids)))
                .set(members::username.eq(username))
                .execute(conn)
        })
        .map_err(RepositoryError::from)
    }

    fn shift_member_ages(&self, filter: &MemberFilter, delta: i32) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let ids = matching_ids(conn, filter)?;
            diesel::update(members::table.filter(members::id.eq_any(&ids)))
                .set(members::age.eq(members::age + delta))
                .execute(conn)
        })
        .map_err(RepositoryError::from)
    }

    fn delete_members(&self, filter: &MemberFilter) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let ids = matching_ids(conn, filter)?;
            diesel::delete(members::table.filter(members::id.eq_any(&ids))).execute(conn)
        })
        .map_err(RepositoryError::from)
    }
}
