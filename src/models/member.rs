use diesel::prelude::*;

use crate::domain::member::{
    Member as DomainMember, MemberTeam as DomainMemberTeam, NewMember as DomainNewMember,
};
use crate::domain::types::{MemberId, TeamId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::members)]
/// Diesel model for [`crate::domain::member::Member`].
pub struct Member {
    pub id: i32,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::members)]
/// Insertable form of [`Member`].
pub struct NewMember<'a> {
    pub username: Option<&'a str>,
    pub age: i32,
    pub team_id: Option<i32>,
}

/// Projection of `members LEFT JOIN teams`.
#[derive(Debug, Clone, Queryable)]
pub struct MemberTeam {
    pub member_id: i32,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i32>,
    pub team_name: Option<String>,
}

fn team_id(raw: Option<i32>) -> Result<Option<TeamId>, TypeConstraintError> {
    raw.map(TeamId::new).transpose()
}

impl TryFrom<Member> for DomainMember {
    type Error = TypeConstraintError;

    fn try_from(member: Member) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MemberId::new(member.id)?,
            username: member.username,
            age: member.age,
            team_id: team_id(member.team_id)?,
        })
    }
}

impl TryFrom<MemberTeam> for DomainMemberTeam {
    type Error = TypeConstraintError;

    fn try_from(row: MemberTeam) -> Result<Self, Self::Error> {
        Ok(Self {
            member_id: MemberId::new(row.member_id)?,
            username: row.username,
            age: row.age,
            team_id: team_id(row.team_id)?,
            team_name: row.team_name,
        })
    }
}

impl<'a> From<&'a DomainNewMember> for NewMember<'a> {
    fn from(member: &'a DomainNewMember) -> Self {
        Self {
            username: member.username.as_deref(),
            age: member.age,
            team_id: member.team_id.map(TeamId::get),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_domain_new_creates_newmember() {
        let domain = DomainNewMember::new("member1", 10).team(TeamId::new(2).unwrap());
        let new: NewMember = (&domain).into();
        assert_eq!(new.username, Some("member1"));
        assert_eq!(new.age, 10);
        assert_eq!(new.team_id, Some(2));
    }

    #[test]
    fn row_without_team_keeps_member_fields() {
        let row = MemberTeam {
            member_id: 4,
            username: Some("member4".to_string()),
            age: 40,
            team_id: None,
            team_name: None,
        };
        let domain = DomainMemberTeam::try_from(row).unwrap();
        assert_eq!(domain.member_id.get(), 4);
        assert_eq!(domain.username.as_deref(), Some("member4"));
        assert_eq!(domain.team_id, None);
        assert_eq!(domain.team_name, None);
    }

    #[test]
    fn member_into_domain_validates_team_id() {
        let db_member = Member {
            id: 1,
            username: None,
            age: 100,
            team_id: Some(-1),
        };
        assert_eq!(
            DomainMember::try_from(db_member),
            Err(TypeConstraintError::NonPositiveId)
        );
    }
}
