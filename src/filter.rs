//! Conjunctive member filters built from optional search conditions.
//!
//! A [`MemberFilter`] is a flat list of [`MemberPredicate`]s joined with AND.
//! The empty list is the neutral filter and matches every row. The Diesel
//! repository folds the predicates onto a boxed query; [`MemberFilter::matches`]
//! evaluates the same semantics in memory.

use crate::domain::member::MemberTeam;
use crate::domain::search::MemberSearchCondition;

/// A single row condition over the members LEFT JOIN teams source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberPredicate {
    UsernameEq(String),
    UsernameStartsWith(String),
    TeamNameEq(String),
    AgeEq(i32),
    /// `age >= n`
    AgeGoe(i32),
    /// `age <= n`
    AgeLoe(i32),
    AgeGt(i32),
    AgeLt(i32),
}

impl MemberPredicate {
    /// Evaluates the predicate with SQL semantics: comparing against a NULL
    /// username or a missing team never matches.
    pub fn matches(&self, row: &MemberTeam) -> bool {
        match self {
            Self::UsernameEq(name) => row.username.as_deref() == Some(name.as_str()),
            // LIKE prefix semantics: ASCII case-insensitive.
            Self::UsernameStartsWith(prefix) => row
                .username
                .as_deref()
                .and_then(|username| username.get(..prefix.len()))
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
            Self::TeamNameEq(name) => row.team_name.as_deref() == Some(name.as_str()),
            Self::AgeEq(age) => row.age == *age,
            Self::AgeGoe(age) => row.age >= *age,
            Self::AgeLoe(age) => row.age <= *age,
            Self::AgeGt(age) => row.age > *age,
            Self::AgeLt(age) => row.age < *age,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberFilter {
    predicates: Vec<MemberPredicate>,
}

impl MemberFilter {
    /// The neutral filter.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds the conjunction of every present field of `cond`.
    pub fn from_condition(cond: &MemberSearchCondition) -> Self {
        let predicates = [
            cond.username.clone().map(MemberPredicate::UsernameEq),
            cond.team_name.clone().map(MemberPredicate::TeamNameEq),
            cond.age_goe.map(MemberPredicate::AgeGoe),
            cond.age_loe.map(MemberPredicate::AgeLoe),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self { predicates }
    }

    pub fn and(mut self, predicate: MemberPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn and_filter(mut self, other: MemberFilter) -> Self {
        self.predicates.extend(other.predicates);
        self
    }

    /// Inclusive age range.
    pub fn age_between(self, low: i32, high: i32) -> Self {
        self.and(MemberPredicate::AgeGoe(low))
            .and(MemberPredicate::AgeLoe(high))
    }

    pub fn predicates(&self) -> &[MemberPredicate] {
        &self.predicates
    }

    pub fn is_match_all(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, row: &MemberTeam) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(row))
    }
}

impl From<&MemberSearchCondition> for MemberFilter {
    fn from(cond: &MemberSearchCondition) -> Self {
        Self::from_condition(cond)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{MemberId, TeamId};

    fn row(id: i32, username: Option<&str>, age: i32, team: Option<(i32, &str)>) -> MemberTeam {
        MemberTeam {
            member_id: MemberId::new(id).unwrap(),
            username: username.map(str::to_string),
            age,
            team_id: team.map(|(team_id, _)| TeamId::new(team_id).unwrap()),
            team_name: team.map(|(_, name)| name.to_string()),
        }
    }

    fn rows() -> Vec<MemberTeam> {
        vec![
            row(1, Some("member1"), 10, Some((1, "teamA"))),
            row(2, Some("member2"), 20, Some((1, "teamA"))),
            row(3, Some("member3"), 30, Some((2, "teamB"))),
            row(4, Some("member4"), 40, Some((2, "teamB"))),
            row(5, None, 30, None),
        ]
    }

    fn select<'a>(filter: &MemberFilter, rows: &'a [MemberTeam]) -> Vec<&'a MemberTeam> {
        rows.iter().filter(|row| filter.matches(row)).collect()
    }

    #[test]
    fn empty_condition_builds_match_all_filter() {
        let filter = MemberFilter::from_condition(&MemberSearchCondition::new());
        assert!(filter.is_match_all());
        assert_eq!(filter, MemberFilter::all());
        let rows = rows();
        assert_eq!(select(&filter, &rows).len(), rows.len());
    }

    #[test]
    fn absent_fields_produce_no_predicates() {
        let cond = MemberSearchCondition::new().team_name("teamB").age_loe(35);
        let filter = MemberFilter::from(&cond);
        assert_eq!(
            filter.predicates(),
            &[
                MemberPredicate::TeamNameEq("teamB".to_string()),
                MemberPredicate::AgeLoe(35),
            ]
        );
    }

    #[test]
    fn age_range_selects_single_member() {
        let cond = MemberSearchCondition::new().age_goe(25).age_loe(35);
        let rows = rows();
        let selected = select(&MemberFilter::from(&cond), &rows);
        let ids: Vec<i32> = selected.iter().map(|row| row.member_id.get()).collect();
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn adding_constraints_never_widens_results() {
        let rows = rows();
        let steps = [
            MemberSearchCondition::new(),
            MemberSearchCondition::new().age_goe(20),
            MemberSearchCondition::new().age_goe(20).age_loe(30),
            MemberSearchCondition::new()
                .age_goe(20)
                .age_loe(30)
                .team_name("teamB"),
            MemberSearchCondition::new()
                .age_goe(20)
                .age_loe(30)
                .team_name("teamB")
                .username("member3"),
        ];

        let sizes: Vec<usize> = steps
            .iter()
            .map(|cond| select(&MemberFilter::from(cond), &rows).len())
            .collect();

        assert!(sizes.windows(2).all(|pair| pair[1] <= pair[0]), "{sizes:?}");
        assert_eq!(sizes.last(), Some(&1));
    }

    #[test]
    fn predicate_order_does_not_change_results() {
        let rows = rows();
        let forward = MemberFilter::all()
            .and(MemberPredicate::TeamNameEq("teamA".to_string()))
            .and(MemberPredicate::AgeGt(10));
        let backward = MemberFilter::all()
            .and(MemberPredicate::AgeGt(10))
            .and_filter(MemberFilter::all().and(MemberPredicate::TeamNameEq("teamA".to_string())));

        assert_eq!(select(&forward, &rows), select(&backward, &rows));
    }

    #[test]
    fn missing_team_never_matches_team_predicate() {
        let orphan = row(9, Some("solo"), 50, None);
        assert!(!MemberPredicate::TeamNameEq("teamA".to_string()).matches(&orphan));
        assert!(MemberFilter::all().matches(&orphan));
    }

    #[test]
    fn null_username_never_matches_username_predicates() {
        let anonymous = row(9, None, 50, None);
        assert!(!MemberPredicate::UsernameEq("member1".to_string()).matches(&anonymous));
        assert!(!MemberPredicate::UsernameStartsWith("mem".to_string()).matches(&anonymous));
    }

    #[test]
    fn prefix_match_ignores_ascii_case() {
        let member = row(1, Some("Member1"), 10, None);
        assert!(MemberPredicate::UsernameStartsWith("mem".to_string()).matches(&member));
        assert!(!MemberPredicate::UsernameStartsWith("Member10".to_string()).matches(&member));
    }

    #[test]
    fn between_and_prefix_compose() {
        let rows = rows();
        let filter = MemberFilter::all()
            .and(MemberPredicate::UsernameStartsWith("mem".to_string()))
            .age_between(10, 30);
        assert_eq!(select(&filter, &rows).len(), 3);
    }
}
