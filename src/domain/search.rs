//! Caller-facing search inputs: optional filter fields and sort orders.

use serde::{Deserialize, Serialize};

/// Optional filters for a member search. Absent fields do not filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberSortKey {
    Id,
    Username,
    Age,
    TeamName,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One key of an ordering. Nullable keys always place NULLs last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOrder {
    pub key: MemberSortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub const fn asc(key: MemberSortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub const fn desc(key: MemberSortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    /// Parses `key` or `key:asc|desc`, e.g. `age:desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.split_once(':') {
            Some((key, direction)) => (key, direction),
            None => (s, "asc"),
        };
        let key = match key.trim() {
            "id" => MemberSortKey::Id,
            "username" => MemberSortKey::Username,
            "age" => MemberSortKey::Age,
            "team_name" => MemberSortKey::TeamName,
            other => return Err(format!("unknown sort key: {other}")),
        };
        let direction = match direction.trim() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(format!("unknown sort direction: {other}")),
        };
        Ok(Self { key, direction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_only_requested_fields() {
        let cond = MemberSearchCondition::new().age_goe(25).age_loe(35);
        assert_eq!(cond.username, None);
        assert_eq!(cond.team_name, None);
        assert_eq!(cond.age_goe, Some(25));
        assert_eq!(cond.age_loe, Some(35));
    }

    #[test]
    fn parses_sort_orders() {
        assert_eq!(
            "age:desc".parse::<SortOrder>(),
            Ok(SortOrder::desc(MemberSortKey::Age))
        );
        assert_eq!(
            "username".parse::<SortOrder>(),
            Ok(SortOrder::asc(MemberSortKey::Username))
        );
        assert!("height".parse::<SortOrder>().is_err());
        assert!("age:sideways".parse::<SortOrder>().is_err());
    }
}
