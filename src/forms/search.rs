use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::search::{MemberSearchCondition, SortOrder};
use crate::forms::FormError;
use crate::pagination::PageRequest;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn validate_age_range(form: &SearchForm) -> Result<(), ValidationError> {
    match (form.age_goe, form.age_loe) {
        (Some(low), Some(high)) if low > high => Err(ValidationError::new("age_range")),
        _ => Ok(()),
    }
}

/// Raw member search parameters as submitted by a caller.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_age_range"))]
pub struct SearchForm {
    pub username: Option<String>,
    pub team_name: Option<String>,
    #[validate(range(min = 0))]
    pub age_goe: Option<i32>,
    #[validate(range(min = 0))]
    pub age_loe: Option<i32>,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100))]
    pub size: i64,
    #[serde(default)]
    pub sort: Vec<SortOrder>,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            username: None,
            team_name: None,
            age_goe: None,
            age_loe: None,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

/// Blank text inputs mean "no filter".
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl SearchForm {
    /// Validates the form and splits it into a search condition and a page
    /// request.
    pub fn into_query(self) -> Result<(MemberSearchCondition, PageRequest), FormError> {
        self.validate()?;

        let page = self
            .sort
            .iter()
            .fold(PageRequest::new(self.page, self.size)?, |page, order| {
                page.sorted_by(*order)
            });

        let cond = MemberSearchCondition {
            username: non_blank(self.username),
            team_name: non_blank(self.team_name),
            age_goe: self.age_goe,
            age_loe: self.age_loe,
        };

        Ok((cond, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::MemberSortKey;
    use crate::pagination::PageRequestError;

    #[test]
    fn blank_text_fields_are_dropped() {
        let form = SearchForm {
            username: Some("   ".to_string()),
            team_name: Some(" teamA ".to_string()),
            ..SearchForm::default()
        };
        let (cond, page) = form.into_query().unwrap();
        assert_eq!(cond.username, None);
        assert_eq!(cond.team_name.as_deref(), Some("teamA"));
        assert_eq!(page.index(), 0);
        assert_eq!(page.size(), DEFAULT_PAGE_SIZE as usize);
    }

    #[test]
    fn inverted_age_range_is_rejected() {
        let form = SearchForm {
            age_goe: Some(40),
            age_loe: Some(30),
            ..SearchForm::default()
        };
        assert!(matches!(form.into_query(), Err(FormError::Validation(_))));
    }

    #[test]
    fn oversized_page_is_rejected() {
        let form = SearchForm {
            size: MAX_PAGE_SIZE + 1,
            ..SearchForm::default()
        };
        assert!(matches!(form.into_query(), Err(FormError::Validation(_))));
    }

    #[test]
    fn negative_page_is_an_invalid_page_request() {
        let form = SearchForm {
            page: -1,
            ..SearchForm::default()
        };
        assert!(matches!(
            form.into_query(),
            Err(FormError::InvalidPageRequest(_))
        ));
    }

    #[test]
    fn unbounded_page_index_is_an_invalid_page_request() {
        let form = SearchForm {
            page: i64::MAX,
            size: 3,
            ..SearchForm::default()
        };
        assert!(matches!(
            form.into_query(),
            Err(FormError::InvalidPageRequest(
                PageRequestError::OffsetOverflow { .. }
            ))
        ));
    }

    #[test]
    fn sort_orders_are_carried_into_the_page_request() {
        let form = SearchForm {
            sort: vec![
                SortOrder::desc(MemberSortKey::Age),
                SortOrder::asc(MemberSortKey::Username),
            ],
            ..SearchForm::default()
        };
        let (_, page) = form.into_query().unwrap();
        assert_eq!(
            page.sort(),
            &[
                SortOrder::desc(MemberSortKey::Age),
                SortOrder::asc(MemberSortKey::Username),
            ]
        );
    }
}
