use crate::domain::member::MemberTeam;
use crate::domain::team::TeamAgeStats;
use crate::forms::search::SearchForm;
use crate::pagination::Page;
use crate::repository::{MemberReader, TeamReader};
use crate::services::{ServiceError, ServiceResult};

/// Validates the search form and loads the requested page of members.
pub fn search_members_page<R>(repo: &R, form: SearchForm) -> ServiceResult<Page<MemberTeam>>
where
    R: MemberReader + ?Sized,
{
    let (cond, page) = form.into_query().map_err(|err| {
        log::error!("Failed to validate search form: {err}");
        ServiceError::Form(err.to_string())
    })?;

    let result = repo.search_members_paged(&cond, &page).map_err(|err| {
        log::error!("Failed to search members: {err}");
        ServiceError::from(err)
    })?;

    log::info!(
        "Loaded {} of {} members (page {})",
        result.number_of_elements(),
        result.total_elements,
        result.index
    );

    Ok(result)
}

/// Loads per-team age aggregates.
pub fn load_team_stats<R>(repo: &R) -> ServiceResult<Vec<TeamAgeStats>>
where
    R: TeamReader + ?Sized,
{
    repo.team_age_stats().map_err(|err| {
        log::error!("Failed to load team statistics: {err}");
        ServiceError::from(err)
    })
}
