//! Filter, sort and paginate the user directory for display.
//!
//! The stages always run in that order. Sorting is stable, and paging is the
//! last step so each page is cut from the fully ordered result.

use std::cmp::Ordering;

use crate::users::Record;
use crate::view_state::{RoleFilter, SortDirection, SortField, StatusFilter, ViewState};

/// Rows per page in the user table.
pub const TABLE_PAGE_SIZE: usize = 5;

/// Upper bound on cards taken from the current table page. Because the card
/// grid reads the table page, it never shows more than [`TABLE_PAGE_SIZE`].
pub const CARD_GRID_LIMIT: usize = 6;

/// Visible page of the directory for one [`ViewState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    /// Rows on the current page, in display order.
    pub rows: Vec<&'a Record>,
    /// Number of records passing the filters, across all pages.
    pub matched: usize,
    pub total_pages: usize,
    /// Page the rows were cut for. Not clamped.
    pub page: u32,
}

/// Keeps the records matching all three predicates, in store order.
///
/// The search term matches case-insensitively anywhere in the name or the
/// email; an empty term matches everything.
pub fn filter<'a>(
    records: &'a [Record],
    search_term: &str,
    role_filter: RoleFilter,
    status_filter: StatusFilter,
) -> Vec<&'a Record> {
    let needle = search_term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record.name.to_lowercase().contains(&needle)
                || record.email.to_lowercase().contains(&needle)
        })
        .filter(|record| role_filter.matches(record.role))
        .filter(|record| status_filter.matches(record.status))
        .collect()
}

fn compare(a: &Record, b: &Record, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(b.name),
        SortField::Email => a.email.cmp(b.email),
        SortField::Role => a.role.label().cmp(b.role.label()),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::LastLogin => a.last_login.cmp(b.last_login),
    }
}

/// Orders rows by `field`. Equal keys keep their incoming order in both
/// directions.
pub fn sort(mut rows: Vec<&Record>, field: SortField, direction: SortDirection) -> Vec<&Record> {
    rows.sort_by(|a, b| {
        let ordering = compare(a, b, field);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    rows
}

/// Number of pages needed for `count` rows. Zero rows, or a zero page size,
/// means zero pages.
pub fn page_count(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        count.div_ceil(page_size)
    }
}

/// Returns the rows of the 1-based `page`.
///
/// Pages outside `1..=page_count` come back empty.
pub fn paginate<T>(rows: &[T], page_size: usize, page: u32) -> &[T] {
    let Some(index) = page.checked_sub(1) else {
        return &[];
    };
    let start = usize::try_from(index)
        .ok()
        .and_then(|index| index.checked_mul(page_size));
    match start {
        Some(start) if start < rows.len() => {
            let end = start.saturating_add(page_size).min(rows.len());
            &rows[start..end]
        }
        _ => &[],
    }
}

/// Runs the whole pipeline for `view` over `records`.
pub fn project<'a>(records: &'a [Record], view: &ViewState) -> Projection<'a> {
    let filtered = filter(
        records,
        &view.search_term,
        view.role_filter,
        view.status_filter,
    );
    let sorted = sort(filtered, view.sort_field, view.sort_direction);
    let matched = sorted.len();

    Projection {
        rows: paginate(&sorted, TABLE_PAGE_SIZE, view.current_page).to_vec(),
        matched,
        total_pages: page_count(matched, TABLE_PAGE_SIZE),
        page: view.current_page,
    }
}

impl<'a> Projection<'a> {
    /// Rows shown by the card grid.
    pub fn cards(&self) -> &[&'a Record] {
        &self.rows[..self.rows.len().min(CARD_GRID_LIMIT)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::{Role, Status, directory};
    use rstest::rstest;

    fn ids(rows: &[&Record]) -> Vec<u32> {
        rows.iter().map(|record| record.id).collect()
    }

    fn view() -> ViewState {
        ViewState::default()
    }

    #[test]
    fn test_default_projection_is_first_page_by_name() {
        let projection = project(directory(), &view());
        assert_eq!(projection.matched, 8);
        assert_eq!(projection.total_pages, 2);
        // Alice, Bob, Charlie, Diana, Edward
        assert_eq!(ids(&projection.rows), vec![4, 3, 5, 6, 7]);
    }

    #[test]
    fn test_search_jane_yields_single_page() {
        let projection = project(
            directory(),
            &ViewState {
                search_term: "jane".to_string(),
                ..view()
            },
        );
        assert_eq!(ids(&projection.rows), vec![2]);
        assert_eq!(projection.total_pages, 1);
    }

    #[test]
    fn test_search_matches_email_case_insensitively() {
        let rows = filter(directory(), "CHARLIE@", RoleFilter::All, StatusFilter::All);
        assert_eq!(ids(&rows), vec![5]);
    }

    #[rstest]
    #[case(SortField::Name)]
    #[case(SortField::Email)]
    #[case(SortField::Role)]
    #[case(SortField::Status)]
    #[case(SortField::LastLogin)]
    fn test_active_users_regardless_of_sort(#[case] sort_field: SortField) {
        let projection = project(
            directory(),
            &ViewState {
                role_filter: RoleFilter::User,
                status_filter: StatusFilter::Active,
                sort_field,
                ..view()
            },
        );
        let mut matched = ids(&projection.rows);
        matched.sort_unstable();
        // Jane Smith and Diana Davis
        assert_eq!(matched, vec![2, 6]);
        assert!(projection
            .rows
            .iter()
            .all(|record| record.role == Role::User && record.status == Status::Active));
    }

    #[test]
    fn test_last_login_descending_puts_most_recent_first() {
        let projection = project(
            directory(),
            &ViewState {
                sort_field: SortField::LastLogin,
                sort_direction: SortDirection::Desc,
                ..view()
            },
        );
        assert_eq!(projection.rows[0].name, "John Doe");
        assert_eq!(projection.rows[0].last_login, "2024-01-15");
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let rows = filter(directory(), "", RoleFilter::All, StatusFilter::All);

        let ascending = sort(rows.clone(), SortField::Role, SortDirection::Asc);
        assert_eq!(ids(&ascending), vec![1, 5, 3, 7, 2, 4, 6, 8]);

        let descending = sort(rows, SortField::Role, SortDirection::Desc);
        assert_eq!(ids(&descending), vec![2, 4, 6, 8, 3, 7, 1, 5]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = filter(directory(), "a", RoleFilter::User, StatusFilter::All);
        let owned: Vec<Record> = once.iter().map(|record| (*record).clone()).collect();
        let twice = filter(&owned, "a", RoleFilter::User, StatusFilter::All);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let projection = project(
            directory(),
            &ViewState {
                current_page: 3,
                ..view()
            },
        );
        assert!(projection.rows.is_empty());
        assert_eq!(projection.page, 3);
    }

    #[test]
    fn test_final_page_is_partial() {
        let rows = filter(directory(), "", RoleFilter::All, StatusFilter::All);
        assert_eq!(ids(paginate(&rows, TABLE_PAGE_SIZE, 2)), vec![6, 7, 8]);
        assert_eq!(ids(paginate(&rows, 7, 2)), vec![8]);
    }

    #[test]
    fn test_page_zero_and_zero_size_are_empty() {
        let rows = filter(directory(), "", RoleFilter::All, StatusFilter::All);
        assert!(paginate(&rows, TABLE_PAGE_SIZE, 0).is_empty());
        assert!(paginate(&rows, 0, 1).is_empty());
        assert_eq!(page_count(rows.len(), 0), 0);
        assert_eq!(page_count(0, TABLE_PAGE_SIZE), 0);
    }

    #[test]
    fn test_empty_store_projects_nothing() {
        let projection = project(&[], &view());
        assert!(projection.rows.is_empty());
        assert_eq!(projection.matched, 0);
        assert_eq!(projection.total_pages, 0);
    }

    #[test]
    fn test_page_length_matches_remaining_rows() {
        let searches = ["", "a", "o", "example", "zzz"];
        let roles = [RoleFilter::All, RoleFilter::Admin, RoleFilter::Manager, RoleFilter::User];
        for search in searches {
            for role_filter in roles {
                for page in 0..=4u32 {
                    let state = ViewState {
                        search_term: search.to_string(),
                        role_filter,
                        current_page: page,
                        ..view()
                    };
                    let projection = project(directory(), &state);
                    let skipped = (page.max(1) as usize - 1) * TABLE_PAGE_SIZE;
                    let expected = if page == 0 {
                        0
                    } else {
                        projection.matched.saturating_sub(skipped).min(TABLE_PAGE_SIZE)
                    };
                    assert_eq!(projection.rows.len(), expected, "search={search:?} page={page}");
                }
            }
        }
    }

    #[test]
    fn test_cards_mirror_the_table_page() {
        let projection = project(directory(), &view());
        assert_eq!(ids(projection.cards()), ids(&projection.rows));
        assert!(projection.cards().len() <= TABLE_PAGE_SIZE);
    }
}
