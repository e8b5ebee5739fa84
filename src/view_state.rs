//! View state of the user table and the reducer that evolves it.
//!
//! Every user interaction in the data section becomes an [`Action`]. The
//! reducer is pure: it takes the current [`ViewState`] by value and returns
//! the next one, so a sequence of actions can be replayed deterministically.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseOptionError;
use crate::query::{self, TABLE_PAGE_SIZE};
use crate::users::{Record, Role, Status};

/// Role filter selected in the `filter-role` dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleFilter {
    #[default]
    All,
    Admin,
    Manager,
    User,
}

impl RoleFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleFilter::All => "all",
            RoleFilter::Admin => "admin",
            RoleFilter::Manager => "manager",
            RoleFilter::User => "user",
        }
    }

    /// Case-insensitive comparison against the role label.
    pub fn matches(self, role: Role) -> bool {
        self == RoleFilter::All || role.label().eq_ignore_ascii_case(self.as_str())
    }
}

impl FromStr for RoleFilter {
    type Err = ParseOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "all" => Ok(RoleFilter::All),
            "admin" => Ok(RoleFilter::Admin),
            "manager" => Ok(RoleFilter::Manager),
            "user" => Ok(RoleFilter::User),
            _ => Err(ParseOptionError::new("role filter", value)),
        }
    }
}

/// Status filter selected in the `filter-status` dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
    Pending,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
            StatusFilter::Pending => "pending",
        }
    }

    pub fn matches(self, status: Status) -> bool {
        self == StatusFilter::All || status.as_str() == self.as_str()
    }
}

impl FromStr for StatusFilter {
    type Err = ParseOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            "pending" => Ok(StatusFilter::Pending),
            _ => Err(ParseOptionError::new("status filter", value)),
        }
    }
}

/// Column the table is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Name,
    Email,
    Role,
    Status,
    LastLogin,
}

impl SortField {
    /// Columns with a sort button in the table header. Status is sortable
    /// through the reducer but has no header button.
    pub const HEADERS: [SortField; 4] = [
        SortField::Name,
        SortField::Email,
        SortField::Role,
        SortField::LastLogin,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Email => "Email",
            SortField::Role => "Role",
            SortField::Status => "Status",
            SortField::LastLogin => "Last Login",
        }
    }

    /// Element id of the header button, e.g. `sort-lastlogin`.
    pub fn button_id(self) -> &'static str {
        match self {
            SortField::Name => "sort-name",
            SortField::Email => "sort-email",
            SortField::Role => "sort-role",
            SortField::Status => "sort-status",
            SortField::LastLogin => "sort-lastlogin",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Arrow shown next to the active header.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Everything the user can change about the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub search_term: String,
    pub role_filter: RoleFilter,
    pub status_filter: StatusFilter,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    /// 1-based page number.
    pub current_page: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            role_filter: RoleFilter::All,
            status_filter: StatusFilter::All,
            sort_field: SortField::Name,
            sort_direction: SortDirection::Asc,
            current_page: 1,
        }
    }
}

/// A user intent against the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "camelCase")]
pub enum Action {
    SetSearch(String),
    SetRoleFilter(RoleFilter),
    SetStatusFilter(StatusFilter),
    /// Re-selecting the active field flips the direction; a new field starts
    /// ascending.
    SetSort(SortField),
    SetPage(u32),
    NextPage,
    PreviousPage,
    Reset,
}

impl ViewState {
    /// Applies `action` without looking at the data.
    ///
    /// The page number is left exactly where the action puts it, even when
    /// the new filters leave fewer pages; see [`ViewState::dispatch`].
    pub fn reduce(self, action: &Action) -> ViewState {
        match action {
            Action::SetSearch(term) => ViewState {
                search_term: term.clone(),
                ..self
            },
            Action::SetRoleFilter(role_filter) => ViewState {
                role_filter: *role_filter,
                ..self
            },
            Action::SetStatusFilter(status_filter) => ViewState {
                status_filter: *status_filter,
                ..self
            },
            Action::SetSort(field) if *field == self.sort_field => ViewState {
                sort_direction: self.sort_direction.toggled(),
                ..self
            },
            Action::SetSort(field) => ViewState {
                sort_field: *field,
                sort_direction: SortDirection::Asc,
                ..self
            },
            Action::SetPage(page) => ViewState {
                current_page: *page,
                ..self
            },
            Action::NextPage => ViewState {
                current_page: self.current_page.saturating_add(1),
                ..self
            },
            Action::PreviousPage => ViewState {
                current_page: self.current_page.saturating_sub(1).max(1),
                ..self
            },
            Action::Reset => ViewState::default(),
        }
    }

    /// Applies `action` and keeps the page inside the result set of
    /// `records`.
    pub fn dispatch(self, action: &Action, records: &[Record]) -> ViewState {
        let next = self.reduce(action);
        let matched = query::filter(
            records,
            &next.search_term,
            next.role_filter,
            next.status_filter,
        )
        .len();
        next.clamp_page(query::page_count(matched, TABLE_PAGE_SIZE))
    }

    /// Pins `current_page` to `[1, max(1, total_pages)]`.
    pub fn clamp_page(self, total_pages: usize) -> ViewState {
        let last = u32::try_from(total_pages.max(1)).unwrap_or(u32::MAX);
        ViewState {
            current_page: self.current_page.clamp(1, last),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::directory;
    use rstest::rstest;

    #[rstest]
    #[case("all", RoleFilter::All)]
    #[case("Admin", RoleFilter::Admin)]
    #[case("MANAGER", RoleFilter::Manager)]
    #[case("user", RoleFilter::User)]
    fn test_role_filter_parses_case_insensitively(#[case] raw: &str, #[case] expected: RoleFilter) {
        assert_eq!(raw.parse::<RoleFilter>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_filter_values_are_rejected() {
        assert!("guest".parse::<RoleFilter>().is_err());
        assert!("archived".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_role_filter_matching() {
        assert!(RoleFilter::All.matches(Role::Manager));
        assert!(RoleFilter::Manager.matches(Role::Manager));
        assert!(!RoleFilter::User.matches(Role::Admin));
    }

    #[test]
    fn test_set_sort_same_field_toggles_direction() {
        let state = ViewState::default().reduce(&Action::SetSort(SortField::Name));
        assert_eq!(state.sort_field, SortField::Name);
        assert_eq!(state.sort_direction, SortDirection::Desc);

        let state = state.reduce(&Action::SetSort(SortField::Name));
        assert_eq!(state.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_set_sort_new_field_starts_ascending() {
        let state = ViewState::default()
            .reduce(&Action::SetSort(SortField::Name))
            .reduce(&Action::SetSort(SortField::Email));
        assert_eq!(state.sort_field, SortField::Email);
        assert_eq!(state.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let state = ViewState::default()
            .reduce(&Action::SetSearch("bob".to_string()))
            .reduce(&Action::SetRoleFilter(RoleFilter::Manager))
            .reduce(&Action::SetStatusFilter(StatusFilter::Inactive))
            .reduce(&Action::SetSort(SortField::LastLogin))
            .reduce(&Action::SetPage(2))
            .reduce(&Action::Reset);
        assert_eq!(state, ViewState::default());
    }

    #[test]
    fn test_reduce_does_not_clamp_page() {
        let state = ViewState::default()
            .reduce(&Action::SetPage(2))
            .reduce(&Action::SetSearch("jane".to_string()));
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_dispatch_clamps_page_when_result_set_shrinks() {
        let state = ViewState::default()
            .dispatch(&Action::SetPage(2), directory())
            .dispatch(&Action::SetSearch("jane".to_string()), directory());
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_dispatch_keeps_page_one_when_nothing_matches() {
        let action = Action::SetSearch("nobody".to_string());
        let state = ViewState::default().dispatch(&action, directory());
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_next_page_stops_at_last_page() {
        let state = ViewState::default()
            .dispatch(&Action::NextPage, directory())
            .dispatch(&Action::NextPage, directory())
            .dispatch(&Action::NextPage, directory());
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_previous_page_stops_at_first_page() {
        let state = ViewState::default().reduce(&Action::PreviousPage);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_actions_replay_from_json() {
        let log = r#"[
            {"action": "setSearch", "value": "e"},
            {"action": "setRoleFilter", "value": "manager"},
            {"action": "setSort", "value": "lastLogin"},
            {"action": "setSort", "value": "lastLogin"},
            {"action": "nextPage"}
        ]"#;
        let actions: Vec<Action> = serde_json::from_str(log).unwrap();
        let state = actions
            .iter()
            .fold(ViewState::default(), |state, action| state.dispatch(action, directory()));

        assert_eq!(state.search_term, "e");
        assert_eq!(state.role_filter, RoleFilter::Manager);
        assert_eq!(state.sort_field, SortField::LastLogin);
        assert_eq!(state.sort_direction, SortDirection::Desc);
        assert_eq!(state.current_page, 1);
    }
}
