//! Data display panel: the user table with search, filters, sorting and
//! pagination, plus card and list views over the same page.
//!
//! Every interaction is turned into an [`Action`] and dispatched against the
//! session's [`ViewState`]. The resulting projection is rendered into the
//! markup regions in one go.

use std::sync::{Arc, Mutex};

use crate::element::{SelectOption, UiElement, on_click, on_text};
use crate::protocol::ToastLevel;
use crate::query::{self, Projection, TABLE_PAGE_SIZE};
use crate::sections::{escape, lock};
use crate::state::AppState;
use crate::users::{Record, Role, Status, directory};
use crate::view_state::{Action, RoleFilter, SortField, StatusFilter, ViewState};

const SEARCH: &str = "search-users";
const ROLE_FILTER: &str = "filter-role";
const STATUS_FILTER: &str = "filter-status";
const RESET: &str = "reset-filters";
const COUNT: &str = "users-count";
const TABLE_VIEW: &str = "users-table-view";
const PAGES: &str = "pagination-pages";
const PREV: &str = "prev-page";
const NEXT: &str = "next-page";
const CARDS: &str = "card-grid";
const LIST: &str = "list-view";

const ROW_ACTIONS: [(&str, &str, &str); 3] = [
    ("view", "View", "👁"),
    ("edit", "Edit", "✎"),
    ("delete", "Delete", "🗑"),
];

/// Table view of one session.
struct UserTable {
    state: AppState,
    records: &'static [Record],
    view: Mutex<ViewState>,
}

impl UserTable {
    fn apply(&self, action: Action) {
        let view = {
            let mut view = lock(&self.view);
            *view = view.clone().dispatch(&action, self.records);
            view.clone()
        };
        tracing::debug!(?action, ?view, "table view changed");
        self.render(&view);
    }

    fn render(&self, view: &ViewState) {
        let projection = query::project(self.records, view);
        let state = &self.state;

        for field in SortField::HEADERS {
            state.set_text(field.button_id(), sort_label(field, view));
        }
        state.set_markup(TABLE_VIEW, table_html(&projection));
        state.set_text(
            COUNT,
            format!("Showing {} of {} users", projection.rows.len(), projection.matched),
        );

        let page = usize::try_from(view.current_page).unwrap_or(usize::MAX);
        state.set_disabled(PREV, page <= 1);
        state.set_disabled(NEXT, page >= projection.total_pages);
        state.set_markup(PAGES, pages_html(projection.total_pages, page));

        state.set_markup(CARDS, cards_html(projection.cards()));
        state.set_markup(LIST, list_html(&projection.rows));
    }
}

fn sort_label(field: SortField, view: &ViewState) -> String {
    if field == view.sort_field {
        format!("{} {}", field.label(), view.sort_direction.indicator())
    } else {
        field.label().to_string()
    }
}

fn avatar(record: &Record) -> String {
    format!(
        r#"<span class="avatar" aria-hidden="true">{}</span>"#,
        escape(&record.initials())
    )
}

fn status_badge(record: &Record) -> String {
    let status = record.status.as_str();
    format!(
        r#"<span class="badge badge-{status}" data-testid="status-badge-{status}">{status}</span>"#
    )
}

fn sort_header(field: SortField) -> String {
    let id = field.button_id();
    format!(r#"<th><ui-button id="{id}" data-testid="{id}" data-variant="ghost"></ui-button></th>"#)
}

fn row_html(record: &Record) -> String {
    let id = record.id;
    let actions: String = ROW_ACTIONS
        .iter()
        .map(|(action, label, _)| {
            format!(
                r#"<ui-button id="{action}-user-{id}" data-testid="{action}-user-{id}"
 data-variant="ghost" aria-label="{label}"></ui-button>"#
            )
        })
        .collect();
    format!(
        r#"<tr id="user-row-{id}" data-testid="user-row-{id}">
<td><div class="user-cell">{avatar}
<span id="user-name-{id}" data-testid="user-name-{id}">{name}</span></div></td>
<td id="user-email-{id}" data-testid="user-email-{id}">{email}</td>
<td id="user-role-{id}" data-testid="user-role-{id}">
<span class="badge badge-outline">{role}</span></td>
<td id="user-status-{id}" data-testid="user-status-{id}">{badge}</td>
<td id="user-lastlogin-{id}" data-testid="user-lastlogin-{id}">{last_login}</td>
<td><div class="row-actions">{actions}</div></td>
</tr>
"#,
        avatar = avatar(record),
        name = escape(record.name),
        email = escape(record.email),
        role = record.role.label(),
        badge = status_badge(record),
        last_login = record.last_login,
    )
}

const EMPTY_ROW: &str = r#"<tr id="users-empty" data-testid="users-empty">
<td colspan="6" class="empty">No users found</td></tr>
"#;

fn table_html(projection: &Projection<'_>) -> String {
    let body: String = if projection.rows.is_empty() {
        EMPTY_ROW.to_string()
    } else {
        projection.rows.iter().map(|record| row_html(record)).collect()
    };
    format!(
        r#"<table id="users-table" data-testid="users-table" class="table">
<thead><tr>{name}{email}{role}<th>Status</th>{last_login}<th>Actions</th></tr></thead>
<tbody>
{body}</tbody>
</table>"#,
        name = sort_header(SortField::Name),
        email = sort_header(SortField::Email),
        role = sort_header(SortField::Role),
        last_login = sort_header(SortField::LastLogin),
    )
}

fn pages_html(total_pages: usize, current: usize) -> String {
    (1..=total_pages)
        .map(|page| {
            let attrs = if page == current {
                r#"class="page-link active" aria-current="page""#
            } else {
                r#"class="page-link""#
            };
            format!(r#"<ui-button id="page-{page}" data-testid="page-{page}" {attrs}></ui-button>"#)
        })
        .collect()
}

fn cards_html(records: &[&Record]) -> String {
    records
        .iter()
        .map(|record| {
            let id = record.id;
            format!(
                r#"<div class="card user-card" id="user-card-{id}" data-testid="user-card-{id}">
<div class="user-cell">{avatar}<div><h4>{name}</h4><p class="muted">{role}</p></div></div>
<p class="muted">{email}</p>
<div class="card-footer">{badge}
<button type="button" class="btn btn-outline btn-sm" id="card-action-{id}"
 data-testid="card-action-{id}">View Profile</button></div>
</div>"#,
                avatar = avatar(record),
                name = escape(record.name),
                role = record.role.label(),
                email = escape(record.email),
                badge = status_badge(record),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn list_html(records: &[&Record]) -> String {
    records
        .iter()
        .map(|record| {
            let id = record.id;
            format!(
                r#"<div class="list-item" id="list-item-{id}" data-testid="list-item-{id}">
<div class="user-cell">{avatar}
<div><h4>{name}</h4><p class="muted">{email} • {role}</p></div></div>
<div class="list-actions">{badge}
<button type="button" class="btn btn-ghost btn-sm" id="list-more-{id}"
 data-testid="list-more-{id}" aria-label="More">⋯</button></div>
</div>"#,
                avatar = avatar(record),
                name = escape(record.name),
                email = escape(record.email),
                role = record.role.label(),
                badge = status_badge(record),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn role_options() -> Vec<SelectOption> {
    let all = RoleFilter::All.as_str();
    std::iter::once(SelectOption::new(all, "All Roles").test_id(format!("role-{all}")))
        .chain(Role::ALL.into_iter().map(|role| {
            let value = role.label().to_ascii_lowercase();
            let test_id = format!("role-{value}");
            SelectOption::new(value, role.label()).test_id(test_id)
        }))
        .collect()
}

fn status_options() -> Vec<SelectOption> {
    let all = SelectOption::new(StatusFilter::All.as_str(), "All Status").test_id("status-all");
    std::iter::once(all)
        .chain(Status::ALL.into_iter().map(|status| {
            let value = status.as_str();
            SelectOption::new(value, status.label()).test_id(format!("status-filter-{value}"))
        }))
        .collect()
}

pub fn install(state: &AppState) {
    let records = directory();
    let table = Arc::new(UserTable {
        state: state.clone(),
        records,
        view: Mutex::new(ViewState::default()),
    });

    let table_for_search = table.clone();
    state.add_element(UiElement::Input {
        id: SEARCH.to_string(),
        value: String::new(),
        on_input: on_text(move |term| {
            table_for_search.apply(Action::SetSearch(term.to_string()))
        }),
    });

    let table_for_role = table.clone();
    state.add_element(UiElement::Select {
        id: ROLE_FILTER.to_string(),
        value: RoleFilter::All.as_str().to_string(),
        options: role_options(),
        on_change: on_text(move |value| match value.parse::<RoleFilter>() {
            Ok(filter) => table_for_role.apply(Action::SetRoleFilter(filter)),
            Err(err) => tracing::debug!(error = %err, "ignoring role filter"),
        }),
    });

    let table_for_status = table.clone();
    state.add_element(UiElement::Select {
        id: STATUS_FILTER.to_string(),
        value: StatusFilter::All.as_str().to_string(),
        options: status_options(),
        on_change: on_text(move |value| match value.parse::<StatusFilter>() {
            Ok(filter) => table_for_status.apply(Action::SetStatusFilter(filter)),
            Err(err) => tracing::debug!(error = %err, "ignoring status filter"),
        }),
    });

    let table_for_reset = table.clone();
    state.add_element(UiElement::button(
        RESET,
        "Reset Filters",
        on_click(move || {
            table_for_reset.apply(Action::Reset);
            let state = &table_for_reset.state;
            state.set_value(SEARCH, "");
            state.set_value(ROLE_FILTER, RoleFilter::All.as_str());
            state.set_value(STATUS_FILTER, StatusFilter::All.as_str());
        }),
    ));

    for field in SortField::HEADERS {
        let table_for_sort = table.clone();
        state.add_element(UiElement::button(
            field.button_id(),
            field.label(),
            on_click(move || table_for_sort.apply(Action::SetSort(field))),
        ));
    }

    for (id, text, action) in [
        (PREV, "Previous", Action::PreviousPage),
        (NEXT, "Next", Action::NextPage),
    ] {
        let table_for_step = table.clone();
        state.add_element(UiElement::button(
            id,
            text,
            on_click(move || table_for_step.apply(action.clone())),
        ));
    }

    // The page count never exceeds the unfiltered one.
    let max_pages = query::page_count(records.len(), TABLE_PAGE_SIZE);
    for page in (1..=max_pages).filter_map(|page| u32::try_from(page).ok()) {
        let table_for_page = table.clone();
        state.add_element(UiElement::button(
            format!("page-{page}"),
            page.to_string(),
            on_click(move || table_for_page.apply(Action::SetPage(page))),
        ));
    }

    for record in records {
        let id = record.id;
        for (action, _, icon) in ROW_ACTIONS {
            let state_for_row = state.clone();
            state.add_element(UiElement::button(
                format!("{action}-user-{id}"),
                icon,
                on_click(move || {
                    let message = format!("{action} action triggered for user {id}");
                    state_for_row.toast(ToastLevel::Info, message)
                }),
            ));
        }
    }

    state.add_element(UiElement::text(COUNT, ""));
    for id in [TABLE_VIEW, PAGES, CARDS, LIST] {
        state.add_element(UiElement::markup(id, ""));
    }

    table.render(&ViewState::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ServerMessage;
    use serde_json::json;

    fn markup(state: &AppState, id: &str) -> String {
        match state.get_element(id) {
            Some(UiElement::Markup { html, .. }) => html,
            other => panic!("expected markup, got {other:?}"),
        }
    }

    fn text(state: &AppState, id: &str) -> String {
        match state.get_element(id) {
            Some(UiElement::Text { text, .. } | UiElement::Button { text, .. }) => text,
            other => panic!("expected text, got {other:?}"),
        }
    }

    fn disabled(state: &AppState, id: &str) -> bool {
        matches!(state.get_element(id), Some(UiElement::Button { disabled: true, .. }))
    }

    // Record ids of the table rows, in display order.
    fn row_ids(html: &str) -> Vec<u32> {
        html.match_indices(r#"<tr id="user-row-"#)
            .filter_map(|(start, prefix)| {
                let rest = &html[start + prefix.len()..];
                rest[..rest.find('"')?].parse().ok()
            })
            .collect()
    }

    fn table_rows(state: &AppState) -> Vec<u32> {
        row_ids(&markup(state, TABLE_VIEW))
    }

    #[test]
    fn test_initial_render() {
        let state = AppState::new();
        install(&state);

        assert_eq!(table_rows(&state), vec![4, 3, 5, 6, 7]);
        assert_eq!(text(&state, COUNT), "Showing 5 of 8 users");
        assert_eq!(text(&state, "sort-name"), "Name ▲");
        assert_eq!(text(&state, "sort-email"), "Email");
        assert!(disabled(&state, PREV));
        assert!(!disabled(&state, NEXT));

        let pages = markup(&state, PAGES);
        assert!(pages.contains(
            r#"id="page-1" data-testid="page-1" class="page-link active" aria-current="page""#
        ));
        assert!(pages.contains(r#"id="page-2""#));

        let cards = markup(&state, CARDS);
        assert!(cards.contains(r#"id="user-card-4""#));
        assert!(!cards.contains(r#"id="user-card-8""#));
        state.close();
    }

    #[test]
    fn test_sort_headers_carry_test_ids() {
        let state = AppState::new();
        install(&state);

        let table = markup(&state, TABLE_VIEW);
        for id in ["sort-name", "sort-email", "sort-role", "sort-lastlogin"] {
            assert!(
                table.contains(&format!(r#"id="{id}" data-testid="{id}""#)),
                "missing test id for {id}"
            );
        }
        state.close();
    }

    #[test]
    fn test_filter_options_follow_roles_and_statuses() {
        let state = AppState::new();
        install(&state);

        let options = |id: &str| match state.get_element(id) {
            Some(UiElement::Select { options, .. }) => options
                .into_iter()
                .map(|option| (option.value, option.label, option.test_id))
                .collect::<Vec<_>>(),
            other => panic!("expected select, got {other:?}"),
        };
        let option = |value: &str, label: &str, test_id: &str| {
            (value.to_string(), label.to_string(), Some(test_id.to_string()))
        };

        let roles = options(ROLE_FILTER);
        assert_eq!(roles.len(), Role::ALL.len() + 1);
        assert_eq!(roles[0], option("all", "All Roles", "role-all"));
        assert_eq!(roles[3], option("user", "User", "role-user"));
        for (value, _, _) in &roles {
            assert!(value.parse::<RoleFilter>().is_ok(), "{value} is not a role filter");
        }

        let statuses = options(STATUS_FILTER);
        assert_eq!(statuses.len(), Status::ALL.len() + 1);
        assert_eq!(statuses[0], option("all", "All Status", "status-all"));
        assert_eq!(statuses[2], option("inactive", "Inactive", "status-filter-inactive"));
        for (value, _, _) in &statuses {
            assert!(value.parse::<StatusFilter>().is_ok(), "{value} is not a status filter");
        }
        state.close();
    }

    #[test]
    fn test_search_narrows_to_one_row() {
        let state = AppState::new();
        install(&state);

        state.handle_input(SEARCH, "jane");

        assert_eq!(table_rows(&state), vec![2]);
        assert_eq!(text(&state, COUNT), "Showing 1 of 1 users");
        assert!(disabled(&state, NEXT));
        assert!(!markup(&state, PAGES).contains("page-2"));
        state.close();
    }

    #[test]
    fn test_sort_header_toggles_direction() {
        let state = AppState::new();
        install(&state);

        state.handle_click("sort-name");

        assert_eq!(table_rows(&state)[0], 1);
        assert_eq!(text(&state, "sort-name"), "Name ▼");

        state.handle_click("sort-lastlogin");
        assert_eq!(text(&state, "sort-name"), "Name");
        assert_eq!(text(&state, "sort-lastlogin"), "Last Login ▲");
        assert_eq!(table_rows(&state)[0], 8);
        state.close();
    }

    #[test]
    fn test_role_and_status_filters() {
        let state = AppState::new();
        install(&state);

        state.handle_change(ROLE_FILTER, json!("user"));
        state.handle_change(STATUS_FILTER, json!("active"));

        assert_eq!(table_rows(&state), vec![6, 2]);
        let list = markup(&state, LIST);
        assert!(list.contains(r#"id="list-item-2""#));
        assert!(list.contains(r#"data-testid="status-badge-active""#));
        state.close();
    }

    #[test]
    fn test_filter_with_no_match_renders_empty_row() {
        let state = AppState::new();
        install(&state);

        state.handle_input(SEARCH, "nobody");

        assert!(table_rows(&state).is_empty());
        assert!(markup(&state, TABLE_VIEW).contains(r#"id="users-empty""#));
        assert!(markup(&state, CARDS).is_empty());
        assert!(disabled(&state, PREV));
        assert!(disabled(&state, NEXT));
        state.close();
    }

    #[test]
    fn test_next_page_and_bounds() {
        let state = AppState::new();
        install(&state);

        state.handle_click(NEXT);

        assert_eq!(table_rows(&state), vec![8, 2, 1]);
        assert_eq!(text(&state, COUNT), "Showing 3 of 8 users");
        assert!(!disabled(&state, PREV));
        assert!(disabled(&state, NEXT));

        // disabled arrows swallow the click
        state.handle_click(NEXT);
        assert_eq!(table_rows(&state), vec![8, 2, 1]);

        state.handle_click("page-1");
        assert_eq!(table_rows(&state), vec![4, 3, 5, 6, 7]);
        state.close();
    }

    #[test]
    fn test_page_is_clamped_when_filters_shrink_results() {
        let state = AppState::new();
        install(&state);
        state.handle_click("page-2");

        state.handle_input(SEARCH, "bob");

        assert_eq!(table_rows(&state), vec![3]);
        let pages = markup(&state, PAGES);
        assert!(pages.contains(r#"id="page-1" data-testid="page-1" class="page-link active""#));
        state.close();
    }

    #[test]
    fn test_reset_restores_view_and_widgets() {
        let state = AppState::new();
        install(&state);
        state.handle_input(SEARCH, "e");
        state.handle_change(ROLE_FILTER, json!("manager"));
        state.handle_click("sort-email");

        state.handle_click(RESET);

        assert_eq!(table_rows(&state), vec![4, 3, 5, 6, 7]);
        assert_eq!(text(&state, "sort-name"), "Name ▲");
        assert!(matches!(
            state.get_element(SEARCH),
            Some(UiElement::Input { value, .. }) if value.is_empty()
        ));
        assert!(matches!(
            state.get_element(ROLE_FILTER),
            Some(UiElement::Select { value, .. }) if value == "all"
        ));
        assert!(matches!(
            state.get_element(STATUS_FILTER),
            Some(UiElement::Select { value, .. }) if value == "all"
        ));
        state.close();
    }

    #[test]
    fn test_row_action_toasts() {
        let state = AppState::new();
        install(&state);
        let mut rx = state.subscribe();

        state.handle_click("edit-user-3");

        match rx.try_recv() {
            Ok(ServerMessage::Toast { level, message }) => {
                assert_eq!(level, ToastLevel::Info);
                assert_eq!(message, "edit action triggered for user 3");
            }
            other => panic!("unexpected message: {other:?}"),
        }
        state.close();
    }

    #[test]
    fn test_unknown_select_value_is_ignored() {
        let state = AppState::new();
        install(&state);
        let before = markup(&state, TABLE_VIEW);
        let mut rx = state.subscribe();

        state.handle_change(ROLE_FILTER, json!("guest"));

        assert_eq!(markup(&state, TABLE_VIEW), before);
        // only the select itself changed; no re-render went out
        assert!(rx.try_recv().is_err());
        state.close();
    }

    #[test]
    fn test_row_ids_helper() {
        let html = r#"<tr id="user-row-7" data-testid="user-row-7"></tr>
<tr id="user-row-12"></tr>"#;
        assert_eq!(row_ids(html), vec![7, 12]);
    }
}
