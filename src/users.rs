//! The hard-coded user directory shown by the data section.
//!
//! Records never change during a session; every view over them is derived
//! by [`crate::query`].

use serde::Serialize;

/// Role assigned to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Admin,
    Manager,
    User,
}

impl Role {
    /// All roles, in the order the role filter lists them.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::User];

    /// Label shown in the table and compared when sorting by role.
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::User => "User",
        }
    }
}

/// Account status of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
    Pending,
}

impl Status {
    /// All statuses, in the order the status filter lists them.
    pub const ALL: [Status; 3] = [Status::Active, Status::Inactive, Status::Pending];

    /// Lowercase wire/display form, also used in badge ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Pending => "pending",
        }
    }

    /// Label shown in the status filter.
    pub fn label(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
            Status::Pending => "Pending",
        }
    }
}

/// A single user row.
///
/// `id` is the stable identity behind every per-row element id
/// (`user-row-<id>`, `view-user-<id>`, ...), independent of where the row
/// ends up after sorting and paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: u32,
    pub name: &'static str,
    pub email: &'static str,
    pub role: Role,
    pub status: Status,
    /// ISO-8601 date (`YYYY-MM-DD`), so string order is date order.
    pub last_login: &'static str,
}

impl Record {
    /// Initials used for the avatar fallback, e.g. "JD" for "John Doe".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

const fn record(
    id: u32,
    name: &'static str,
    email: &'static str,
    role: Role,
    status: Status,
    last_login: &'static str,
) -> Record {
    Record {
        id,
        name,
        email,
        role,
        status,
        last_login,
    }
}

static USERS: [Record; 8] = [
    record(1, "John Doe", "john@example.com", Role::Admin, Status::Active, "2024-01-15"),
    record(2, "Jane Smith", "jane@example.com", Role::User, Status::Active, "2024-01-14"),
    record(3, "Bob Johnson", "bob@example.com", Role::Manager, Status::Inactive, "2024-01-10"),
    record(4, "Alice Brown", "alice@example.com", Role::User, Status::Pending, "2024-01-12"),
    record(5, "Charlie Wilson", "charlie@example.com", Role::Admin, Status::Active, "2024-01-13"),
    record(6, "Diana Davis", "diana@example.com", Role::User, Status::Active, "2024-01-11"),
    record(7, "Edward Miller", "edward@example.com", Role::Manager, Status::Inactive, "2024-01-09"),
    record(8, "Fiona Taylor", "fiona@example.com", Role::User, Status::Pending, "2024-01-08"),
];

/// The full user directory, in its canonical order.
pub fn directory() -> &'static [Record] {
    &USERS
}
