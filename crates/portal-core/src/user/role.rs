use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The closed set of portal roles.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Teacher,
    Therapist,
    Parents,
}

impl Role {
    /// Localized label used in badges and message headers.
    pub fn label(self) -> &'static str {
        match self {
            Role::Teacher => "教師",
            Role::Therapist => "治療師",
            Role::Parents => "家長",
        }
    }
}

/// A sender role as it arrives on the wire.
///
/// Messages are display-only, so a role outside the known set is kept
/// verbatim instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoleTag {
    Known(Role),
    Unknown(String),
}

impl RoleTag {
    pub fn known(&self) -> Option<Role> {
        match self {
            RoleTag::Known(role) => Some(*role),
            RoleTag::Unknown(_) => None,
        }
    }
}

impl From<Role> for RoleTag {
    fn from(role: Role) -> Self {
        RoleTag::Known(role)
    }
}

impl From<String> for RoleTag {
    fn from(raw: String) -> Self {
        match Role::from_str(&raw) {
            Ok(role) => RoleTag::Known(role),
            Err(_) => RoleTag::Unknown(raw),
        }
    }
}

impl From<RoleTag> for String {
    fn from(tag: RoleTag) -> Self {
        match tag {
            RoleTag::Known(role) => role.to_string(),
            RoleTag::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleTag::Known(role) => write!(f, "{role}"),
            RoleTag::Unknown(raw) => f.write_str(raw),
        }
    }
}

/// Localized label for a wire role; unknown roles fall back to the raw string.
pub fn role_label(tag: &RoleTag) -> &str {
    match tag {
        RoleTag::Known(role) => role.label(),
        RoleTag::Unknown(raw) => raw.as_str(),
    }
}
