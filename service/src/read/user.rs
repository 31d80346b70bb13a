//! Operator profile read model.

use serde::{Deserialize, Serialize};

use crate::domain::user;

/// Profile of the signed-in operator.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    /// ID of the operator account.
    pub id: user::Id,

    /// Sign-in name of the operator.
    pub username: String,

    /// Display name of the operator, if set.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Whether the account is allowed to sign in.
    pub is_active: bool,
}
