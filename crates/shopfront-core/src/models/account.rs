use serde::{Deserialize, Serialize};

/// Body of an account creation request
#[derive(Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RegisterPayload {
    pub username: String,
    pub firstname: String,
    pub email: String,
    pub password: String,
}

// Keep the password out of logs
impl std::fmt::Debug for RegisterPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterPayload")
            .field("username", &self.username)
            .field("firstname", &self.firstname)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Account as returned by the backend after registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Account {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub firstname: Option<String>,
    pub email: String,
}
