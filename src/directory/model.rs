use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// An application registration and the fields the monitor reads from it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRegistration {
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password_credentials: Vec<PasswordCredential>,
}

/// A client secret attached to a registration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCredential {
    #[serde(default)]
    pub key_id: Option<String>,
    #[serde(default)]
    pub end_date_time: Option<DateTime<Utc>>,
}

/// One page of `GET /applications`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: Vec<ApplicationRegistration>,
    #[serde(rename = "@odata.nextLink", default)]
    pub next_link: Option<String>,
}

// Graph sends `null` for empty collections on some tenants.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
