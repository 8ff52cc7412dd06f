//! The embedding runtime: session token, user profile, theme and lifecycle hooks.

use crate::error::HostError;
use crate::models::User;
use serde::Deserialize;
use std::fmt;

/// Opaque authentication token attached to every backend request.
#[derive(Clone, PartialEq, Eq)]
pub struct Session(String);

impl Session {
    pub fn new(init_data: impl Into<String>) -> Self {
        Self(init_data.into())
    }

    pub fn init_data(&self) -> &str {
        &self.0
    }

    /// Visible ASCII and tabs only, so the token fits in an HTTP header.
    pub fn is_header_safe(&self) -> bool {
        self.0.bytes().all(|b| b == b'\t' || (0x20..0x7f).contains(&b))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// User profile embedded in the init data by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebAppUser {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl From<&WebAppUser> for User {
    fn from(user: &WebAppUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
        }
    }
}

/// Decoded view of the init-data query string. The signature is carried
/// but never checked here; the backend owns verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitData {
    pub user: Option<WebAppUser>,
    pub query_id: Option<String>,
    pub auth_date: Option<i64>,
    pub hash: Option<String>,
}

impl InitData {
    pub fn parse(raw: &str) -> Result<Self, HostError> {
        if raw.trim().is_empty() {
            return Err(HostError::EmptyInitData);
        }

        let mut data = Self::default();
        for pair in raw.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = decode_component(value)?;
            match key {
                "user" => data.user = Some(serde_json::from_str(&value)?),
                "query_id" => data.query_id = Some(value),
                "auth_date" => {
                    let ts = value
                        .parse()
                        .map_err(|_| HostError::MalformedParameter(format!("auth_date={value}")))?;
                    data.auth_date = Some(ts);
                }
                "hash" => data.hash = Some(value),
                _ => {}
            }
        }
        Ok(data)
    }
}

fn decode_component(value: &str) -> Result<String, HostError> {
    let spaced = value.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|v| v.into_owned())
        .map_err(|e| HostError::MalformedParameter(e.to_string()))
}

/// Everything the app reads from the host at startup.
#[derive(Debug, Clone)]
pub struct HostContext {
    pub session: Session,
    pub user: Option<WebAppUser>,
    pub color_scheme: ColorScheme,
}

pub trait Host {
    /// `None` when the app is not running inside a host.
    fn context(&self) -> Option<HostContext>;
    fn ready(&self);
    fn expand(&self);
    fn disable_vertical_swipes(&self);
}

/// Host backed by values known up front (config file or command line).
#[derive(Debug, Clone)]
pub struct StaticHost {
    init_data: Option<String>,
    color_scheme: ColorScheme,
}

impl StaticHost {
    pub fn new(init_data: Option<String>, color_scheme: ColorScheme) -> Self {
        Self {
            init_data,
            color_scheme,
        }
    }
}

impl Host for StaticHost {
    fn context(&self) -> Option<HostContext> {
        let raw = self.init_data.as_deref().filter(|s| !s.trim().is_empty())?;
        let user = match InitData::parse(raw) {
            Ok(data) => {
                tracing::debug!(
                    query_id = data.query_id.as_deref(),
                    auth_date = data.auth_date,
                    signed = data.hash.is_some(),
                    "Init data parsed"
                );
                data.user
            }
            Err(e) => {
                tracing::warn!("Ignoring user profile from init data: {e}");
                None
            }
        };
        Some(HostContext {
            session: Session::new(raw),
            user,
            color_scheme: self.color_scheme,
        })
    }

    fn ready(&self) {
        tracing::debug!("host: ready");
    }

    fn expand(&self) {
        tracing::debug!("host: expand");
    }

    fn disable_vertical_swipes(&self) {
        tracing::debug!("host: disable vertical swipes");
    }
}
