use serde::{Deserialize, Serialize};

use super::ssl_mode::SslMode;

pub const DEFAULT_PORT: u16 = 5432;

/// A named data source as stored in the config file.
///
/// When `url` is non-empty it wins over every discrete field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionProfile {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub database: String,
    pub sslmode: SslMode,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub readonly: bool,
}

impl Default for ConnectionProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            host: String::new(),
            port: DEFAULT_PORT,
            user: String::new(),
            password: String::new(),
            database: String::new(),
            sslmode: SslMode::default(),
            url: String::new(),
            readonly: false,
        }
    }
}

impl ConnectionProfile {
    pub fn has_target(&self) -> bool {
        !self.url.trim().is_empty() || !self.host.trim().is_empty()
    }

    /// Short description for lists: the masked url, or host:port/database
    pub fn endpoint(&self) -> String {
        if self.url.is_empty() {
            format!("{}:{}/{}", self.host, self.port, self.database)
        } else {
            mask_url_password(&self.url)
        }
    }

    /// Password is URL-encoded for special characters. `sslmode` is the
    /// negotiation mode; certificate checks are left to the TLS connector.
    pub fn to_dsn(&self) -> String {
        if !self.url.is_empty() {
            return self.url.clone();
        }
        let encoded_password = urlencoding::encode(&self.password);
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.user,
            encoded_password,
            self.host,
            self.port,
            self.database,
            self.sslmode.dsn_mode()
        )
    }

    /// For logging - password replaced with ****
    pub fn to_masked_dsn(&self) -> String {
        if !self.url.is_empty() {
            return mask_url_password(&self.url);
        }
        format!(
            "postgres://{}:****@{}:{}/{}?sslmode={}",
            self.user,
            self.host,
            self.port,
            self.database,
            self.sslmode.dsn_mode()
        )
    }
}

fn mask_url_password(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let rest = &url[scheme_end + 3..];
    let Some(at) = rest.rfind('@') else {
        return url.to_string();
    };
    let userinfo = &rest[..at];
    match userinfo.find(':') {
        Some(colon) => format!(
            "{}{}:****{}",
            &url[..scheme_end + 3],
            &userinfo[..colon],
            &rest[at..]
        ),
        None => url.to_string(),
    }
}
