//! The create/edit connection form on the Home screen.

use std::str::FromStr;

use crate::domain::connection::DEFAULT_PORT;
use crate::domain::{ConnectionProfile, SslMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Host,
    Port,
    User,
    Password,
    Database,
    SslMode,
    Url,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Name,
            FormField::Host,
            FormField::Port,
            FormField::User,
            FormField::Password,
            FormField::Database,
            FormField::SslMode,
            FormField::Url,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Host => "Host",
            FormField::Port => "Port",
            FormField::User => "User",
            FormField::Password => "Password",
            FormField::Database => "Database",
            FormField::SslMode => "SSL Mode",
            FormField::Url => "URL",
        }
    }

    fn index(self) -> usize {
        Self::all().iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> FormField {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(self) -> FormField {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Connection name is required")]
    MissingName,
    #[error("Either URL or host is required")]
    MissingTarget,
    #[error("Port must be a number")]
    InvalidPort,
    #[error("Invalid SSL mode")]
    InvalidSslMode,
    #[error("Connection \"{0}\" already exists")]
    DuplicateName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Holds the name the profile had when the form was opened.
    Edit { original: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionForm {
    pub mode: FormMode,
    pub field: FormField,
    values: [String; 8],
    readonly: bool,
}

impl ConnectionForm {
    pub fn create() -> Self {
        let mut form = Self {
            mode: FormMode::Create,
            field: FormField::Name,
            values: Default::default(),
            readonly: false,
        };
        form.values[FormField::Port.index()] = DEFAULT_PORT.to_string();
        form.values[FormField::SslMode.index()] = SslMode::default().to_string();
        form
    }

    pub fn edit(profile: &ConnectionProfile) -> Self {
        Self {
            mode: FormMode::Edit {
                original: profile.name.clone(),
            },
            field: FormField::Name,
            values: [
                profile.name.clone(),
                profile.host.clone(),
                profile.port.to_string(),
                profile.user.clone(),
                profile.password.clone(),
                profile.database.clone(),
                profile.sslmode.to_string(),
                profile.url.clone(),
            ],
            readonly: profile.readonly,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New Connection",
            FormMode::Edit { .. } => "Edit Connection",
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    /// Password is masked.
    pub fn display_value(&self, field: FormField) -> String {
        let value = self.value(field);
        if field == FormField::Password {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.values[self.field.index()].push(c);
    }

    pub fn pop_char(&mut self) {
        self.values[self.field.index()].pop();
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn prev_field(&mut self) {
        self.field = self.field.prev();
    }

    /// Validates the form against the other configured connections.
    pub fn to_profile(&self, existing: &[ConnectionProfile]) -> Result<ConnectionProfile, FormError> {
        let text = |field: FormField| self.value(field).trim().to_string();

        let name = text(FormField::Name);
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let host = text(FormField::Host);
        let url = text(FormField::Url);
        if host.is_empty() && url.is_empty() {
            return Err(FormError::MissingTarget);
        }

        let port = match text(FormField::Port) {
            p if p.is_empty() => DEFAULT_PORT,
            p => p.parse::<u16>().map_err(|_| FormError::InvalidPort)?,
        };
        let sslmode = match text(FormField::SslMode) {
            m if m.is_empty() => SslMode::default(),
            m => SslMode::from_str(&m).map_err(|_| FormError::InvalidSslMode)?,
        };

        let original = match &self.mode {
            FormMode::Create => None,
            FormMode::Edit { original } => Some(original.as_str()),
        };
        if existing
            .iter()
            .any(|p| p.name == name && Some(p.name.as_str()) != original)
        {
            return Err(FormError::DuplicateName(name));
        }

        Ok(ConnectionProfile {
            name,
            host,
            port,
            user: text(FormField::User),
            password: self.value(FormField::Password).to_string(),
            database: text(FormField::Database),
            sslmode,
            url,
            readonly: self.readonly,
        })
    }
}
