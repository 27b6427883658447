use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

/// Setting key holding the site logo URL.
pub const LOGO_KEY: &str = "logo";

/// Logo shown when no `logo` setting exists.
pub const DEFAULT_LOGO: &str = "/static/logo.svg";

/// Generic key/value row. At most one row per `key` is intended.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Setting {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: None,
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn logo(url: impl Into<String>) -> Self {
        Self::new(LOGO_KEY, url)
    }
}

impl Entity for Setting {
    const KIND: EntityKind = EntityKind::Setting;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Resolves the logo URL from a settings list; empty values count as absent.
pub fn logo_from_settings(settings: &[Setting]) -> Option<&str> {
    settings
        .iter()
        .find(|s| s.key == LOGO_KEY)
        .map(|s| s.value.as_str())
        .filter(|v| !v.is_empty())
}
