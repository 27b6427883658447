use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Record};

/// Promotion settings. The schema is owned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromotionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: Record,
}

/// Backend user account. Only listed for completeness, nothing reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: Record,
}

impl Entity for PromotionSettings {
    const KIND: EntityKind = EntityKind::PromotionSettings;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
