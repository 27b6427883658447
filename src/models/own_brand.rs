use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};
use crate::admin::Editable;
use crate::common::EditorError;

pub const BRAND_PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1581955957646-b8c15313991e?w=800&q=80";

/// Private-label brand profile.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct OwnBrand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub order: i64,
}

impl OwnBrand {
    pub fn display_image(&self) -> &str {
        if self.image_url.is_empty() {
            BRAND_PLACEHOLDER_IMAGE
        } else {
            &self.image_url
        }
    }
}

impl Entity for OwnBrand {
    const KIND: EntityKind = EntityKind::OwnBrand;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Editable for OwnBrand {
    const FIELDS: &'static [&'static str] = &["name", "description", "image_url", "order"];

    const SORT: Option<&'static str> = Some("order");

    /// New brands go to the end of the list.
    fn blank(existing: &[Self]) -> Self {
        Self {
            order: existing.len() as i64,
            ..Self::default()
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), EditorError> {
        match field {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            "image_url" => self.image_url = value.to_string(),
            "order" => {
                self.order = value.trim().parse().map_err(|_| EditorError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                })?;
            }
            _ => return Err(EditorError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn set_image_url(&mut self, url: String) {
        self.image_url = url;
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn label(&self) -> &str {
        &self.name
    }
}
