use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};
use crate::admin::Editable;
use crate::common::EditorError;

/// Placeholder shown for stores without an uploaded picture.
pub const STORE_PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1578916171728-46686eac8d58?q=80&w=1074";

/// One physical outlet.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub maps_url: String,
}

impl Store {
    pub fn display_image(&self) -> &str {
        if self.image_url.is_empty() {
            STORE_PLACEHOLDER_IMAGE
        } else {
            &self.image_url
        }
    }
}

impl Entity for Store {
    const KIND: EntityKind = EntityKind::Store;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Editable for Store {
    const FIELDS: &'static [&'static str] = &[
        "short_name",
        "name",
        "address",
        "neighborhood",
        "city",
        "phone",
        "hours",
        "image_url",
        "maps_url",
    ];

    const SORT: Option<&'static str> = None;

    fn blank(_existing: &[Self]) -> Self {
        Self::default()
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), EditorError> {
        let slot = match field {
            "short_name" => &mut self.short_name,
            "name" => &mut self.name,
            "address" => &mut self.address,
            "neighborhood" => &mut self.neighborhood,
            "city" => &mut self.city,
            "phone" => &mut self.phone,
            "hours" => &mut self.hours,
            "image_url" => &mut self.image_url,
            "maps_url" => &mut self.maps_url,
            _ => return Err(EditorError::UnknownField(field.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn set_image_url(&mut self, url: String) {
        self.image_url = url;
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn label(&self) -> &str {
        &self.short_name
    }
}
