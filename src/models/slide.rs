use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

fn default_active() -> bool {
    true
}

/// Home page carousel slide.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Promotional flyer shown on the promotions page.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Entity for Banner {
    const KIND: EntityKind = EntityKind::Banner;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Entity for Flyer {
    const KIND: EntityKind = EntityKind::Flyer;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// The two image-only collections managed by direct upload.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Banner,
    Flyer,
}

impl SlideKind {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Banner => EntityKind::Banner,
            Self::Flyer => EntityKind::Flyer,
        }
    }

    /// New slides are appended after the existing ones.
    pub fn new_slide(&self, image_url: String, existing: usize) -> SlideDraft {
        SlideDraft {
            image_url,
            order: existing as i64,
            active: true,
        }
    }
}

impl std::str::FromStr for SlideKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "banner" | "banners" => Ok(Self::Banner),
            "flyer" | "flyers" => Ok(Self::Flyer),
            _ => Err(format!("invalid slide kind: {}", s)),
        }
    }
}

/// Fields of a slide before the backend has stored it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SlideDraft {
    pub image_url: String,
    pub order: i64,
    pub active: bool,
}

impl From<SlideDraft> for Banner {
    fn from(d: SlideDraft) -> Self {
        Self {
            id: None,
            image_url: d.image_url,
            order: d.order,
            active: d.active,
        }
    }
}

impl From<SlideDraft> for Flyer {
    fn from(d: SlideDraft) -> Self {
        Self {
            id: None,
            image_url: d.image_url,
            order: d.order,
            active: d.active,
        }
    }
}
