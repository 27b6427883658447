use serde::{Deserialize, Serialize};

/// Named collection of backend-persisted records.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Banner,
    Flyer,
    Store,
    OwnBrand,
    Setting,
    PromotionSettings,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        Self::Banner,
        Self::Flyer,
        Self::Store,
        Self::OwnBrand,
        Self::Setting,
        Self::PromotionSettings,
        Self::User,
    ];

    /// Collection name as the entity API spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Banner => "Banner",
            Self::Flyer => "Flyer",
            Self::Store => "Store",
            Self::OwnBrand => "OwnBrand",
            Self::Setting => "Setting",
            Self::PromotionSettings => "PromotionSettings",
            Self::User => "User",
        }
    }

    /// Lowercase form used in admin URLs and log fields.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Banner => "banners",
            Self::Flyer => "flyers",
            Self::Store => "stores",
            Self::OwnBrand => "own-brands",
            Self::Setting => "settings",
            Self::PromotionSettings => "promotion-settings",
            Self::User => "users",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for EntityKind {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s) || k.slug() == s)
            .ok_or_else(|| format!("invalid entity kind: {}", s))
    }
}
