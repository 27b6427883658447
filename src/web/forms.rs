use serde::Deserialize;

#[derive(Deserialize)]
pub struct HomeQuery {
    pub slide: Option<u64>,
}

#[derive(Deserialize)]
pub struct GestureForm {
    pub return_to: Option<String>,
}

/// Submit buttons of the draft form.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DraftAction {
    Upload,
    Save,
    Cancel,
}

impl DraftAction {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("upload") => Self::Upload,
            Some("cancel") => Self::Cancel,
            _ => Self::Save,
        }
    }
}
