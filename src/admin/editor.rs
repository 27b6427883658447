//! Draft editing for stores and private-label brands.

use crate::client::{EntityClient, Uploader, UploadFile};
use crate::common::{EditorError, SaveError, UploadError};
use crate::models::Entity;

/// A record kind that the admin panel edits through a draft form.
pub trait Editable: Entity + Default {
    /// Form fields, in display order.
    const FIELDS: &'static [&'static str];

    /// Sort spec used when listing the collection.
    const SORT: Option<&'static str>;

    /// Template used by "create new". `existing` is the current collection.
    fn blank(existing: &[Self]) -> Self;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), EditorError>;

    fn set_image_url(&mut self, url: String);

    fn set_id(&mut self, id: String);

    /// Short name shown in lists and confirmation prompts.
    fn label(&self) -> &str;
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EditorState<D> {
    Idle,
    Editing(D),
    Saving(D),
}

/// Holds at most one draft and walks it through
/// `Idle -> Editing -> Saving -> Idle`.
#[derive(Debug, Clone)]
pub struct Editor<D> {
    state: EditorState<D>,
}

impl<D> Default for Editor<D> {
    fn default() -> Self {
        Self {
            state: EditorState::Idle,
        }
    }
}

impl<D: Editable> Editor<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up a draft that was carried outside the editor, e.g. in a
    /// submitted form.
    pub fn resume(draft: D) -> Self {
        Self {
            state: EditorState::Editing(draft),
        }
    }

    pub fn state(&self) -> &EditorState<D> {
        &self.state
    }

    pub fn draft(&self) -> Option<&D> {
        match &self.state {
            EditorState::Idle => None,
            EditorState::Editing(d) | EditorState::Saving(d) => Some(d),
        }
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.state, EditorState::Saving(_))
    }

    /// Starts a blank draft. An open draft is replaced.
    pub fn create_new(&mut self, existing: &[D]) -> Result<&D, EditorError> {
        self.open(D::blank(existing))
    }

    /// Starts editing a copy of `record`. An open draft is replaced.
    pub fn edit(&mut self, record: &D) -> Result<&D, EditorError> {
        self.open(record.clone())
    }

    fn open(&mut self, draft: D) -> Result<&D, EditorError> {
        if self.is_saving() {
            return Err(EditorError::SaveInProgress);
        }
        self.state = EditorState::Editing(draft);
        self.draft().ok_or(EditorError::NotEditing)
    }

    fn editing_mut(&mut self) -> Result<&mut D, EditorError> {
        match &mut self.state {
            EditorState::Editing(d) => Ok(d),
            EditorState::Saving(_) => Err(EditorError::SaveInProgress),
            EditorState::Idle => Err(EditorError::NotEditing),
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), EditorError> {
        self.editing_mut()?.set_field(field, value)
    }

    /// Uploads `file` and points the draft at it. On failure the draft is
    /// left as it was.
    pub async fn upload_image(
        &mut self,
        uploader: &dyn Uploader,
        file: UploadFile,
    ) -> Result<String, EditorUploadError> {
        self.editing_mut()?;
        let stored = uploader.upload(file).await?;
        self.editing_mut()?.set_image_url(stored.url.clone());
        Ok(stored.url)
    }

    /// Drops the draft without touching the backend.
    pub fn cancel(&mut self) {
        self.state = EditorState::Idle;
    }

    /// Creates or updates the draft depending on whether it has an id.
    ///
    /// On success the editor is idle again and the stored record is
    /// returned. On failure the editor is back in `Editing` with the same
    /// draft.
    pub async fn save(&mut self, client: &EntityClient<D>) -> Result<D, EditorSaveError> {
        let draft = match std::mem::replace(&mut self.state, EditorState::Idle) {
            EditorState::Editing(d) => d,
            EditorState::Saving(d) => {
                self.state = EditorState::Saving(d);
                return Err(EditorError::SaveInProgress.into());
            }
            EditorState::Idle => return Err(EditorError::NotEditing.into()),
        };

        self.state = EditorState::Saving(draft.clone());
        let result = match draft.id() {
            Some(id) => client.update(id, &draft).await,
            None => client.create(&draft).await,
        };

        match result {
            Ok(saved) => {
                self.state = EditorState::Idle;
                Ok(saved)
            }
            Err(e) => {
                self.state = EditorState::Editing(draft);
                Err(e.into())
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EditorUploadError {
    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

#[derive(Debug, thiserror::Error)]
pub enum EditorSaveError {
    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Save(#[from] SaveError),
}

impl From<EditorUploadError> for crate::common::AdminError {
    fn from(e: EditorUploadError) -> Self {
        match e {
            EditorUploadError::Editor(e) => e.into(),
            EditorUploadError::Upload(e) => e.into(),
        }
    }
}

impl From<EditorSaveError> for crate::common::AdminError {
    fn from(e: EditorSaveError) -> Self {
        match e {
            EditorSaveError::Editor(e) => e.into(),
            EditorSaveError::Save(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MemoryBackend, MemoryUploader};
    use crate::models::{OwnBrand, Store};
    use std::sync::Arc;

    fn image(name: &str) -> UploadFile {
        UploadFile::new(name, Some("image/jpeg".into()), vec![1, 2, 3])
    }

    #[test]
    fn test_create_new_store_is_blank_without_id() {
        let mut editor = Editor::<Store>::new();
        let draft = editor.create_new(&[]).unwrap();
        assert_eq!(draft, &Store::default());
        assert!(draft.id.is_none());
    }

    #[test]
    fn test_create_new_brand_is_ordered_last() {
        let existing = vec![OwnBrand::default(), OwnBrand::default()];
        let mut editor = Editor::<OwnBrand>::new();
        assert_eq!(editor.create_new(&existing).unwrap().order, 2);
    }

    #[test]
    fn test_field_change_requires_open_draft() {
        let mut editor = Editor::<Store>::new();
        assert_eq!(
            editor.set_field("phone", "123"),
            Err(EditorError::NotEditing)
        );

        editor.create_new(&[]).unwrap();
        editor.set_field("phone", "(19) 3851-5530").unwrap();
        assert_eq!(editor.draft().unwrap().phone, "(19) 3851-5530");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut editor = Editor::<Store>::resume(Store::default());
        assert_eq!(
            editor.set_field("owner", "x"),
            Err(EditorError::UnknownField("owner".into()))
        );
    }

    #[test]
    fn test_brand_order_must_be_numeric() {
        let mut editor = Editor::<OwnBrand>::resume(OwnBrand::default());
        assert!(matches!(
            editor.set_field("order", "first"),
            Err(EditorError::InvalidValue { .. })
        ));
        editor.set_field("order", " 4 ").unwrap();
        assert_eq!(editor.draft().unwrap().order, 4);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut editor = Editor::<Store>::new();
        editor.create_new(&[]).unwrap();
        editor.cancel();
        assert_eq!(editor.state(), &EditorState::Idle);
    }

    #[tokio::test]
    async fn test_image_upload_sets_image_url() {
        let uploader = MemoryUploader::new();
        let mut editor = Editor::<Store>::resume(Store::default());

        let url = editor.upload_image(&uploader, image("loja.jpg")).await.unwrap();
        assert_eq!(editor.draft().unwrap().image_url, url);
        assert_eq!(uploader.stored(), ["loja.jpg"]);
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_draft_unchanged() {
        let uploader = MemoryUploader::unavailable();
        let mut draft = Store::default();
        draft.image_url = "https://cdn/old.jpg".into();
        let mut editor = Editor::resume(draft.clone());

        let result = editor.upload_image(&uploader, image("new.jpg")).await;
        assert!(matches!(result, Err(EditorUploadError::Upload(_))));
        assert_eq!(editor.state(), &EditorState::Editing(draft));
    }

    #[tokio::test]
    async fn test_save_new_draft_creates_record() {
        let backend = Arc::new(MemoryBackend::new());
        let client = EntityClient::<Store>::new(backend.clone());
        let mut editor = Editor::<Store>::new();
        editor.create_new(&[]).unwrap();
        editor.set_field("short_name", "SPN Loja 1").unwrap();

        let saved = editor.save(&client).await.unwrap();
        assert!(saved.id.is_some());
        assert_eq!(saved.short_name, "SPN Loja 1");
        assert_eq!(editor.state(), &EditorState::Idle);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft_editing() {
        let backend = Arc::new(MemoryBackend::new());
        let client = EntityClient::<Store>::new(backend);
        let draft = Store {
            id: Some("missing".into()),
            short_name: "Loja 9".into(),
            ..Store::default()
        };
        let mut editor = Editor::resume(draft.clone());

        let result = editor.save(&client).await;
        assert!(matches!(
            result,
            Err(EditorSaveError::Save(SaveError::Update { .. }))
        ));
        assert_eq!(editor.state(), &EditorState::Editing(draft));
    }

    #[tokio::test]
    async fn test_save_while_idle_is_rejected() {
        let client = EntityClient::<Store>::new(Arc::new(MemoryBackend::new()));
        let mut editor = Editor::<Store>::new();
        assert!(matches!(
            editor.save(&client).await,
            Err(EditorSaveError::Editor(EditorError::NotEditing))
        ));
    }
}
