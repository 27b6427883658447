use std::marker::PhantomData;
use std::sync::Arc;

use crate::client::{EntityBackend, EntityClient, UploadFile, Uploader};
use crate::common::{AdminError, FetchError, SaveError};
use crate::log_err;
use crate::models::{
    logo_from_settings, Banner, Entity, Flyer, OwnBrand, Setting, SlideKind, Store, LOGO_KEY,
};

use super::{Editable, Editor};

/// Every collection the admin panel shows, as loaded in one pass.
#[derive(Debug, Clone, Default)]
pub struct AdminSnapshot {
    pub banners: Vec<Banner>,
    pub flyers: Vec<Flyer>,
    pub stores: Vec<Store>,
    pub brands: Vec<OwnBrand>,
    pub logo_url: Option<String>,
}

/// First phase of a two-phase delete. Holding one is what allows
/// [`AdminController::confirm_delete`]; dropping it is the cancel.
#[derive(Debug, Clone)]
pub struct DeleteRequest<D> {
    pub id: String,
    pub label: String,
    _marker: PhantomData<fn() -> D>,
}

/// Orchestrates the content-management workflow. Holds no per-operator
/// state: drafts live in [`Editor`] values owned by the caller.
#[derive(Clone)]
pub struct AdminController {
    backend: Arc<dyn EntityBackend>,
    uploader: Arc<dyn Uploader>,
}

impl AdminController {
    pub fn new(backend: Arc<dyn EntityBackend>, uploader: Arc<dyn Uploader>) -> Self {
        Self { backend, uploader }
    }

    pub fn client<T: Entity>(&self) -> EntityClient<T> {
        EntityClient::new(Arc::clone(&self.backend))
    }

    pub fn uploader(&self) -> &dyn Uploader {
        self.uploader.as_ref()
    }

    /// Loads all collections concurrently.
    pub async fn load(&self) -> Result<AdminSnapshot, FetchError> {
        let banners = self.client::<Banner>();
        let flyers = self.client::<Flyer>();
        let stores = self.client::<Store>();
        let brands = self.client::<OwnBrand>();
        let settings = self.client::<Setting>();

        let (banners, flyers, stores, brands, settings) = tokio::try_join!(
            banners.list(Some("order")),
            flyers.list(Some("order")),
            stores.list(Store::SORT),
            brands.list(OwnBrand::SORT),
            settings.list(None),
        )?;

        let logo_url = logo_from_settings(&settings).map(str::to_string);
        Ok(AdminSnapshot {
            banners,
            flyers,
            stores,
            brands,
            logo_url,
        })
    }

    /// Uploads a banner or flyer image and appends it after the existing
    /// slides.
    pub async fn add_slide(
        &self,
        kind: SlideKind,
        file: UploadFile,
    ) -> Result<AdminSnapshot, AdminError> {
        let stored = self.uploader.upload(file).await?;

        match kind {
            SlideKind::Banner => {
                let client = self.client::<Banner>();
                let count = client.list(None).await?.len();
                client.create(&kind.new_slide(stored.url, count).into()).await?;
            }
            SlideKind::Flyer => {
                let client = self.client::<Flyer>();
                let count = client.list(None).await?.len();
                client.create(&kind.new_slide(stored.url, count).into()).await?;
            }
        }

        tracing::info!(kind = %kind.kind(), "slide added");
        Ok(self.load().await?)
    }

    pub async fn delete_slide(
        &self,
        kind: SlideKind,
        id: &str,
    ) -> Result<AdminSnapshot, AdminError> {
        let result = match kind {
            SlideKind::Banner => self.client::<Banner>().delete(id).await,
            SlideKind::Flyer => self.client::<Flyer>().delete(id).await,
        };
        absorb_missing(result)?;
        Ok(self.load().await?)
    }

    /// Uploads a new logo and stores it under the `logo` setting.
    ///
    /// Goes through the backend's upsert, so the at-most-one-row guarantee
    /// is exactly as strong as the backend's.
    pub async fn upload_logo(&self, file: UploadFile) -> Result<String, AdminError> {
        let stored = self.uploader.upload(file).await?;
        let saved = self
            .client::<Setting>()
            .upsert_by_key("key", &Setting::logo(stored.url))
            .await?;

        tracing::info!(key = LOGO_KEY, url = %saved.value, "logo updated");
        Ok(saved.value)
    }

    pub async fn find<D: Editable>(&self, id: &str) -> Result<D, AdminError> {
        self.client::<D>()
            .list(D::SORT)
            .await?
            .into_iter()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| AdminError::NotFound {
                kind: D::KIND,
                id: id.to_string(),
            })
    }

    /// Opens an editor on an existing record.
    pub async fn edit<D: Editable>(&self, id: &str) -> Result<Editor<D>, AdminError> {
        let record = self.find::<D>(id).await?;
        let mut editor = Editor::new();
        editor.edit(&record)?;
        Ok(editor)
    }

    /// Opens an editor on a blank record.
    pub async fn create_new<D: Editable>(&self) -> Result<Editor<D>, AdminError> {
        let existing = self.client::<D>().list(D::SORT).await?;
        let mut editor = Editor::new();
        editor.create_new(&existing)?;
        Ok(editor)
    }

    /// Saves the editor's draft, then reloads everything. A failed save
    /// leaves the draft in the editor.
    pub async fn save<D: Editable>(
        &self,
        editor: &mut Editor<D>,
    ) -> Result<(D, AdminSnapshot), AdminError> {
        let saved = match editor.save(&self.client::<D>()).await {
            Ok(saved) => saved,
            Err(e) => {
                log_err!(e, "saving draft", kind = %D::KIND);
                return Err(e.into());
            }
        };

        tracing::info!(kind = %D::KIND, id = saved.id().unwrap_or_default(), "record saved");
        Ok((saved, self.load().await?))
    }

    /// Replaces the image of a stored record, keeping every other field.
    pub async fn replace_image<D: Editable>(
        &self,
        id: &str,
        file: UploadFile,
    ) -> Result<AdminSnapshot, AdminError> {
        let mut editor = self.edit::<D>(id).await?;
        editor.upload_image(self.uploader(), file).await?;
        self.save(&mut editor).await.map(|(_, snapshot)| snapshot)
    }

    pub async fn request_delete<D: Editable>(
        &self,
        id: &str,
    ) -> Result<DeleteRequest<D>, AdminError> {
        let record = self.find::<D>(id).await?;
        Ok(DeleteRequest {
            id: id.to_string(),
            label: record.label().to_string(),
            _marker: PhantomData,
        })
    }

    pub async fn confirm_delete<D: Editable>(
        &self,
        request: DeleteRequest<D>,
    ) -> Result<AdminSnapshot, AdminError> {
        absorb_missing(self.client::<D>().delete(&request.id).await)?;
        tracing::info!(kind = %D::KIND, id = %request.id, "record deleted");
        Ok(self.load().await?)
    }
}

/// Deleting something that is already gone is not an error.
fn absorb_missing(result: Result<(), SaveError>) -> Result<(), SaveError> {
    match result {
        Err(SaveError::Delete { kind, id, source }) if source.is_not_found() => {
            tracing::warn!(kind = %kind, id = %id, "delete of missing record ignored");
            Ok(())
        }
        other => other,
    }
}
