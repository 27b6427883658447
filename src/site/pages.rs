use std::sync::Arc;

use crate::client::{EntityBackend, EntityClient};
use crate::common::FetchError;
use crate::log_err;
use crate::models::{
    logo_from_settings, Banner, Entity, Flyer, OwnBrand, Setting, Store, DEFAULT_LOGO,
};

use super::Carousel;

pub const NO_PROMOTIONS_MESSAGE: &str = "Nenhuma oferta disponível no momento.";
pub const NO_OWN_BRANDS_MESSAGE: &str = "Nenhuma marca própria cadastrada.";
pub const NO_STORES_MESSAGE: &str = "Nenhuma loja cadastrada.";

/// Loads what the public pages show. Failures are logged and rendered as
/// empty collections.
#[derive(Clone)]
pub struct SitePages {
    backend: Arc<dyn EntityBackend>,
}

impl SitePages {
    pub fn new(backend: Arc<dyn EntityBackend>) -> Self {
        Self { backend }
    }

    fn client<T: Entity>(&self) -> EntityClient<T> {
        EntityClient::new(Arc::clone(&self.backend))
    }

    /// Logo URL, or the bundled default when unset or unavailable.
    pub async fn logo(&self) -> String {
        let settings = or_empty(self.client::<Setting>().list(None).await);
        logo_from_settings(&settings)
            .unwrap_or(DEFAULT_LOGO)
            .to_string()
    }

    pub async fn home(&self) -> Carousel {
        let banners = or_empty(self.client::<Banner>().list(Some("order")).await);
        Carousel::new(&banners)
    }

    pub async fn stores(&self) -> Vec<Store> {
        or_empty(self.client::<Store>().list(None).await)
    }

    pub async fn promotions(&self) -> Vec<Flyer> {
        or_empty(self.client::<Flyer>().list(Some("order")).await)
    }

    pub async fn own_brands(&self) -> Vec<OwnBrand> {
        or_empty(self.client::<OwnBrand>().list(Some("order")).await)
    }
}

fn or_empty<T>(result: Result<Vec<T>, FetchError>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            log_err!(e, "loading page content", kind = %e.kind);
            Vec::new()
        }
    }
}
