use actix_web::{get, web, HttpRequest, Responder};

use pontonovo::site::{NO_OWN_BRANDS_MESSAGE, NO_PROMOTIONS_MESSAGE, NO_STORES_MESSAGE};

use crate::web::forms::HomeQuery;
use crate::web::helpers::{render, shell};
use crate::web::state::AppState;
use crate::web::templates::{
    HomeTemplate, OwnBrandsTemplate, PromotionsTemplate, StoresTemplate, CONTACT,
};

#[get("/")]
pub async fn home(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<HomeQuery>,
) -> impl Responder {
    let shell = shell(&state, &req).await;
    let carousel = state.pages.home().await;
    let carousel = match query.slide {
        Some(ticks) => carousel.at_tick(ticks),
        None => carousel,
    };

    render(HomeTemplate {
        shell,
        contact: CONTACT,
        current: carousel.index(),
        images: carousel.images().to_vec(),
        rotation_ms: state.rotation_ms,
    })
}

#[get("/stores")]
pub async fn stores(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let shell = shell(&state, &req).await;
    render(StoresTemplate {
        shell,
        contact: CONTACT,
        stores: state.pages.stores().await,
        empty_message: NO_STORES_MESSAGE,
    })
}

#[get("/promotions")]
pub async fn promotions(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let shell = shell(&state, &req).await;
    render(PromotionsTemplate {
        shell,
        contact: CONTACT,
        flyers: state.pages.promotions().await,
        empty_message: NO_PROMOTIONS_MESSAGE,
    })
}

#[get("/own-brands")]
pub async fn own_brands(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let shell = shell(&state, &req).await;
    render(OwnBrandsTemplate {
        shell,
        contact: CONTACT,
        brands: state.pages.own_brands().await,
        empty_message: NO_OWN_BRANDS_MESSAGE,
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(stores)
        .service(promotions)
        .service(own_brands);
}
