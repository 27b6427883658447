pub mod admin;
pub mod admin_drafts;
pub mod gesture;
pub mod public;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    public::configure(cfg);
    gesture::configure(cfg);
    admin::configure(cfg);
    admin_drafts::configure(cfg);
}
