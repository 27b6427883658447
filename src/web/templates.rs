use askama::Template;

use pontonovo::admin::AdminSnapshot;
use pontonovo::models::{Flyer, OwnBrand, Store};
use pontonovo::site::{Shell, CONTACT_ADDRESS, CONTACT_PHONE, OPENING_HOURS};

/// Footer contact lines, shared by every public page.
pub struct Contact {
    pub phone: &'static str,
    pub address: &'static str,
    pub hours: &'static str,
}

pub const CONTACT: Contact = Contact {
    phone: CONTACT_PHONE,
    address: CONTACT_ADDRESS,
    hours: OPENING_HOURS,
};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub shell: Shell,
    pub contact: Contact,
    pub images: Vec<String>,
    pub current: usize,
    pub rotation_ms: u64,
}

#[derive(Template)]
#[template(path = "stores.html")]
pub struct StoresTemplate {
    pub shell: Shell,
    pub contact: Contact,
    pub stores: Vec<Store>,
    pub empty_message: &'static str,
}

#[derive(Template)]
#[template(path = "promotions.html")]
pub struct PromotionsTemplate {
    pub shell: Shell,
    pub contact: Contact,
    pub flyers: Vec<Flyer>,
    pub empty_message: &'static str,
}

#[derive(Template)]
#[template(path = "own_brands.html")]
pub struct OwnBrandsTemplate {
    pub shell: Shell,
    pub contact: Contact,
    pub brands: Vec<OwnBrand>,
    pub empty_message: &'static str,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub snapshot: AdminSnapshot,
    pub logo_url: String,
    pub error: Option<String>,
}

pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub multiline: bool,
    pub numeric: bool,
}

#[derive(Template)]
#[template(path = "admin/draft_form.html")]
pub struct DraftFormTemplate {
    pub title: String,
    pub slug: &'static str,
    /// Empty for a record that has not been saved yet.
    pub id: String,
    pub image_url: String,
    pub fields: Vec<FormField>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub noun: &'static str,
    pub slug: &'static str,
    pub id: String,
    pub label: String,
    pub error: Option<String>,
}
