use pontonovo::admin::AdminController;
use pontonovo::site::SitePages;

#[derive(Clone)]
pub struct AppState {
    pub pages: SitePages,
    pub admin: AdminController,
    pub rotation_ms: u64,
}
