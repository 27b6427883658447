use crate::models::DEFAULT_LOGO;

pub const CONTACT_PHONE: &str = "(19) 3851-5530";
pub const CONTACT_ADDRESS: &str = "Av. Emilia Marchi Martini, 199";
pub const OPENING_HOURS: &str = "Segunda à Domingo: 7h às 21h";

/// Public pages reachable from the navigation bar.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Route {
    Home,
    Stores,
    OwnBrands,
    Promotions,
}

impl Route {
    pub const ALL: [Route; 4] = [Self::Home, Self::Stores, Self::OwnBrands, Self::Promotions];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Stores => "/stores",
            Self::OwnBrands => "/own-brands",
            Self::Promotions => "/promotions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Início",
            Self::Stores => "Lojas",
            Self::OwnBrands => "Marcas Próprias",
            Self::Promotions => "Ofertas",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Chrome shared by every public page.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Shell {
    pub logo_url: String,
    pub nav: Vec<NavLink>,
    /// Where the gesture form sends the browser back to.
    pub path: String,
}

impl Shell {
    pub fn new(logo_url: Option<&str>, path: &str) -> Self {
        let current = Route::from_path(path);
        let nav = Route::ALL
            .into_iter()
            .map(|r| NavLink {
                label: r.label(),
                href: r.path(),
                active: Some(r) == current,
            })
            .collect();

        Self {
            logo_url: logo_url.unwrap_or(DEFAULT_LOGO).to_string(),
            nav,
            path: path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_route_is_highlighted() {
        let shell = Shell::new(None, "/stores/");
        let active: Vec<_> = shell.nav.iter().filter(|l| l.active).map(|l| l.label).collect();
        assert_eq!(active, ["Lojas"]);
        assert_eq!(shell.logo_url, DEFAULT_LOGO);
    }

    #[test]
    fn test_unknown_path_highlights_nothing() {
        let shell = Shell::new(Some("https://cdn/logo.png"), "/admin");
        assert!(shell.nav.iter().all(|l| !l.active));
        assert_eq!(shell.logo_url, "https://cdn/logo.png");
    }
}
