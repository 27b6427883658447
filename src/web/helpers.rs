use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use askama::Template;

use pontonovo::common::{AdminError, UploadError};
use pontonovo::site::{Shell, TapGesture};

use crate::web::state::AppState;

/// Cookie holding the hidden gesture count for this browser.
pub const GESTURE_COOKIE: &str = "pn_taps";

pub fn render<T: Template>(t: T) -> HttpResponse {
    render_status(StatusCode::OK, t)
}

pub fn render_status<T: Template>(status: StatusCode, t: T) -> HttpResponse {
    match t.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body(format!("Template error: {e}")),
    }
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// Layout chrome for the page being served. The logo is fetched per request.
pub async fn shell(state: &AppState, req: &HttpRequest) -> Shell {
    let logo = state.pages.logo().await;
    Shell::new(Some(logo.as_str()), req.path())
}

pub fn read_gesture(req: &HttpRequest) -> TapGesture {
    let count = req
        .cookie(GESTURE_COOKIE)
        .and_then(|c| c.value().trim().parse::<u32>().ok())
        .unwrap_or_default();
    TapGesture::from_count(count)
}

/// Session cookie: no max-age, so counts last as long as the browser does.
pub fn gesture_cookie(gesture: TapGesture) -> Cookie<'static> {
    Cookie::build(GESTURE_COOKIE, gesture.count().to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Only same-site absolute paths are accepted as redirect targets.
pub fn local_path(target: Option<&str>) -> &str {
    match target {
        Some(p) if p.starts_with('/') && !p.starts_with("//") && !p.contains('\\') => p,
        _ => "/",
    }
}

pub fn admin_error_status(err: &AdminError) -> StatusCode {
    match err {
        AdminError::Editor(_) => StatusCode::BAD_REQUEST,
        AdminError::NotFound { .. } => StatusCode::NOT_FOUND,
        AdminError::Upload(UploadError::Transport(_)) => StatusCode::BAD_GATEWAY,
        AdminError::Upload(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AdminError::Fetch(_) | AdminError::Save(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Portuguese caption for a form field.
pub fn field_label(field: &str) -> &str {
    match field {
        "short_name" => "Nome curto",
        "name" => "Nome",
        "address" => "Endereço",
        "neighborhood" => "Bairro",
        "city" => "Cidade",
        "phone" => "Telefone",
        "hours" => "Horário",
        "image_url" => "URL da imagem",
        "maps_url" => "Link do mapa",
        "description" => "Descrição",
        "order" => "Ordem",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_path_rejects_offsite_targets() {
        assert_eq!(local_path(Some("/stores")), "/stores");
        assert_eq!(local_path(Some("//evil.example")), "/");
        assert_eq!(local_path(Some("https://evil.example")), "/");
        assert_eq!(local_path(None), "/");
    }
}
