use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse, Responder};

use pontonovo::admin::AdminSnapshot;
use pontonovo::common::{AdminError, UploadError};
use pontonovo::log_err;
use pontonovo::models::{SlideKind, DEFAULT_LOGO};

use crate::web::helpers::{admin_error_status, render_status, see_other};
use crate::web::multipart::read_form;
use crate::web::state::AppState;
use crate::web::templates::AdminDashboardTemplate;

/// Renders the dashboard, reloading everything. `error` is shown above the
/// tabs.
pub async fn dashboard_page(
    state: &AppState,
    status: StatusCode,
    error: Option<String>,
) -> HttpResponse {
    let (snapshot, error) = match state.admin.load().await {
        Ok(snapshot) => (snapshot, error),
        Err(e) => {
            log_err!(e, "loading admin dashboard");
            let message = error.unwrap_or_else(|| e.to_string());
            (AdminSnapshot::default(), Some(message))
        }
    };

    let logo_url = snapshot
        .logo_url
        .clone()
        .unwrap_or_else(|| DEFAULT_LOGO.to_string());

    render_status(
        status,
        AdminDashboardTemplate {
            snapshot,
            logo_url,
            error,
        },
    )
}

pub async fn admin_failure(state: &AppState, err: AdminError) -> HttpResponse {
    dashboard_page(state, admin_error_status(&err), Some(err.to_string())).await
}

#[get("/admin")]
pub async fn dashboard(state: web::Data<AppState>) -> impl Responder {
    dashboard_page(&state, StatusCode::OK, None).await
}

#[post("/admin/logo")]
pub async fn upload_logo(state: web::Data<AppState>, multipart: Multipart) -> impl Responder {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => return dashboard_page(&state, StatusCode::BAD_REQUEST, Some(e.to_string())).await,
    };
    let Some(file) = form.file else {
        return admin_failure(&state, UploadError::Empty.into()).await;
    };

    match state.admin.upload_logo(file).await {
        Ok(_) => see_other("/admin#logo"),
        Err(e) => {
            log_err!(e, "uploading logo");
            admin_failure(&state, e).await
        }
    }
}

#[post("/admin/{slides:banners|flyers}/upload")]
pub async fn upload_slide(
    state: web::Data<AppState>,
    path: web::Path<String>,
    multipart: Multipart,
) -> impl Responder {
    let Ok(kind) = path.parse::<SlideKind>() else {
        return HttpResponse::NotFound().body("Not found");
    };
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => return dashboard_page(&state, StatusCode::BAD_REQUEST, Some(e.to_string())).await,
    };
    let Some(file) = form.file else {
        return admin_failure(&state, UploadError::Empty.into()).await;
    };

    match state.admin.add_slide(kind, file).await {
        Ok(_) => see_other(&format!("/admin#{}", kind.kind().slug())),
        Err(e) => {
            log_err!(e, "uploading slide", kind = %kind.kind());
            admin_failure(&state, e).await
        }
    }
}

#[post("/admin/{slides:banners|flyers}/{id}/delete")]
pub async fn delete_slide(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (slides, id) = path.into_inner();
    let Ok(kind) = slides.parse::<SlideKind>() else {
        return HttpResponse::NotFound().body("Not found");
    };

    match state.admin.delete_slide(kind, &id).await {
        Ok(_) => see_other(&format!("/admin#{}", kind.kind().slug())),
        Err(e) => {
            log_err!(e, "deleting slide", kind = %kind.kind(), id = %id);
            admin_failure(&state, e).await
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard)
        .service(upload_logo)
        .service(upload_slide)
        .service(delete_slide);
}
