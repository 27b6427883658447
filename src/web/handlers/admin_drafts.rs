//! Store and own-brand editing. The draft travels in the submitted form and
//! is rebuilt into an [`Editor`] on every request.

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde_json::Value;

use pontonovo::admin::{Editable, Editor};
use pontonovo::common::{AdminError, EditorError, UploadError};
use pontonovo::log_err;
use pontonovo::models::{to_record, EntityKind, OwnBrand, Store};

use crate::web::forms::DraftAction;
use crate::web::handlers::admin::admin_failure;
use crate::web::helpers::{admin_error_status, field_label, render, render_status, see_other};
use crate::web::multipart::{read_form, FormData};
use crate::web::state::AppState;
use crate::web::templates::{ConfirmDeleteTemplate, DraftFormTemplate, FormField};

fn noun(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Store => "loja",
        EntityKind::OwnBrand => "marca própria",
        other => other.as_str(),
    }
}

fn dashboard_anchor<D: Editable>() -> String {
    format!("/admin#{}", D::KIND.slug())
}

fn field_value(record: &serde_json::Map<String, Value>, name: &str) -> String {
    match record.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn draft_page<D: Editable>(
    editor: &Editor<D>,
    status: StatusCode,
    error: Option<String>,
) -> HttpResponse {
    let draft = editor.draft().cloned().unwrap_or_default();
    let record = to_record(&draft).unwrap_or_default();
    let id = draft.id().unwrap_or_default().to_string();

    let fields = D::FIELDS
        .iter()
        .map(|&name| FormField {
            name,
            label: field_label(name),
            value: field_value(&record, name),
            multiline: name == "description",
            numeric: name == "order",
        })
        .collect();

    let title = if id.is_empty() {
        format!("Nova {}", noun(D::KIND))
    } else {
        format!("Editar {}", noun(D::KIND))
    };

    render_status(
        status,
        DraftFormTemplate {
            title,
            slug: D::KIND.slug(),
            image_url: field_value(&record, "image_url"),
            id,
            fields,
            error,
        },
    )
}

async fn new_form<D: Editable>(state: web::Data<AppState>) -> HttpResponse {
    match state.admin.create_new::<D>().await {
        Ok(editor) => draft_page(&editor, StatusCode::OK, None),
        Err(e) => {
            log_err!(e, "opening new draft", kind = %D::KIND);
            admin_failure(&state, e).await
        }
    }
}

async fn edit_form<D: Editable>(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    match state.admin.edit::<D>(&id).await {
        Ok(editor) => draft_page(&editor, StatusCode::OK, None),
        Err(e) => {
            log_err!(e, "opening draft", kind = %D::KIND, id = %id);
            admin_failure(&state, e).await
        }
    }
}

/// The draft exactly as the operator submitted it. Nothing is reloaded from
/// the backend, so a record deleted meanwhile still comes back as a draft.
fn submitted_draft<D: Editable>(form: &FormData) -> Editor<D> {
    let mut draft = D::default();
    if let Some(id) = form.text("id").map(str::trim).filter(|id| !id.is_empty()) {
        draft.set_id(id.to_string());
    }
    Editor::resume(draft)
}

/// Applies every submitted field, keeping the valid ones even when another
/// is rejected. Reports the first rejection.
fn apply_fields<D: Editable>(editor: &mut Editor<D>, form: &FormData) -> Result<(), EditorError> {
    let mut rejected = None;
    for field in D::FIELDS {
        if let Some(value) = form.text(field) {
            if let Err(e) = editor.set_field(field, value) {
                rejected.get_or_insert(e);
            }
        }
    }
    rejected.map_or(Ok(()), Err)
}

async fn save<D: Editable>(state: web::Data<AppState>, multipart: Multipart) -> HttpResponse {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    let action = DraftAction::parse(form.text("action"));
    if action == DraftAction::Cancel {
        return see_other(&dashboard_anchor::<D>());
    }

    let mut editor = submitted_draft::<D>(&form);
    if let Err(e) = apply_fields(&mut editor, &form) {
        return draft_page(&editor, StatusCode::BAD_REQUEST, Some(e.to_string()));
    }

    match form.file {
        Some(file) => {
            if let Err(e) = editor.upload_image(state.admin.uploader(), file).await {
                log_err!(e, "uploading draft image", kind = %D::KIND);
                let e = AdminError::from(e);
                return draft_page(&editor, admin_error_status(&e), Some(e.to_string()));
            }
        }
        None if action == DraftAction::Upload => {
            let e = AdminError::from(UploadError::Empty);
            return draft_page(&editor, admin_error_status(&e), Some(e.to_string()));
        }
        None => {}
    }

    if action == DraftAction::Upload {
        return draft_page(&editor, StatusCode::OK, None);
    }

    match state.admin.save(&mut editor).await {
        Ok(_) => see_other(&dashboard_anchor::<D>()),
        // Saved, but the reload afterwards failed.
        Err(e) if editor.draft().is_none() => admin_failure(&state, e).await,
        Err(e) => draft_page(&editor, admin_error_status(&e), Some(e.to_string())),
    }
}

async fn replace_image<D: Editable>(
    state: web::Data<AppState>,
    path: web::Path<String>,
    multipart: Multipart,
) -> HttpResponse {
    let id = path.into_inner();
    let file = match read_form(multipart).await {
        Ok(form) => form.file,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };
    let Some(file) = file else {
        return admin_failure(&state, UploadError::Empty.into()).await;
    };

    match state.admin.replace_image::<D>(&id, file).await {
        Ok(_) => see_other(&dashboard_anchor::<D>()),
        Err(e) => {
            log_err!(e, "replacing image", kind = %D::KIND, id = %id);
            admin_failure(&state, e).await
        }
    }
}

async fn confirm_delete<D: Editable>(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    match state.admin.request_delete::<D>(&id).await {
        Ok(request) => render(ConfirmDeleteTemplate {
            noun: noun(D::KIND),
            slug: D::KIND.slug(),
            id: request.id,
            label: request.label,
            error: None,
        }),
        Err(e) => admin_failure(&state, e).await,
    }
}

async fn delete<D: Editable>(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    let result = match state.admin.request_delete::<D>(&id).await {
        Ok(request) => state.admin.confirm_delete(request).await.map(|_| ()),
        Err(AdminError::NotFound { kind, id }) => {
            tracing::warn!(kind = %kind, id = %id, "delete of missing record ignored");
            Ok(())
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => see_other(&dashboard_anchor::<D>()),
        Err(e) => {
            log_err!(e, "deleting record", kind = %D::KIND, id = %id);
            admin_failure(&state, e).await
        }
    }
}

fn draft_routes<D: Editable>(cfg: &mut web::ServiceConfig) {
    let base = format!("/admin/{}", D::KIND.slug());
    cfg.route(&format!("{base}/new"), web::get().to(new_form::<D>))
        .route(&format!("{base}/save"), web::post().to(save::<D>))
        .route(&format!("{base}/{{id}}/edit"), web::get().to(edit_form::<D>))
        .route(&format!("{base}/{{id}}/image"), web::post().to(replace_image::<D>))
        .service(
            web::resource(format!("{base}/{{id}}/delete"))
                .route(web::get().to(confirm_delete::<D>))
                .route(web::post().to(delete::<D>)),
        );
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    draft_routes::<Store>(cfg);
    draft_routes::<OwnBrand>(cfg);
}
