use actix_web::{post, web, HttpRequest, HttpResponse, Responder};

use pontonovo::site::{GestureOutcome, ADMIN_PATH};

use crate::web::forms::GestureForm;
use crate::web::helpers::{gesture_cookie, local_path, read_gesture};

/// One activation of the hidden footer control.
#[post("/gesture")]
pub async fn activate(req: HttpRequest, form: web::Form<GestureForm>) -> impl Responder {
    let mut gesture = read_gesture(&req);
    let location = match gesture.activate() {
        GestureOutcome::Navigate => {
            tracing::info!("admin gesture completed");
            ADMIN_PATH
        }
        GestureOutcome::Pending(_) => local_path(form.return_to.as_deref()),
    };

    HttpResponse::SeeOther()
        .cookie(gesture_cookie(gesture))
        .insert_header(("Location", location))
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(activate);
}
