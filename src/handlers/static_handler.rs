use std::{io::ErrorKind, path::Path};

use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError};

async fn serve_asset(
    state: &AppState,
    file_name: &str,
    content_type: &str,
) -> Result<HttpResponse, AppError> {
    let path = Path::new(&state.config.static_dir).join(file_name);

    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(HttpResponse::Ok().content_type(content_type).body(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound(file_name.to_string())),
        Err(e) => Err(e.into()),
    }
}

#[get("/")]
pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    serve_asset(&state, "index.html", "text/html; charset=utf-8").await
}

#[get("/style.css")]
pub async fn stylesheet(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    serve_asset(&state, "style.css", "text/css; charset=utf-8").await
}

#[get("/logo.png")]
pub async fn logo(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    serve_asset(&state, "logo.png", "image/png").await
}
