use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready once the question cache holds a batch, so requests no longer pay
/// generation latency.
#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let populated = state.question_service.is_cache_populated();
    let prefetch = state.prefetch();

    let response = serde_json::json!({
        "status": if populated { "ready" } else { "warming" },
        "version": env!("CARGO_PKG_VERSION"),
        "cache_populated": populated,
        "refill_in_flight": prefetch.is_in_flight(),
        "refills": prefetch.stats()
    });

    if populated {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
