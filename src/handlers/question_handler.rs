use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState, errors::AppError, models::dto::response::GenerateQuestionsResponse,
};

#[post("/generate-questions")]
pub async fn generate_questions(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let batch = state.question_service.serve().await?;
    Ok(HttpResponse::Ok().json(GenerateQuestionsResponse::from(batch)))
}
