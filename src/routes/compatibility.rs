use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{CompatibilityRequest, CompatibilityResponse, ErrorResponse, HealthResponse};
use crate::services::{PostgresClient, ReportCache};
use crate::core::{ReportError, ReportStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: ReportStore,
    /// Read cache for reports; requests work without it
    pub cache: Option<Arc<ReportCache>>,
}

/// Configure all compatibility-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/compatibility", web::post().to(compatibility_for_request))
        .route("/compatibility/{user_id}/{target_user_id}", web::get().to(compatibility_for_path));
}

/// Health check endpoint
async fn health_check(postgres: web::Data<PostgresClient>) -> impl Responder {
    let pg_healthy = postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Compatibility endpoint
///
/// POST /api/v1/compatibility
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "targetUserId": "string"
/// }
/// ```
async fn compatibility_for_request(
    state: web::Data<AppState>,
    req: web::Json<CompatibilityRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for compatibility request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    compatibility(&state, &req.user_id, &req.target_user_id).await
}

/// Compatibility endpoint
///
/// GET /api/v1/compatibility/{userId}/{targetUserId}
async fn compatibility_for_path(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (user_id, target_user_id) = path.into_inner();
    compatibility(&state, &user_id, &target_user_id).await
}

async fn compatibility(state: &AppState, user_id: &str, target_user_id: &str) -> HttpResponse {
    if let Some(cache) = &state.cache {
        match cache.get(user_id, target_user_id).await {
            Ok(Some(report)) => return HttpResponse::Ok().json(CompatibilityResponse::from(&report)),
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read report cache: {}", e),
        }
    }

    tracing::info!("Resolving compatibility: {} -> {}", user_id, target_user_id);

    match state.store.get_or_create(user_id, target_user_id).await {
        Ok(report) => {
            if let Some(cache) = &state.cache {
                if let Err(e) = cache.put(&report).await {
                    tracing::warn!("Failed to cache report: {}", e);
                }
            }

            HttpResponse::Ok().json(CompatibilityResponse::from(&report))
        }
        Err(ReportError::NotFound(missing)) => {
            tracing::info!("Compatibility requested for unknown user {}", missing);
            HttpResponse::NotFound().json(ErrorResponse {
                error: "User not found".to_string(),
                message: format!("User {} does not exist", missing),
                status_code: 404,
            })
        }
        Err(e) => {
            tracing::error!(
                "Failed to resolve compatibility {} -> {}: {}",
                user_id,
                target_user_id,
                e
            );
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to resolve compatibility".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
