use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{CriteriaError, EventSearch, SearchError};
use crate::models::{ErrorResponse, EventsQuery, HealthResponse, SearchForm};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub search: EventSearch,
}

/// Configure all event-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/events", web::get().to(search_events));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search events endpoint
///
/// GET /events?location=40.7,-74.0&radius=10&startDateTime=2025-04-12T18:00:00&endDateTime=2025-04-12T23:59:59&eventType=Music&timeOfDay=evening
///
/// Response body:
/// ```json
/// { "events": [ { "id": "...", "name": "...", "location": { ... }, ... } ] }
/// ```
async fn search_events(
    state: web::Data<AppState>,
    query: web::Query<EventsQuery>,
) -> impl Responder {
    let query = query.into_inner();

    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for events query: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let form = SearchForm::from(query);

    match state.search.search_form(&form).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(&e),
    }
}

/// Map a search failure to its HTTP response
fn error_response(err: &SearchError) -> HttpResponse {
    match err {
        SearchError::Criteria(CriteriaError::LocationUnavailable) => {
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Location is required".to_string(),
                message: err.to_string(),
                status_code: 400,
            })
        }
        SearchError::Criteria(CriteriaError::InvalidCriteria(_)) => {
            tracing::info!("Rejected search: {}", err);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid search criteria".to_string(),
                message: err.to_string(),
                status_code: 400,
            })
        }
        SearchError::Upstream(e) => {
            tracing::error!("Failed to fetch events (upstream status {:?}): {}", e.status_code(), e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to fetch events".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::UpstreamFetchError;

    #[test]
    fn test_error_statuses() {
        let missing = SearchError::Criteria(CriteriaError::LocationUnavailable);
        assert_eq!(error_response(&missing).status(), 400);

        let invalid = SearchError::Criteria(CriteriaError::InvalidCriteria("bad".into()));
        assert_eq!(error_response(&invalid).status(), 400);

        let upstream = SearchError::Upstream(UpstreamFetchError::Status {
            status: 500,
            body: "boom".to_string(),
        });
        assert_eq!(error_response(&upstream).status(), 502);
    }
}
