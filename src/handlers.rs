use crate::error::WeatherError;
use crate::models::WeatherQuery;
use crate::AppState;
use actix_web::{middleware::DefaultHeaders, web, HttpResponse, Responder};
use log::{error, info};
use validator::Validate;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        WeatherError::InvalidRequest(err.to_string()).into()
    }))
    .route("/health", web::get().to(health_check))
    .service(
        web::resource("/weather")
            .route(web::get().to(get_weather))
            .route(web::method(actix_web::http::Method::OPTIONS).to(preflight)),
    );
}

/// Any origin, any method, any header.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "*"))
        .add(("Access-Control-Allow-Headers", "*"))
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "Historic Weather",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn preflight() -> impl Responder {
    HttpResponse::NoContent().finish()
}

async fn get_weather(
    state: web::Data<AppState>,
    pairs: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, WeatherError> {
    let query = WeatherQuery::from_pairs(&pairs);
    query
        .validate()
        .map_err(|e| WeatherError::InvalidRequest(e.to_string()))?;

    info!("🌤️  Weather requested for {} on {}", query.location, query.date);

    let weather = state
        .service
        .get_weather(&query.date, &query.location)
        .await
        .map_err(|e| {
            error!("❌ Weather lookup failed [{}]: {}", e.kind(), e);
            e
        })?;

    Ok(HttpResponse::Ok().json(weather))
}
