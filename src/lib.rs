pub mod api_docs;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod shared_state;
pub mod telemetry;

use axum::{response::Html, routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::routes::calculator_routes::api_routes;
use crate::shared_state::AppState;

pub use crate::error::EngineError;
pub use crate::models::solar::{
    CapacityInput, CapacityResult, DimensioningInput, DimensioningResult, InstallationSurface,
    ProductionInput, ProductionResult,
};
pub use crate::services::solar_engine::{InputLimits, SolarEngine};

/// Full HTTP application: `/api`, the Scalar UI and the static frontend.
pub fn build_app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .nest("/api", api_routes(state))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        build_app(AppState::new(Config::default()))
    }

    async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let resp = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_production_route() {
        let (status, json) = post_json(
            "/api/production",
            serde_json::json!({ "installed_capacity_kwp": 5.5, "peak_sun_hours": 5.5, "system_efficiency": 0.85 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["display"]["yearly_energy_kwh"], "9385");
    }

    #[tokio::test]
    async fn test_capacity_route_domain_error() {
        let (status, json) = post_json(
            "/api/capacity",
            serde_json::json!({ "monthly_energy_target_kwh": 350.0, "peak_sun_hours": 5.5, "system_efficiency": 0.0 }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "DomainError");
    }

    #[tokio::test]
    async fn test_capacity_route_zero_peak_sun_hours() {
        let (status, json) = post_json(
            "/api/capacity",
            serde_json::json!({ "monthly_energy_target_kwh": 350.0, "peak_sun_hours": 0.0, "system_efficiency": 0.85 }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "DomainError");
    }

    #[tokio::test]
    async fn test_dimensioning_route_invalid_surface() {
        let (status, json) = post_json(
            "/api/dimensioning",
            serde_json::json!({
                "capacity_kwp": 5.0,
                "module_height_m": 2.0,
                "module_width_m": 1.2,
                "module_power_w": 550.0,
                "installation_surface": "thatch"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "InvalidEnumError");
    }

    #[tokio::test]
    async fn test_dimensioning_route() {
        let (status, json) = post_json(
            "/api/dimensioning",
            serde_json::json!({
                "capacity_kwp": 5.0,
                "module_height_m": 2.0,
                "module_width_m": 1.2,
                "module_power_w": 550.0,
                "installation_surface": "metallic"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["module_count"], 10);
        assert_eq!(json["capacity_source"], "explicit");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, json) = post_json("/api/production", serde_json::json!({ "installed_capacity_kwp": "five" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "BadRequest");
    }

    #[tokio::test]
    async fn test_defaults_route() {
        let resp = app()
            .oneshot(Request::builder().uri("/api/calculator/defaults").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["peak_sun_hours"]["default"], 5.5);
        assert_eq!(json["installation_surfaces"][3], "ground");
    }
}
