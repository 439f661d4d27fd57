use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::middleware::http_logger::{LogContext, http_logger};
use crate::routes;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use http::header;
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    ServiceBuilderExt,
    cors::{AllowOrigin, Any, CorsLayer},
    propagate_header::PropagateHeaderLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Transport settings that do not belong in per-request state.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub swagger_enabled: bool,
    pub cors_allowed_origins: String,
    pub app_env: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            swagger_enabled: false,
            cors_allowed_origins: "*".to_string(),
            app_env: "local".to_string(),
        }
    }
}

impl From<&Config> for HttpOptions {
    fn from(config: &Config) -> Self {
        Self {
            swagger_enabled: config.swagger_enabled,
            cors_allowed_origins: config.cors_allowed_origins.clone(),
            app_env: config.app_env.clone(),
        }
    }
}

fn cors_layer(cors_allowed_origins: &str) -> CorsLayer {
    let allowed_headers = [
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        header::ACCEPT,
        header::ACCEPT_LANGUAGE,
    ];

    let allowed_methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];

    if cors_allowed_origins.trim() == "*" {
        // Credentials cannot be combined with a wildcard origin.
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(allowed_methods)
            .allow_headers(allowed_headers)
            .allow_credentials(false);
    }

    let allowed_origins: HashSet<String> = cors_allowed_origins
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let origins: Vec<http::HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(allowed_methods)
        .allow_headers(allowed_headers)
        .allow_credentials(true)
}

pub fn create_app(state: AppState, options: &HttpOptions) -> Router {
    let mut router = Router::new()
        .merge(routes::health::create_route())
        .merge(routes::auth::create_route())
        .merge(routes::events::create_route())
        .merge(routes::on_duty::create_route())
        .merge(routes::certificates::create_route())
        .with_state(state);

    if options.swagger_enabled {
        let swagger_ui =
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());
        router = router.merge(swagger_ui);
    }

    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();

    // from_fn middleware cannot go through ServiceBuilder.
    let router = router.layer(middleware::from_fn_with_state(
        LogContext::new(&options.app_env),
        http_logger,
    ));

    let middleware = ServiceBuilder::new()
        .layer(cors_layer(&options.cors_allowed_origins))
        .layer(PropagateHeaderLayer::new(header::HeaderName::from_static(
            "x-request-id",
        )))
        .sensitive_request_headers(sensitive_headers.clone())
        .sensitive_response_headers(sensitive_headers)
        .compression();

    router.layer(middleware)
}
