use actix_web::{http::StatusCode, middleware, web, App, HttpRequest, HttpResponse, HttpServer};

use crate::{
    config::Config,
    error::{Result, RgenError},
    handler::{GenerationHandler, GenerationRequest},
    models::{ErrorResponse, HealthResponse, BODY_TOO_LARGE, GENERATION_FAILED},
};

pub async fn generate(
    req: HttpRequest,
    body: std::result::Result<web::Bytes, actix_web::Error>,
    handler: web::Data<GenerationHandler>,
) -> HttpResponse {
    let body = match body {
        Ok(body) => body,
        Err(e) => return unreadable_body(&req, e),
    };

    let request = GenerationRequest::new(req.method().as_str(), body.to_vec());
    let response = handler.handle(request).await;

    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(response.to_json())
}

/// Body extraction failures never reach the handler, so they are rendered
/// here with the same JSON error shape.
fn unreadable_body(req: &HttpRequest, error: actix_web::Error) -> HttpResponse {
    let status = error.error_response().status();
    log::warn!("Rejected {} {} body: {}", req.method(), req.path(), error);

    let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
        BODY_TOO_LARGE
    } else {
        GENERATION_FAILED
    };
    HttpResponse::build(status).json(ErrorResponse::new(message).with_details(error.to_string()))
}

pub fn payload_config(config: &Config) -> web::PayloadConfig {
    web::PayloadConfig::new(config.max_request_bytes)
}

pub async fn health(handler: web::Data<GenerationHandler>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        model: handler.model().to_string(),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/generate", web::route().to(generate));
}

pub async fn run(handler: GenerationHandler) -> Result<()> {
    let bind = (handler.config().host.clone(), handler.config().port);
    let payload = payload_config(handler.config());
    let data = web::Data::new(handler);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(payload.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(bind.clone())
    .map_err(|e| RgenError::ConfigError(format!("Failed to bind {}:{}: {}", bind.0, bind.1, e)))?
    .run()
    .await
    .map_err(|e| RgenError::RequestError(format!("Server error: {}", e)))
}
