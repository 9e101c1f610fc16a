/// HTTP handlers for catalog endpoints
///
/// - Categories: list (with `search`), get, create, update, delete
/// - Items: the same five operations plus the joined read with category details
/// - Health: liveness and storage readiness
pub mod categories;
pub mod health;
pub mod items;

use actix_web::{dev::Payload, web, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::AppError;
use crate::validation::FieldMap;

/// Write body as a normalised field map: a JSON object, or an urlencoded form.
///
/// An empty body is an empty map, so required-field rules answer it with a 422.
pub struct FieldBody(pub FieldMap);

impl FromRequest for FieldBody {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let content_type = req.content_type().to_ascii_lowercase();
        let bytes = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let body = bytes
                .await
                .map_err(|e| AppError::BadRequest(format!("Unreadable request body: {}", e)))?;
            parse_body(&content_type, &body).map(FieldBody)
        })
    }
}

fn parse_body(content_type: &str, body: &[u8]) -> Result<FieldMap, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(FieldMap::default());
    }

    match content_type {
        "application/x-www-form-urlencoded" => {
            let text = std::str::from_utf8(body)
                .map_err(|_| AppError::BadRequest("Form body must be UTF-8".to_string()))?;
            let form = web::Query::<HashMap<String, String>>::from_query(text)
                .map_err(|e| AppError::BadRequest(format!("Malformed form body: {}", e)))?;
            Ok(FieldMap::from_form(form.into_inner()))
        }
        "" | "application/json" => match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(FieldMap::new(map)),
            Ok(_) => Err(AppError::BadRequest(
                "Request body must be a JSON object".to_string(),
            )),
            Err(e) => Err(AppError::BadRequest(format!("Malformed JSON body: {}", e))),
        },
        other => Err(AppError::BadRequest(format!(
            "Unsupported content type: {}",
            other
        ))),
    }
}

/// Resource routes at the root
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    configure_scope(cfg, "");
}

/// Health routes at the root, resource routes under `prefix`
pub fn configure_scope(cfg: &mut web::ServiceConfig, prefix: &str) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid query string: {}", err)).into()
    }));

    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health::health_check))
            .route("/live", web::get().to(health::liveness_check)),
    );

    cfg.service(
        web::scope(prefix)
            // Items
            .route("/items", web::get().to(items::list_items))
            .route("/items/{id}", web::get().to(items::get_item))
            .route("/items", web::post().to(items::create_item))
            .route("/items/{id}", web::put().to(items::update_item))
            .route("/items/{id}", web::delete().to(items::delete_item))
            .route(
                "/items-with-category",
                web::get().to(items::list_items_with_category),
            )
            // Categories
            .route("/categories", web::get().to(categories::list_categories))
            .route("/categories/{id}", web::get().to(categories::get_category))
            .route("/categories", web::post().to(categories::create_category))
            .route("/categories/{id}", web::put().to(categories::update_category))
            .route(
                "/categories/{id}",
                web::delete().to(categories::delete_category),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_is_an_empty_map() {
        assert_eq!(parse_body("", b"").unwrap(), FieldMap::default());
        assert_eq!(parse_body("application/json", b" \n").unwrap(), FieldMap::default());
        assert_eq!(parse_body("text/plain", b"").unwrap(), FieldMap::default());
    }

    #[test]
    fn form_body_is_decoded() {
        let map =
            parse_body("application/x-www-form-urlencoded", b"name=Kitchen+Sink&price=2").unwrap();
        assert_eq!(map.get("name"), Some(&Value::from("Kitchen Sink")));
        assert_eq!(map.get("price"), Some(&Value::from("2")));
    }

    #[test]
    fn non_object_json_is_rejected() {
        for body in [&b"[]"[..], &b"42"[..], &b"{"[..]] {
            assert!(matches!(
                parse_body("application/json", body),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn unknown_content_type_is_rejected() {
        let err = parse_body("text/plain", b"name=x").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported content type: text/plain");
    }
}
