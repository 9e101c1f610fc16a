/// Error types for Catalog Service
///
/// `StoreError` is what repositories return. `AppError` is what handlers return;
/// it renders the JSON bodies clients see:
///
/// - 400 `{"message": "Request body must be a JSON object"}`
/// - 404 `{"message": "Category not found"}`
/// - 422 `{"message": "Validation Error", "errors": {"name": ["..."]}}`
/// - 500 `{"message": "Error creating category", "error": "<cause>"}`
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;

use crate::validation::FieldErrors;

/// Result type for catalog-service handlers and services
pub type Result<T> = std::result::Result<T, AppError>;

/// Storage failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Resource kinds exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Category,
    Item,
}

impl Resource {
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Category => "category",
            Resource::Item => "item",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Resource::Category => "categories",
            Resource::Item => "items",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Resource::Category => "Category",
            Resource::Item => "Item",
        }
    }
}

/// The operation that failed, used for the 500 message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    ListWithCategory,
}

impl Operation {
    pub fn failure_message(&self, resource: Resource) -> String {
        match self {
            Operation::List => format!("Error retrieving {}", resource.plural()),
            Operation::Get => format!("Error retrieving {}", resource.singular()),
            Operation::Create => format!("Error creating {}", resource.singular()),
            Operation::Update => format!("Error updating {}", resource.singular()),
            Operation::Delete => format!("Error deleting {}", resource.singular()),
            Operation::ListWithCategory => {
                format!("Error retrieving {} with category details", resource.plural())
            }
        }
    }
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Body or query string that cannot be read as a field map
    #[error("{0}")]
    BadRequest(String),

    #[error("{} not found", .0.title())]
    NotFound(Resource),

    #[error("Validation Error")]
    Validation(FieldErrors),

    #[error("{message}: {source}")]
    Internal {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn internal(resource: Resource, operation: Operation, source: StoreError) -> Self {
        AppError::Internal {
            message: operation.failure_message(resource),
            source,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::BadRequest(_) | AppError::NotFound(_) => {
                json!({ "message": self.to_string() })
            }
            AppError::Validation(errors) => json!({
                "message": self.to_string(),
                "errors": errors,
            }),
            AppError::Internal { message, source } => {
                tracing::error!(error = %source, "{}", message);
                json!({
                    "message": message,
                    "error": source.to_string(),
                })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Attach the failing operation to a storage result
pub trait StoreResultExt<T> {
    fn during(self, resource: Resource, operation: Operation) -> Result<T>;
}

impl<T> StoreResultExt<T> for std::result::Result<T, StoreError> {
    fn during(self, resource: Resource, operation: Operation) -> Result<T> {
        self.map_err(|e| AppError::internal(resource, operation, e))
    }
}
