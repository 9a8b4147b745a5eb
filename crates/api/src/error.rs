//! API error types with HTTP response mapping.

use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::Notification;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// The command was rejected by validation.
    Validation(Vec<Notification>),
    /// Internal server error.
    Internal(String),
}

impl ApiError {
    /// Builds an internal error for a failed `action`, e.g. `"adicionar produto"`.
    pub fn internal(action: &str, err: impl Display) -> Self {
        ApiError::Internal(format!("Erro ao tentar {action}. Erro: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Lookups and faults answer with the bare message as text/plain.
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                axum::Json(serde_json::json!({ "error": msg })),
            )
                .into_response(),
            ApiError::Validation(notifications) => {
                let messages: Vec<&str> =
                    notifications.iter().map(|n| n.message.as_str()).collect();
                (
                    StatusCode::BAD_REQUEST,
                    axum::Json(serde_json::json!({ "errors": messages })),
                )
                    .into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_message_names_the_action() {
        let err = ApiError::internal("recuperar produtos", "connection refused");
        match err {
            ApiError::Internal(msg) => assert_eq!(
                msg,
                "Erro ao tentar recuperar produtos. Erro: connection refused"
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn not_found_and_internal_bodies_are_plain_text() {
        let response = ApiError::NotFound("Produto não encontrado.".into()).into_response();
        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_text(response).await, "Produto não encontrado.");

        let response = ApiError::internal("remover produto", "timeout").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            "Erro ao tentar remover produto. Erro: timeout"
        );
    }

    #[tokio::test]
    async fn validation_body_lists_messages() {
        let response = ApiError::Validation(vec![
            Notification::new("name", "O nome do produto não foi informado"),
            Notification::new("image", "Imagem é obrigatório"),
        ])
        .into_response();

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "errors": ["O nome do produto não foi informado", "Imagem é obrigatório"]
            })
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation(vec![Notification::new("name", "vazio")])
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
