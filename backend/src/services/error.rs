use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;

use crate::clients::ClientError;
use crate::session::StoreError;
use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid upload: {0}")]
    Multipart(String),
    #[error("could not spool the upload")]
    Io(#[from] std::io::Error),
    #[error("background task failed: {0}")]
    Join(String),
}

impl From<actix_multipart::MultipartError> for ServiceError {
    fn from(error: actix_multipart::MultipartError) -> Self {
        ServiceError::Multipart(error.to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Multipart(_) => StatusCode::BAD_REQUEST,
            ServiceError::Client(ClientError::Status { status: 404, .. }) => StatusCode::NOT_FOUND,
            ServiceError::Client(_) | ServiceError::Validation(ValidationError::Client(_)) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        error!("{}", error_chain(self));
        HttpResponse::build(self.status_code()).body(format!("Error: {}", self))
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_template_is_not_found() {
        let error = ServiceError::Client(ClientError::Status {
            url: "/service/1/template/2".to_string(),
            status: 404,
            body: "No result found".to_string(),
        });
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::Join("cancelled".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
