use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::web::BytesMut;
use actix_web::{FromRequest, HttpRequest};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// Request bodies here are a handful of small fields.
const MAX_BODY_BYTES: usize = 4 * 1024;

/// JSON body extractor whose failures render as problem+json 400s with
/// `BAD_REQUEST`, instead of actix's plain-text default.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_id, error = %e, "Failed to read request body chunk");
                    AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Failed to read request body".to_string(),
                    )
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            if body.is_empty() {
                return Err(AppError::bad_request(
                    ErrorCode::BadRequest,
                    "Request body is empty".to_string(),
                ));
            }

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                // Raw serde messages can echo body content (player names), keep them out.
                debug!(
                    trace_id = %trace_id,
                    category = ?e.classify(),
                    body_size = body.len(),
                    "JSON body rejected"
                );
                AppError::bad_request(ErrorCode::BadRequest, describe_json_error(&e))
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

/// Client-safe description of a body parse failure. Field names are fine to
/// echo; values are not.
fn describe_json_error(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
        Category::Data => match field_of(&error.to_string()) {
            Some(field) if error.to_string().starts_with("missing field") => {
                format!("Missing field `{field}`")
            }
            Some(field) if error.to_string().starts_with("unknown field") => {
                format!("Unknown field `{field}`")
            }
            _ => "Invalid JSON: wrong types for one or more fields".to_string(),
        },
    }
}

/// The first backquoted name in a serde message.
fn field_of(message: &str) -> Option<&str> {
    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;
    Some(&message[start..start + len])
}
