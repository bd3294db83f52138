//! Translation of service outcomes into HTTP status codes and JSON bodies.
//!
//! This is the only place that knows how error kinds map to status codes.
//! Success bodies are `{"status": "success", "data": ...}`; failures are
//! `{"status": "fail" | "error", "message": ...}`, with `fail` for client
//! errors and `error` for server errors.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::wish::{
    domain::{HelperApplication, Wish},
    services::{WishErrorKind, WishListing, WishServiceError, WishServiceResult},
};

/// Message returned by a successful application.
pub const APPLICATION_SUBMITTED: &str = "Application submitted successfully";

const INTERNAL_MESSAGE: &str = "Something went wrong";

/// Operations exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WishOperation {
    /// `GET /wishes`
    List,
    /// `GET /wishes/:id`
    Get,
    /// `GET /wishes/category/:category`
    ByCategory,
    /// `GET /wishes/location/nearby`
    Nearby,
    /// `POST /wishes`
    Create,
    /// `PUT /wishes/:id`
    Update,
    /// `DELETE /wishes/:id`
    Delete,
    /// `POST /wishes/:id/apply`
    Apply,
    /// `GET /wishes/:id/applications`
    ListApplications,
    /// `POST /wishes/:id/accept/:helperId`
    AcceptHelper,
    /// `POST /wishes/:id/complete`
    Complete,
    /// `PATCH /wishes/:id/status`
    Cancel,
    /// `POST /wishes/:id/extend`
    ExtendDeadline,
    /// `POST /wishes/:id/media`
    AttachMedia,
    /// `DELETE /wishes/:id/media/:mediaId`
    DetachMedia,
    /// `POST /wishes/:id/review`
    Review,
}

impl WishOperation {
    /// Status code returned on success.
    #[must_use]
    pub const fn success_status(self) -> u16 {
        match self {
            Self::Create => 201,
            Self::Delete => 204,
            _ => 200,
        }
    }
}

/// Status code for a failure of the given kind.
#[must_use]
pub const fn status_for(kind: WishErrorKind) -> u16 {
    match kind {
        WishErrorKind::InvalidState | WishErrorKind::BadRequest => 400,
        WishErrorKind::Forbidden => 403,
        WishErrorKind::NotFound => 404,
        WishErrorKind::Internal => 500,
    }
}

/// A status code plus optional JSON body, ready for any HTTP framework.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body; `None` for `204 No Content`.
    pub body: Option<Value>,
}

#[derive(Serialize)]
struct SuccessEnvelope<T> {
    status: &'static str,
    data: T,
}

#[derive(Serialize)]
struct WishData<'a> {
    wish: &'a Wish,
}

#[derive(Serialize)]
struct ApplicationsData<'a> {
    applications: &'a [HelperApplication],
}

fn success<T: Serialize>(status: u16, data: T) -> HttpReply {
    match serde_json::to_value(SuccessEnvelope {
        status: "success",
        data,
    }) {
        Ok(body) => HttpReply {
            status,
            body: Some(body),
        },
        Err(err) => {
            error!(error = %err, "failed to serialize response body");
            message_reply(500, INTERNAL_MESSAGE)
        }
    }
}

fn message_reply(status: u16, message: &str) -> HttpReply {
    let label = if status >= 500 { "error" } else { "fail" };
    HttpReply {
        status,
        body: Some(json!({ "status": label, "message": message })),
    }
}

/// Renders a failure. Internal errors are logged and replaced by a generic
/// message.
#[must_use]
pub fn error_reply(err: &WishServiceError) -> HttpReply {
    let kind = err.kind();
    let status = status_for(kind);
    if kind == WishErrorKind::Internal {
        error!(error = %err, "wish operation failed");
        return message_reply(status, INTERNAL_MESSAGE);
    }
    message_reply(status, &err.to_string())
}

/// Renders an operation that returns a single wish as `{wish}`.
#[must_use]
pub fn wish_reply(operation: WishOperation, result: &WishServiceResult<Wish>) -> HttpReply {
    match result {
        Ok(wish) => success(operation.success_status(), WishData { wish }),
        Err(err) => error_reply(err),
    }
}

/// Renders a listing as `{wishes, pagination}`.
#[must_use]
pub fn listing_reply(result: &WishServiceResult<WishListing>) -> HttpReply {
    match result {
        Ok(listing) => success(WishOperation::List.success_status(), listing),
        Err(err) => error_reply(err),
    }
}

/// Renders a delete as `204` with no body.
#[must_use]
pub fn deleted_reply(result: &WishServiceResult<()>) -> HttpReply {
    match result {
        Ok(()) => HttpReply {
            status: WishOperation::Delete.success_status(),
            body: None,
        },
        Err(err) => error_reply(err),
    }
}

/// Renders an application as a success message.
#[must_use]
pub fn applied_reply(result: &WishServiceResult<HelperApplication>) -> HttpReply {
    match result {
        Ok(_) => HttpReply {
            status: WishOperation::Apply.success_status(),
            body: Some(json!({
                "status": "success",
                "message": APPLICATION_SUBMITTED,
            })),
        },
        Err(err) => error_reply(err),
    }
}

/// Renders recorded applications as `{applications}`.
#[must_use]
pub fn applications_reply(result: &WishServiceResult<Vec<HelperApplication>>) -> HttpReply {
    match result {
        Ok(applications) => success(
            WishOperation::ListApplications.success_status(),
            ApplicationsData { applications },
        ),
        Err(err) => error_reply(err),
    }
}
