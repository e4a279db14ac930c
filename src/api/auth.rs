use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};

use crate::{error::GardenError, models::OwnerId};

/// Header set by the authentication gateway in front of this service.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user making the request.
///
/// Taken from request extensions when an auth middleware put it there,
/// otherwise from the [`USER_ID_HEADER`] header. Anything else is `401`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: OwnerId,
}

impl FromRequest for Caller {
    type Error = GardenError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(caller_from(req))
    }
}

fn caller_from(req: &HttpRequest) -> Result<Caller, GardenError> {
    if let Some(caller) = req.extensions().get::<Caller>() {
        return Ok(*caller);
    }
    req.headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<OwnerId>().ok())
        .filter(|&id| id > 0)
        .map(|user_id| Caller { user_id })
        .ok_or(GardenError::Unauthorized)
}
