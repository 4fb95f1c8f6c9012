//! Request handling on top of the content negotiator.

use serde_json::{Value, json};

use crate::codec::{CodecError, OPTION_CALLBACK, Options};
use crate::error::Error;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::negotiator::ContentNegotiator;

/// Answers one request.
///
/// GET and HEAD describe the service; POST, PUT and PATCH decode the body with
/// the codec for its Content-Type and send it back in the negotiated format.
/// The response format comes from the Accept header, the path extension and
/// the `callback_param` query parameter.
pub fn handle_request(negotiator: &ContentNegotiator, req: &Request, callback_param: &str) -> Response {
    let payload = match req.method {
        Method::GET | Method::HEAD => describe(negotiator, req),
        ref method if method.has_payload() => match interpret(negotiator, req) {
            Ok(value) => value,
            Err(response) => return response,
        },
        _ => return Response::error(StatusCode::MethodNotAllowed, format!("{:?}", req.method)),
    };

    let callback = req.query_param(callback_param).filter(|name| !name.is_empty());
    let codec = match negotiator.select_for_responding(req.accept(), &req.extension(), callback.is_some()) {
        Ok(codec) => codec,
        Err(e) => return Response::error(StatusCode::InternalServerError, e),
    };

    let mut options = Options::new();
    if let Some(name) = callback {
        options.insert(OPTION_CALLBACK.to_string(), Value::String(name));
    }

    match negotiator.marshal_with(codec.as_ref(), &payload, &options) {
        Ok(body) => {
            tracing::debug!(
                method = ?req.method,
                path = %req.path,
                codec = codec.content_type(),
                bytes = body.len(),
                "Response encoded"
            );
            Response::encoded(codec.content_type(), body)
        }
        // The callback name comes from the query string.
        Err(e @ Error::Codec(CodecError::InvalidCallback(_) | CodecError::MissingCallback)) => {
            tracing::debug!(path = %req.path, error = %e, "Rejected callback name");
            Response::error(StatusCode::BadRequest, e)
        }
        Err(e) => {
            tracing::warn!(path = %req.path, codec = codec.content_type(), error = %e, "Failed to encode response");
            Response::error(StatusCode::InternalServerError, e)
        }
    }
}

fn describe(negotiator: &ContentNegotiator, req: &Request) -> Value {
    let codecs: Vec<Value> = negotiator
        .registry()
        .codecs()
        .iter()
        .map(|codec| {
            json!({
                "content_type": codec.content_type(),
                "extension": codec.file_extension(),
                "callback": codec.supports_callback(),
            })
        })
        .collect();
    json!({ "path": req.path, "codecs": codecs })
}

fn interpret(negotiator: &ContentNegotiator, req: &Request) -> Result<Value, Response> {
    let codec = negotiator.select_for_interpreting(req.content_type()).map_err(|e| match e {
        Error::ContentTypeNotSupported(_) => Response::error(StatusCode::UnsupportedMediaType, e),
        other => Response::error(StatusCode::InternalServerError, other),
    })?;

    negotiator.unmarshal_with(codec.as_ref(), &req.body).map_err(|e| {
        tracing::debug!(codec = codec.content_type(), error = %e, "Failed to decode request body");
        Response::error(StatusCode::BadRequest, e)
    })
}
