//! JSON response envelopes.
//!
//! Every response, success or failure, is a JSON object with an `ok`
//! discriminant so clients can branch without inspecting status codes.

use std::io::Cursor;

use inkvert_service::{ServiceError, TraceMeta, TraceResult};
use serde::Serialize;
use tiny_http::{Header, Response};

use crate::validate::RequestError;

#[derive(Serialize)]
struct Success<'a> {
    ok: bool,
    svg: &'a str,
    meta: &'a TraceMeta,
}

#[derive(Serialize)]
struct Failure {
    ok: bool,
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

/// 200 with the traced document and metadata.
pub fn success(result: &TraceResult) -> Response<Cursor<Vec<u8>>> {
    json(
        200,
        json_body(&Success {
            ok: true,
            svg: &result.svg,
            meta: &result.meta,
        }),
    )
}

/// Error envelope with an arbitrary status, code and message.
pub fn failure(status: u16, code: &'static str, message: String) -> Response<Cursor<Vec<u8>>> {
    json(
        status,
        json_body(&Failure {
            ok: false,
            error: ErrorBody { code, message },
        }),
    )
}

/// Envelope for an upload that failed validation.
pub fn for_request_error(err: &RequestError) -> Response<Cursor<Vec<u8>>> {
    failure(err.status(), err.code(), err.to_string())
}

/// Envelope for a pipeline failure. Every stage failure past
/// validation is an internal processing error; the underlying message
/// is surfaced verbatim for diagnosability.
pub fn for_service_error(err: &ServiceError) -> Response<Cursor<Vec<u8>>> {
    failure(500, "PROCESSING_ERROR", err.to_string())
}

fn json_body<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_else(|_| {
        br#"{"ok":false,"error":{"code":"PROCESSING_ERROR","message":"response serialization failed"}}"#
            .to_vec()
    })
}

fn json(status: u16, body: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let mut response = Response::from_data(body).with_status_code(status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response.add_header(header);
    }
    response
}
