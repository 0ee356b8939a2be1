//! Accept loop and request dispatch.
//!
//! `tiny_http` owns the listener; each accepted request is handed to
//! the tokio runtime, where validation runs inline and the CPU-heavy
//! pipeline stages are pushed to the blocking pool by the service
//! layer. Requests never interleave stages with each other's state —
//! everything for one request lives in its own task.

use std::io::{Cursor, Read};
use std::sync::Arc;

use inkvert_pipeline::ProcessingMode;
use inkvert_trace::Vectorizer;
use tiny_http::{Method, Request, Response, Server};

use crate::multipart;
use crate::response;
use crate::validate::{self, RequestError};

/// Extra room on top of the file ceiling for multipart framing and
/// headers.
const FRAMING_ALLOWANCE: usize = 64 * 1024;

/// Shared per-process state handed to every request task.
#[derive(Clone)]
pub struct App {
    /// The tracing engine implementation.
    pub engine: Arc<dyn Vectorizer>,
    /// Upload file size ceiling in bytes.
    pub max_upload: usize,
}

/// Bind and serve forever.
///
/// # Errors
///
/// Returns an error only if the listener cannot bind.
pub fn serve(addr: &str, app: App, handle: tokio::runtime::Handle) -> anyhow::Result<()> {
    let server =
        Server::http(addr).map_err(|err| anyhow::anyhow!("failed to bind {addr}: {err}"))?;
    tracing::info!("listening on http://{addr}");
    for request in server.incoming_requests() {
        let app = app.clone();
        handle.spawn(handle_request(request, app));
    }
    Ok(())
}

async fn handle_request(mut request: Request, app: App) {
    let response = dispatch(&mut request, &app).await;
    // Writing the response is blocking socket I/O; keep it off the
    // runtime's worker threads so a slow client cannot pin one.
    let written = tokio::task::spawn_blocking(move || request.respond(response)).await;
    match written {
        Ok(Ok(())) => {}
        Ok(Err(err)) => tracing::warn!(error = %err, "failed to write response"),
        Err(err) => tracing::warn!(error = %err, "response writer task failed"),
    }
}

enum Route {
    Trace(ProcessingMode),
    MethodNotAllowed,
    NotFound,
}

fn route(method: &Method, path: &str) -> Route {
    match (method, path) {
        (Method::Post, "/trace/bw") => Route::Trace(ProcessingMode::Bw),
        (Method::Post, "/trace/color") => Route::Trace(ProcessingMode::Color),
        (_, "/trace/bw" | "/trace/color") => Route::MethodNotAllowed,
        _ => Route::NotFound,
    }
}

async fn dispatch(request: &mut Request, app: &App) -> Response<Cursor<Vec<u8>>> {
    let path = request
        .url()
        .split('?')
        .next()
        .unwrap_or_default()
        .to_owned();
    let mode = match route(request.method(), &path) {
        Route::Trace(mode) => mode,
        Route::MethodNotAllowed => {
            return response::failure(
                405,
                "METHOD_NOT_ALLOWED",
                format!("{} not allowed on {path}", request.method()),
            );
        }
        Route::NotFound => {
            return response::failure(404, "NOT_FOUND", format!("no route for {path}"));
        }
    };
    let image = match extract_image(request, app.max_upload) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(code = err.code(), error = %err, "rejected upload");
            return response::for_request_error(&err);
        }
    };
    match inkvert_service::process(Arc::clone(&app.engine), mode, image).await {
        Ok(result) => response::success(&result),
        Err(err) => {
            tracing::error!(stage = err.stage(), error = %err, "trace request failed");
            response::for_service_error(&err)
        }
    }
}

/// Read the body within the size ceiling, parse the multipart framing
/// and validate the `image` field.
fn extract_image(request: &mut Request, max_upload: usize) -> Result<Vec<u8>, RequestError> {
    let limit = max_upload + FRAMING_ALLOWANCE;
    if request.body_length().is_some_and(|length| length > limit) {
        return Err(RequestError::FileTooLarge(max_upload));
    }
    let content_type = request
        .headers()
        .iter()
        .find(|header| header.field.equiv("Content-Type"))
        .map(|header| header.value.as_str().to_owned())
        .ok_or_else(|| RequestError::Upload("missing content type".to_owned()))?;
    let boundary = multipart::boundary(&content_type)
        .ok_or_else(|| RequestError::Upload("missing multipart boundary".to_owned()))?;
    let mut body = Vec::new();
    request
        .as_reader()
        .take(u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1))
        .read_to_end(&mut body)
        .map_err(|err| RequestError::Upload(err.to_string()))?;
    if body.len() > limit {
        return Err(RequestError::FileTooLarge(max_upload));
    }
    let parts =
        multipart::parse(&body, &boundary).map_err(|err| RequestError::Upload(err.to_string()))?;
    let part = parts
        .into_iter()
        .find(|part| part.name == "image")
        .ok_or(RequestError::NoImage)?;
    validate::validate_upload(&part, max_upload)?;
    Ok(part.data)
}
