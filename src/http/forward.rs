//! Forwarding handler.
//!
//! `ANY {prefix}/{*url}`: one inbound request becomes at most one outbound
//! request to the URL in the path. Method, headers (minus `Host` and
//! hop-by-hop) and body are passed through; the upstream status, headers and
//! body come back with `Content-Disposition` forced to an attachment.
//! No retries: an upstream failure is a 502 for this request and that's it.
//! The bare `{prefix}` and `{prefix}/` routes land here too and get a 400.

use axum::{
    body::{Body, HttpBody},
    extract::{rejection::PathRejection, Path, Request, State},
    http::HeaderMap,
    response::Response,
};

use crate::error::ForwardError;
use crate::http::response::{forward_request_headers, forward_response_headers};
use crate::http::server::AppState;
use crate::http::target::TargetUrl;
use crate::http::X_REQUEST_ID;

/// Main forwarding handler.
pub async fn forward_handler(
    State(state): State<AppState>,
    raw_target: Result<Path<String>, PathRejection>,
    request: Request,
) -> Result<Response, ForwardError> {
    let request_id = request_id(request.headers());

    // `{prefix}` and `{prefix}/` carry no wildcard, and a wildcard that is
    // not valid UTF-8 once decoded is rejected by the extractor. Both are
    // bad targets as far as the caller is concerned.
    let raw_target = match raw_target {
        Ok(Path(raw_target)) => raw_target,
        Err(rejection) => {
            let err = ForwardError::invalid_target(request.uri().path(), rejection.body_text());
            tracing::warn!(request_id = %request_id, error = %err, "Rejecting proxy request");
            return Err(err);
        }
    };
    let query = if state.forward.forward_query {
        request.uri().query()
    } else {
        None
    };

    let target = TargetUrl::parse(&raw_target, query).inspect_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Rejecting proxy request");
    })?;
    let file_name = target.file_name(&state.forward.default_filename);

    let (parts, body) = request.into_parts();

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        target = %target,
        "Forwarding request"
    );

    let mut outbound = state
        .client
        .request(parts.method.clone(), target.as_url().clone())
        .headers(forward_request_headers(&parts.headers));

    // A GET with no body must not turn into a chunked upload.
    if body.size_hint().exact() != Some(0) {
        outbound = outbound.body(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    let upstream = outbound.send().await.inspect_err(|e| {
        tracing::error!(
            request_id = %request_id,
            target = %target,
            error = %e,
            "Upstream error"
        );
    })?;

    let status = upstream.status();
    let headers = forward_response_headers(upstream.headers(), &file_name);

    tracing::debug!(
        request_id = %request_id,
        status = %status,
        file_name = %file_name,
        "Upstream responded"
    );

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}
