use axum::{
    body::Body,
    extract::Request,
    http::{Response, StatusCode},
    middleware::Next,
};
use tracing::Instrument;

use crate::{middleware::normalize_uri, utils::RootSpan};

/// Opens the `http_request` span and hands it to handlers as an extension.
pub(crate) async fn trace_root(mut req: Request, next: Next) -> Result<Response<Body>, StatusCode> {
    let root_span = RootSpan::new(req.method().as_str(), &normalize_uri(req.uri().path()));

    req.extensions_mut().insert(root_span.clone());

    let resp = next.run(req).instrument(root_span.span().clone()).await;
    root_span.finish(resp.status());

    Ok(resp)
}
