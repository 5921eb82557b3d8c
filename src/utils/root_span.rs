use axum::http::StatusCode;
use tracing::{field, info_span, Span};

use crate::storage::TodoId;

/// The per-request `http_request` span. Handlers attach the todo they act on,
/// the middleware attaches the response outcome.
#[derive(Clone, Debug)]
pub struct RootSpan {
    span: Span,
}

impl RootSpan {
    pub fn new(method: &str, route: &str) -> Self {
        Self {
            span: info_span!(
                "http_request",
                method = %method,
                route = %route,
                http_status_code = field::Empty,
                outcome = field::Empty,
                sampling.priority = field::Empty,
                todo_id = field::Empty,
                todo_filter = field::Empty,
            ),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn record(&self) -> RootSpanRecorder<'_> {
        RootSpanRecorder { span: &self.span }
    }

    /// Records the response status. Failed requests get `sampling.priority = 1`.
    pub fn finish(&self, status: StatusCode) {
        self.span.record("http_status_code", status.as_u16());

        if status.is_client_error() || status.is_server_error() {
            self.span.record("outcome", "error");
            self.span.record("sampling.priority", 1);
        } else {
            self.span.record("outcome", "ok");
        }
    }
}

pub struct RootSpanRecorder<'a> {
    span: &'a Span,
}

impl RootSpanRecorder<'_> {
    pub fn todo_id(&self, id: &TodoId) -> &Self {
        self.span.record("todo_id", field::display(id));
        self
    }

    pub fn todo_filter(&self, filter: &impl std::fmt::Debug) -> &Self {
        self.span.record("todo_filter", field::debug(filter));
        self
    }
}
