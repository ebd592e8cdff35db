//! HTTP request/response tracing middleware.

use axum::http::{Request, header};
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Opens one `INFO` span per request carrying the method, `Host` and path.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinkRequestSpan;

impl<B> MakeSpan<B> for LinkRequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let host = request
            .headers()
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            host = %host,
            path = %request.uri().path(),
        )
    }
}

/// Creates the tracing layer for the router.
///
/// ```text
/// INFO request{method=GET host=dub.sh path=/launch}: finished processing request latency=2 ms status=307
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, LinkRequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(LinkRequestSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
