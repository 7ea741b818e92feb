//! Parent trace context from incoming `traceparent` headers.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::{HeaderMap, HeaderName};

/// Extract a remote parent with the globally installed propagator.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| extract_with(propagator, headers))
}

/// Extract a remote parent, or `None` when the headers carry no valid span.
///
/// Extraction starts from an empty context so a request without trace
/// headers never inherits an in-process span.
fn extract_with<P>(propagator: &P, headers: &HeaderMap) -> Option<Context>
where
    P: TextMapPropagator + ?Sized,
{
    let context = propagator.extract_with_context(&Context::new(), &HeaderExtractor(headers));

    let valid = context.span().span_context().is_valid();

    valid.then_some(context)
}

#[derive(Debug)]
struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
