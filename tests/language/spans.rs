//! Integration tests for code spans
//!
//! Tests span construction, narrowing, comparability and ordering.

use std::cmp::Ordering;
use std::rc::Rc;

use vision_foundation::ErrorKind;
use vision_language::{CodeProvider, CodeSpan, LineSource, sort_spans};

fn source(name: &str, lines: &[&str]) -> Rc<LineSource> {
    Rc::new(LineSource::new(
        name,
        lines.iter().map(ToString::to_string).collect(),
    ))
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn whole_line_span() {
    let src = source("page.vision", &["open the browser"]);
    let span = CodeSpan::new(src, 0).unwrap();
    assert_eq!(span.code(), "open the browser");
    assert_eq!(span.start(), 0);
    assert_eq!(span.end(), None);
    assert_eq!(span.to_string(), "open the browser");
}

#[test]
fn blank_line_span_is_rejected() {
    let src = source("page.vision", &["open", "   "]);
    let err = CodeSpan::new(src, 1).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::BlankLineRejected { line: 1, .. }));
    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.origin, "page.vision");
    assert_eq!((ctx.line, ctx.column), (2, 1));
}

#[test]
fn span_past_last_line_is_edge_of_source() {
    let src = source("page.vision", &["open"]);
    assert!(CodeSpan::new(src, 1).unwrap_err().is_edge_of_source());
}

#[test]
fn ranged_span_slices_line() {
    let src = source("page.vision", &["open the browser"]);
    let span = CodeSpan::with_range(src, 0, 5, Some(8)).unwrap();
    assert_eq!(span.code(), "the");
    assert_eq!(span.line_text(), "open the browser");
}

#[test]
fn range_outside_line_is_rejected() {
    let src = source("page.vision", &["open"]);
    let err = CodeSpan::with_range(Rc::clone(&src), 0, 2, Some(9)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SpanOutOfRange { length: 4, .. }));
    assert!(CodeSpan::with_range(src, 0, 3, Some(1)).is_err());
}

#[test]
fn narrow_is_relative() {
    let src = source("page.vision", &["  click the button"]);
    let outer = CodeSpan::with_range(src, 0, 2, None).unwrap();
    let inner = outer.narrow(6, 9).unwrap();
    assert_eq!(inner.code(), "the");
    assert_eq!(inner.start(), 8);
    assert_eq!(inner.end(), Some(11));
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn same_line_spans_order_by_start() {
    let src = source("page.vision", &["open the browser"]);
    let a = CodeSpan::with_range(Rc::clone(&src), 0, 0, Some(4)).unwrap();
    let b = CodeSpan::with_range(src, 0, 5, Some(8)).unwrap();
    assert!(a.can_compare_to(&b));
    assert_eq!(a.compare(&b).unwrap(), Ordering::Less);
    assert_eq!(b.compare(&a).unwrap(), Ordering::Greater);
}

#[test]
fn different_lines_are_incomparable() {
    let src = source("page.vision", &["open", "close"]);
    let a = CodeSpan::new(Rc::clone(&src), 0).unwrap();
    let b = CodeSpan::new(src, 1).unwrap();
    assert!(!a.can_compare_to(&b));
    let err = a.compare(&b).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IncomparableSpans { .. }));
}

#[test]
fn different_origins_are_incomparable() {
    let a = CodeSpan::new(source("a.vision", &["open"]), 0).unwrap();
    let b = CodeSpan::new(source("b.vision", &["open"]), 0).unwrap();
    assert!(!a.can_compare_to(&b));
}

#[test]
fn sort_spans_orders_by_start() {
    let src = source("page.vision", &["type 'hello' now"]);
    let mut spans: Vec<CodeSpan> = [(13, 16), (0, 4), (5, 12)]
        .into_iter()
        .map(|(start, end)| CodeSpan::with_range(Rc::clone(&src), 0, start, Some(end)).unwrap())
        .collect();
    sort_spans(&mut spans).unwrap();
    let codes: Vec<String> = spans.iter().map(CodeSpan::code).collect();
    assert_eq!(codes, vec!["type", "'hello'", "now"]);
}

#[test]
fn sort_spans_refuses_mixed_lines() {
    let src = source("page.vision", &["open", "close"]);
    let mut spans = vec![
        CodeSpan::new(Rc::clone(&src), 1).unwrap(),
        CodeSpan::new(src, 0).unwrap(),
    ];
    assert!(sort_spans(&mut spans).is_err());
    assert_eq!(spans[0].line(), 1);
}
