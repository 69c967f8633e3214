//! Browser tests for the `LogView` bindings.
//!
//! Run with: wasm-pack test --headless --chrome
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use js_sys::Function;
use logview::LogView;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn view() -> LogView {
    let mut view = LogView::new(JsValue::UNDEFINED).unwrap();
    view.set_decoder(Function::new_with_args(
        "raw",
        "if (raw === 3) { throw 'bad'; } return { appId: 'APP', payload: 'record ' + raw };",
    ));
    view.set_anchor_resolver(Function::new_with_args(
        "sourceId, byteOffset",
        "return sourceId === 'trace.dlt' ? byteOffset : null;",
    ));
    view
}

#[wasm_bindgen_test]
fn filter_and_cells() {
    let mut view = view();
    assert_eq!(view.set_filter(vec![1, 3, 5]).unwrap(), 3);
    assert_eq!(view.row_count(), 3);
    assert_eq!(view.view_to_raw(2), Some(5));
    assert_eq!(view.raw_to_filtered(3), Some(1));
    assert_eq!(view.view_to_filtered(-1), None);

    let text = view.cell_text(0, JsValue::from_str("payload")).unwrap();
    assert_eq!(text.as_deref(), Some("record 1"));
    let corrupted = view.cell_text(1, JsValue::from_str("payload")).unwrap();
    assert_eq!(corrupted.as_deref(), Some("!!CORRUPTED MESSAGE!!"));
    assert_eq!(view.cell_color(1).as_deref(), Some("#010203"));
}

#[wasm_bindgen_test]
fn annotations_interleave() {
    let mut view = view();
    view.set_filter(vec![1, 3, 5]).unwrap();
    let notes = js_sys::JSON::parse(
        r#"[{"anchor":{"sourceId":"trace.dlt","byteOffset":5},"side":"before","text":"hi","createdUtcMs":0}]"#,
    )
    .unwrap();
    assert_eq!(view.set_annotations(notes).unwrap(), 4);
    assert!(view.is_annotation_row(2));
    assert_eq!(view.filtered_to_view(2), Some(3));
    assert_eq!(view.cell_color(2).as_deref(), Some("#00FF00"));
}

#[wasm_bindgen_test]
fn invalid_color_rejected() {
    let mut view = view();
    assert!(view.set_search_match(Some(1), "not a color").is_err());
}

#[wasm_bindgen_test]
fn dark_theme_background() {
    let mut view = view();
    view.set_filter(vec![1]).unwrap();
    assert_eq!(view.cell_color(0).as_deref(), Some("#FFFFFF"));
    view.set_dark_theme(true);
    assert_eq!(view.cell_color(0).as_deref(), Some("#1F1F1F"));
}
