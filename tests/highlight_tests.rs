//! Tests for row background resolution.
//!
//! Each test starts from a row that matches several highlight sources at
//! once and removes them one by one, checking that the highest-priority
//! remaining source decides the color.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use logview::highlight::{annotation_color, palette, theme_background};
use logview::memlog::LogRecord;
use logview::{
    color_for, AutoMark, DecodeOutcome, HighlightSettings, HighlightState, NoMarkerRules, Rgb,
    Severity, UiTheme, MARKER_SERVICE_ID,
};
use test_case::test_case;

const RAW: u64 = 5;
const FILTERED: u32 = 2;

const MANUAL: Rgb = Rgb::new(10, 20, 30);
const RULE: Rgb = Rgb::new(40, 50, 60);
const MATCH: Rgb = Rgb::new(70, 80, 90);
const HIT: Rgb = Rgb::new(100, 110, 120);

fn record(app: &str, ctx: &str, severity: Option<Severity>) -> LogRecord {
    LogRecord {
        app_id: app.to_string(),
        context_id: ctx.to_string(),
        severity,
        ..LogRecord::default()
    }
}

fn everything_on() -> HighlightState {
    HighlightState {
        manual_markers: [RAW].into_iter().collect(),
        manual_marker_color: MANUAL,
        search_match: Some(RAW),
        search_match_color: MATCH,
        search_hit: Some(FILTERED),
        search_hit_color: HIT,
    }
}

fn rule(_: &LogRecord) -> Option<Rgb> {
    Some(RULE)
}

#[test]
fn test_priority_order() {
    let settings = HighlightSettings::default();
    let mut state = everything_on();
    let comment = DecodeOutcome::Decoded(record("USER", "CMNT", Some(Severity::Error)));

    let color = |outcome: &DecodeOutcome<LogRecord>, state: &HighlightState, with_rule: bool| {
        if with_rule {
            color_for(outcome, FILTERED, RAW, state, &rule, &settings)
        } else {
            color_for(outcome, FILTERED, RAW, state, &NoMarkerRules, &settings)
        }
    };

    assert_eq!(color(&comment, &state, true), MANUAL);

    state.manual_markers.clear();
    assert_eq!(color(&comment, &state, true), RULE);
    assert_eq!(color(&comment, &state, false), palette::COMMENT);

    let error = DecodeOutcome::Decoded(record("APP", "CTX", Some(Severity::Error)));
    assert_eq!(color(&error, &state, false), MATCH);

    state.search_match = None;
    assert_eq!(color(&error, &state, false), HIT);

    state.search_hit = None;
    assert_eq!(color(&error, &state, false), palette::AUTO_ERROR);

    let info = DecodeOutcome::Decoded(record("APP", "CTX", Some(Severity::Info)));
    assert_eq!(color(&info, &state, false), palette::WHITE);
}

#[test]
fn test_corrupted_row() {
    let settings = HighlightSettings::default();
    let mut state = everything_on();
    let failed: DecodeOutcome<LogRecord> = DecodeOutcome::Failed;

    // Manual markers still apply to records that cannot be decoded.
    assert_eq!(
        color_for(&failed, FILTERED, RAW, &state, &rule, &settings),
        MANUAL
    );

    state.manual_markers.clear();
    assert_eq!(
        color_for(&failed, FILTERED, RAW, &state, &rule, &settings),
        palette::CORRUPTED
    );
}

#[test]
fn test_search_match_is_by_raw_and_hit_by_filtered() {
    let settings = HighlightSettings::default();
    let info = DecodeOutcome::Decoded(record("APP", "CTX", Some(Severity::Info)));
    let state = HighlightState {
        search_match: Some(RAW + 1),
        search_hit: Some(FILTERED + 1),
        search_hit_color: HIT,
        ..HighlightState::default()
    };
    assert_eq!(
        color_for(&info, FILTERED, RAW, &state, &NoMarkerRules, &settings),
        palette::WHITE
    );
    assert_eq!(
        color_for(&info, FILTERED, RAW + 1, &state, &NoMarkerRules, &settings),
        palette::SEARCH_RESULT
    );
    assert_eq!(
        color_for(&info, FILTERED + 1, RAW, &state, &NoMarkerRules, &settings),
        HIT
    );
}

#[test_case(Some(Severity::Fatal), None, palette::AUTO_ERROR ; "fatal")]
#[test_case(Some(Severity::Error), None, palette::AUTO_ERROR ; "error")]
#[test_case(Some(Severity::Warn), None, palette::AUTO_WARN ; "warn")]
#[test_case(None, Some(MARKER_SERVICE_ID), palette::AUTO_MARKER ; "marker")]
#[test_case(None, Some(0x13), palette::WHITE ; "other control")]
#[test_case(Some(Severity::Debug), None, palette::WHITE ; "debug")]
fn test_auto_marks(severity: Option<Severity>, service: Option<u32>, expected: Rgb) {
    let mut r = record("APP", "CTX", severity);
    r.control_service_id = service;
    let outcome = DecodeOutcome::Decoded(r);
    let color = color_for(
        &outcome,
        0,
        0,
        &HighlightState::default(),
        &NoMarkerRules,
        &HighlightSettings::default(),
    );
    assert_eq!(color, expected);
}

#[test]
fn test_auto_marks_switch_off_independently() {
    let warn = DecodeOutcome::Decoded(record("APP", "CTX", Some(Severity::Warn)));
    let error = DecodeOutcome::Decoded(record("APP", "CTX", Some(Severity::Error)));
    let settings = HighlightSettings {
        theme: UiTheme::Dark,
        auto_mark: AutoMark {
            fatal_error: false,
            ..AutoMark::default()
        },
    };
    let state = HighlightState::default();

    assert_eq!(
        color_for(&error, 0, 0, &state, &NoMarkerRules, &settings),
        palette::DARK_BACKGROUND
    );
    assert_eq!(
        color_for(&warn, 0, 0, &state, &NoMarkerRules, &settings),
        palette::AUTO_WARN
    );
}

#[test]
fn test_theme_backgrounds() {
    assert_eq!(theme_background(UiTheme::Light), Rgb::new(255, 255, 255));
    assert_eq!(theme_background(UiTheme::Dark), Rgb::new(31, 31, 31));
    assert_eq!(annotation_color(), Rgb::new(0, 255, 0));
}

#[test]
fn test_resolution_is_pure() {
    let settings = HighlightSettings::default();
    let state = everything_on();
    let outcome = DecodeOutcome::Decoded(record("APP", "CTX", Some(Severity::Warn)));
    let first = color_for(&outcome, FILTERED, RAW, &state, &rule, &settings);
    let second = color_for(&outcome, FILTERED, RAW, &state, &rule, &settings);
    assert_eq!(first, second);
    assert_eq!(state, everything_on());
}
