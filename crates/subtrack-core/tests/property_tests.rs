//! Property-based tests for the timeline
//!
//! Uses proptest to check the query and navigation invariants over
//! generated multi-track scripts.

use proptest::prelude::*;
use subtrack_core::{
    timeline::navigation::{dedup_by_start, filter_track, merge_adjacent, normalize_text},
    utils::{decode_time, format_time},
    NavigationConfig, SubtitleTimeline,
};

const TRACKS: &[&str] = &["Hanzi", "Pinyin", "English"];

/// Render centiseconds as an ASS timestamp
fn timestamp(cs: u32) -> String {
    let seconds = cs / 100;
    format!(
        "{}:{:02}:{:02}.{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60,
        cs % 100
    )
}

/// Generated event: start, duration (both centiseconds), track, text
fn arb_event() -> impl Strategy<Value = (u32, u32, usize, String)> {
    (
        0..30_000u32,
        0..800u32,
        0..TRACKS.len(),
        prop_oneof![
            Just("你好".to_string()),
            Just("Hello  world".to_string()),
            Just("hello world".to_string()),
            "[a-z]{1,8}",
        ],
    )
}

fn arb_script() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_event(), 0..40).prop_map(|events| {
        let mut script = String::from("[Events]\nFormat: Start, End, Style, Text\n");
        for (start, duration, track, text) in events {
            script.push_str(&format!(
                "Dialogue: {},{},{},{text}\n",
                timestamp(start),
                timestamp(start + duration),
                TRACKS[track]
            ));
        }
        script
    })
}

fn load(script: &str) -> SubtitleTimeline {
    let mut timeline = SubtitleTimeline::new();
    assert!(timeline.parse(script));
    timeline
}

proptest! {
    /// Decoding a formatted timestamp reproduces it within a millisecond
    #[test]
    fn timestamp_round_trip(h in 0u32..10, m in 0u32..60, s in 0u32..60, ms in 0u32..1000) {
        let text = format!("{h}:{m:02}:{s:02}.{ms:03}");
        let value = decode_time(&text).unwrap();
        let expected = f64::from(h * 3600 + m * 60 + s) + f64::from(ms) / 1000.0;
        prop_assert!((value - expected).abs() < 1e-6);

        let again = decode_time(&format_time(value)).unwrap();
        prop_assert!((again - value).abs() <= 0.001);
    }

    /// Active events equal a brute-force scan, boundaries included
    #[test]
    fn active_matches_brute_force(script in arb_script(), probe in 0.0f64..320.0) {
        let timeline = load(&script);
        let all = timeline.all_events();

        let mut probes = vec![probe];
        probes.extend(all.iter().flat_map(|e| [e.start, e.end]));

        for t in probes {
            let fast: Vec<usize> = timeline.active_events_at(t).iter().map(|e| e.line).collect();
            let slow: Vec<usize> = all
                .iter()
                .filter(|e| (e.start..=e.end).contains(&t))
                .map(|e| e.line)
                .collect();
            prop_assert_eq!(fast, slow);
        }
    }

    /// Running start dedup on its own output changes nothing
    #[test]
    fn dedup_is_idempotent(script in arb_script(), track in 0..TRACKS.len()) {
        let timeline = load(&script);
        let epsilon = NavigationConfig::default().dedup_epsilon;

        let filtered = filter_track(timeline.all_events(), TRACKS[track]);
        let once = dedup_by_start(&filtered, epsilon);
        let twice = dedup_by_start(&once, epsilon);
        prop_assert_eq!(once, twice);
    }

    /// Merged spans are well-formed and account for every retained event
    #[test]
    fn merge_preserves_events(script in arb_script(), track in 0..TRACKS.len()) {
        let timeline = load(&script);
        let config = NavigationConfig::default();

        let filtered = filter_track(timeline.all_events(), TRACKS[track]);
        let deduped = dedup_by_start(&filtered, config.dedup_epsilon);
        let merged = merge_adjacent(&deduped, config.merge_gap_tolerance);

        let retained = deduped
            .iter()
            .filter(|e| e.end > e.start && !normalize_text(&e.clean_text).is_empty())
            .count();
        prop_assert_eq!(merged.iter().map(|e| e.merged_count).sum::<usize>(), retained);

        for event in &merged {
            prop_assert!(event.end > event.start);
            prop_assert!(event.end >= event.event.end);
        }
    }

    /// Distinct texts never merge
    #[test]
    fn different_texts_stay_apart(starts in prop::collection::vec(0..5_000u32, 1..20)) {
        let mut starts = starts;
        starts.sort_unstable();
        starts.dedup();

        let mut script = String::from("[Events]\nFormat: Start, End, Style, Text\n");
        for (i, start) in starts.iter().enumerate() {
            script.push_str(&format!(
                "Dialogue: {},{},Hanzi,line {i}\n",
                timestamp(*start),
                timestamp(start + 50)
            ));
        }

        let timeline = load(&script);
        prop_assert_eq!(timeline.navigable_events(None).len(), starts.len());
    }

    /// Later queries never jump to an earlier boundary
    #[test]
    fn navigation_is_monotonic(script in arb_script(), a in 0.0f64..320.0, b in 0.0f64..320.0) {
        let timeline = load(&script);
        let (t1, t2) = if a <= b { (a, b) } else { (b, a) };

        if let (Some(n1), Some(n2)) = (timeline.next_event_time(t1), timeline.next_event_time(t2)) {
            prop_assert!(n1 <= n2);
        }
        if let (Some(p1), Some(p2)) = (timeline.prev_event_time(t1), timeline.prev_event_time(t2)) {
            prop_assert!(p1 <= p2);
        }
    }
}
