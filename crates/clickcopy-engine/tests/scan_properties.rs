use clickcopy_config::Settings;
use clickcopy_engine::scan::{SpanMatch, scan};
use proptest::prelude::*;

fn settings(start: &str, end: &str) -> Settings {
    Settings {
        start_token: start.to_string(),
        end_token: end.to_string(),
        ..Settings::default()
    }
}

/// Lines built from delimiter fragments and filler, so matches are common.
fn line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("[".to_string()),
            Just("]".to_string()),
            Just("[[".to_string()),
            Just("]]".to_string()),
            Just("`".to_string()),
            Just("\n".to_string()),
            "[a-z ]{0,4}",
            "[é•]",
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

fn tokens() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        Just(("[[".to_string(), "]]".to_string())),
        Just(("`".to_string(), "`".to_string())),
        Just(("{".to_string(), "}".to_string())),
        Just(("ab".to_string(), "ba".to_string())),
        Just(("•".to_string(), "•".to_string())),
    ]
}

proptest! {
    #[test]
    fn matches_are_ordered_disjoint_and_single_line(text in line(), (start, end) in tokens()) {
        let settings = settings(&start, &end);
        let matches: Vec<SpanMatch> = scan(&text, &settings).collect();

        for m in &matches {
            prop_assert!(m.full.start < m.full.end);
            let slice = &text[m.full.start..m.full.end];
            prop_assert!(!slice.contains(['\n', '\r']));
            prop_assert!(!m.inner_text.is_empty());
            prop_assert!(slice.starts_with(start.as_str()));
            prop_assert!(slice.ends_with(end.as_str()));
        }
        for pair in matches.windows(2) {
            prop_assert!(pair[0].full.end <= pair[1].full.start);
        }
    }

    #[test]
    fn scanning_is_idempotent(text in line(), (start, end) in tokens()) {
        let settings = settings(&start, &end);
        let spans = scan(&text, &settings);

        let first: Vec<SpanMatch> = spans.clone().collect();
        let second: Vec<SpanMatch> = spans.collect();
        let fresh: Vec<SpanMatch> = scan(&text, &settings).collect();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &fresh);
    }

    #[test]
    fn doubled_opener_is_password(secret in "[a-z0-9]{1,12}") {
        let settings = Settings::default();
        let text = format!("[[[[{secret}]]");
        let matches: Vec<SpanMatch> = scan(&text, &settings).collect();

        prop_assert_eq!(matches.len(), 1);
        prop_assert!(matches[0].is_password);
        prop_assert!(!matches[0].clear_clipboard);
        prop_assert_eq!(&matches[0].inner_text, &secret);
        prop_assert_eq!(matches[0].display_text.chars().count(), secret.chars().count());
    }

    #[test]
    fn doubled_closer_clears(content in "[a-z0-9 ]{1,12}") {
        let settings = Settings::default();
        let text = format!("[[{content}]]]]");
        let matches: Vec<SpanMatch> = scan(&text, &settings).collect();

        prop_assert_eq!(matches.len(), 1);
        prop_assert!(matches[0].clear_clipboard);
        prop_assert!(!matches[0].is_password);
    }
}
