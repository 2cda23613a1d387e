use kotoba_core::favorites::FavoriteRecord;
use kotoba_core::types::{AppEvent, DisplayResult};

use crate::ui::{parse_input, render};

#[test]
fn plain_text_is_a_staged_query() {
    assert!(matches!(parse_input("  taberu "), Some(AppEvent::Query(q)) if q == "taberu"));
    assert!(parse_input("   ").is_none());
}

#[test]
fn commands() {
    assert!(matches!(parse_input("?学"), Some(AppEvent::QuickQuery(q)) if q == "学"));
    assert!(matches!(parse_input(":2"), Some(AppEvent::SelectSuggestion(2))));
    assert!(matches!(parse_input("+3"), Some(AppEvent::AddFavorite(3))));
    assert!(matches!(parse_input(":fav"), Some(AppEvent::ListFavorites)));
    assert!(matches!(parse_input(":q"), Some(AppEvent::Quit)));
    assert!(parse_input(":nope").is_none());
    assert!(parse_input("+x").is_none());

    match parse_input(":rm 食べる | 1. to eat; 2. to live on") {
        Some(AppEvent::RemoveFavorite { word, definition }) => {
            assert_eq!(word, "食べる");
            assert_eq!(definition, "1. to eat; 2. to live on");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn numbered_results_continue_across_tiers() {
    let text = render(&AppEvent::ShowResults {
        title: "Prefix matches".into(),
        numbered_from: Some(3),
        results: vec![DisplayResult {
            term: "学生".into(),
            reading: "がくせい".into(),
            definition: "1. student".into(),
        }],
    })
    .unwrap();

    assert!(text.contains("  3. 学生 [がくせい]"));
    assert!(text.contains("1. student"));
}

#[test]
fn favorites_render_one_sense_per_line() {
    let text = render(&AppEvent::ShowFavorites(vec![FavoriteRecord::new(
        "食べる",
        "たべる",
        "1. to eat; 2. to live on",
    )]))
    .unwrap();
    assert!(text.contains("- 1. to eat\n     - 2. to live on"));

    assert_eq!(
        render(&AppEvent::ShowFavorites(Vec::new())).as_deref(),
        Some("No favorites saved yet.")
    );
    assert!(render(&AppEvent::Ready).is_none());
}
