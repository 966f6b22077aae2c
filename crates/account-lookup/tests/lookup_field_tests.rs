//! Integration tests for the lookup field against an in-memory store.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use account_lookup::prelude::*;
use account_lookup::widget::{FETCH_FAILED_MESSAGE, MISSING_ID};
use common::{InMemorySearch, accounts, init_tracing};

fn account_config() -> LookupConfig {
    LookupConfig {
        filter_column: "name".into(),
        identifier_column: "accountid".into(),
        entity_set: "accounts".into(),
        ..Default::default()
    }
}

fn names(field: &LookupField) -> Vec<&str> {
    field.candidates().iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn test_single_term_filter() {
    let mut field = LookupField::new(
        LookupConfig {
            filter_column: "fullname".into(),
            ..account_config()
        },
        accounts().into_arc(),
    );
    for text in ["foo", " foo", "foo  "] {
        let ticket = field.text_changed(text).unwrap();
        assert_eq!(
            ticket.query.filter_expr().unwrap().to_string(),
            "contains(fullname,'foo')"
        );
    }
}

#[test]
fn test_whitespace_only_text_searches_empty_term() {
    let mut field = LookupField::new(account_config(), accounts().into_arc());
    let ticket = field.text_changed("   ").expect("whitespace is not empty");
    assert_eq!(
        ticket.query.to_query_string(),
        "?$filter=contains(name,'')&$select=name,accountid"
    );
}

#[tokio::test]
async fn test_typing_session() {
    init_tracing();
    let search = accounts().into_arc();
    let mut field = LookupField::new(account_config(), search.clone());

    field.edit_text("acme").await;
    assert_eq!(names(&field), ["Acme", "Acme Corp"]);
    assert_eq!(field.status_message(), "Some Similar Items Found!");
    assert_eq!(field.status_color(), StatusColor::Orange);
    assert!(field.is_panel_visible());

    field.edit_text("acme zzz").await;
    assert_eq!(names(&field), ["Acme", "Acme Corp"], "or join matches either term");

    field.edit_text("zzz").await;
    assert!(field.candidates().is_empty());
    assert_eq!(field.phase(), FieldPhase::NoMatch);
    assert_eq!(field.status_color(), StatusColor::Green);

    field.edit_text("").await;
    assert_eq!(search.request_count(), 3);
    assert!(!field.is_panel_visible());
}

#[tokio::test]
async fn test_and_join() {
    let mut field = LookupField::new(
        LookupConfig {
            filter_type: "AND".into(),
            ..account_config()
        },
        accounts().into_arc(),
    );
    field.edit_text("acme corp").await;
    assert_eq!(names(&field), ["Acme Corp"]);
}

#[tokio::test]
async fn test_quote_in_search_text() {
    let search = accounts().into_arc();
    let mut field = LookupField::new(account_config(), search.clone());

    field.edit_text("O'Brien").await;
    assert_eq!(names(&field), ["O'Brien Ltd"]);
    assert_eq!(
        search.requests.lock()[0].1,
        "?$filter=contains(name,'O''Brien')&$select=name,accountid"
    );
}

#[tokio::test]
async fn test_missing_identifier_maps_to_placeholder() {
    let mut field = LookupField::new(account_config(), accounts().into_arc());
    field.edit_text("northwind").await;
    assert_eq!(field.candidates(), [Candidate::new("Northwind", MISSING_ID)]);
}

#[tokio::test]
async fn test_clearing_after_error() {
    let search = accounts().into_arc();
    let mut field = LookupField::new(account_config(), search.clone());

    search.set_failing(true);
    field.edit_text("acme").await;
    assert_eq!(field.phase(), FieldPhase::Error);
    assert_eq!(field.status_message(), FETCH_FAILED_MESSAGE);
    assert_eq!(field.status_color(), StatusColor::Red);

    field.focus_in();
    field.edit_text("").await;
    assert!(!field.is_panel_visible());
    assert_eq!(field.status_color(), StatusColor::Green);
    assert_eq!(field.status_message(), "No Similar Items Found!");
}

#[tokio::test]
async fn test_unknown_entity_set_is_fetch_failure() {
    let mut field = LookupField::new(
        LookupConfig {
            entity_set: "acounts".into(),
            ..account_config()
        },
        accounts().into_arc(),
    );
    field.edit_text("acme").await;
    assert_eq!(field.phase(), FieldPhase::Error);
    assert!(!field.is_panel_visible());
}

#[tokio::test]
async fn test_out_of_order_responses() {
    init_tracing();
    let search = Arc::new(InMemorySearch::new("accounts").with_record(serde_json::json!({
        "name": "Acme", "accountid": "a-1"
    })));
    let mut field = LookupField::new(account_config(), search.clone());

    // The first search is slow and finishes after the second
    search.delay_when("'ac'", Duration::from_millis(100));
    let slow = field.text_changed("ac").unwrap();
    let slow_result = tokio::spawn(field.execute(&slow));

    let fast = field.text_changed("zzz").unwrap();
    let fast_result = field.execute(&fast).await;
    assert!(field.apply_search_result(&fast, fast_result));

    let slow_result = slow_result.await.expect("search task panicked");
    assert_eq!(slow_result.as_ref().map(Vec::len).ok(), Some(1));
    assert!(!field.apply_search_result(&slow, slow_result));

    assert!(field.candidates().is_empty());
    assert_eq!(field.phase(), FieldPhase::NoMatch);
}

#[tokio::test]
async fn test_resolved_emitted_once_per_focus_loss() {
    let mut field = LookupField::new(account_config(), accounts().into_arc());
    let duplicates = Arc::new(AtomicUsize::new(0));
    let emissions = Arc::new(AtomicUsize::new(0));

    let (d, e) = (duplicates.clone(), emissions.clone());
    field.resolved.connect(move |resolution| {
        e.fetch_add(1, Ordering::SeqCst);
        if resolution.is_duplicate {
            d.fetch_add(1, Ordering::SeqCst);
        }
    });

    field.edit_text("ACME CORP").await;
    assert!(field.focus_out().is_duplicate);
    assert_eq!(field.status_message(), "Similar Item Found!");
    assert_eq!(field.status_color(), StatusColor::Red);

    field.focus_in();
    field.edit_text("Acme Cor").await;
    assert!(!field.focus_out().is_duplicate);

    assert_eq!(emissions.load(Ordering::SeqCst), 2);
    assert_eq!(duplicates.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_panel_view_tracks_geometry() {
    let mut field = LookupField::new(account_config(), accounts().into_arc());
    field.handle_event(FieldEvent::Resized(Rect::new(0.0, 0.0, 320.0, 32.0))).await;
    field.handle_event(FieldEvent::TextChanged("acme".into())).await;

    let first = field.view().panel().unwrap().layout;
    assert_eq!(first.rect.origin, Point::new(0.0, 37.0));

    field.handle_event(FieldEvent::Resized(Rect::new(8.0, 100.0, 320.0, 32.0))).await;
    let moved = field.view().panel().unwrap().layout;
    assert_eq!(moved.rect.origin, Point::new(8.0, 137.0));
    assert_eq!(moved.z_order, 9999);
}
