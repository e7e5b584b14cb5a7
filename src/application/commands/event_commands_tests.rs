// src/application/commands/event_commands_tests.rs
//
// Event actions end to end over an in-memory store.

use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::application::commands::*;
use crate::application::dto::*;
use crate::application::state::AppState;
use crate::auth::Caller;
use crate::events::ViewsInvalidated;

fn setup() -> (AppState, Caller) {
    let state = AppState::in_memory().unwrap();
    (state, Caller::from(Uuid::new_v4()))
}

fn event_dto(name: &str, sport: &str, date_time: &str, venue_ids: Vec<String>) -> CreateEventDto {
    CreateEventDto {
        name: name.to_string(),
        sport_type: sport.to_string(),
        date_time: date_time.to_string(),
        description: None,
        venue_ids,
    }
}

async fn venue(state: &AppState, caller: Caller, name: &str, sports: &[&str]) -> String {
    let dto = CreateVenueDto {
        name: name.to_string(),
        supported_sports: sports.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };
    create_venue(state, caller, dto).await.into_result().unwrap().id
}

async fn event(state: &AppState, caller: Caller, dto: CreateEventDto) -> String {
    create_event(state, caller, dto).await.into_result().unwrap().id
}

fn names(events: &[EventWithVenuesDto]) -> Vec<&str> {
    events.iter().map(|e| e.event.name.as_str()).collect()
}

#[tokio::test]
async fn test_anonymous_caller_is_rejected_everywhere() {
    let (state, _) = setup();
    let anon = Caller::anonymous();

    let listed = get_events(&state, anon, None, None).await;
    assert_eq!(listed.error(), Some("Not authenticated"));

    let created = create_event(
        &state,
        anon,
        event_dto("Derby", "soccer", "2026-03-01T15:00:00Z", vec![]),
    )
    .await;
    assert_eq!(created.error(), Some("Not authenticated"));

    // Owner is resolved before the id is even parsed
    let deleted = delete_event(&state, anon, "garbage".to_string()).await;
    assert_eq!(deleted.error(), Some("Not authenticated"));

    assert!(state.event_bus.get_event_log().is_empty());
}

#[tokio::test]
async fn test_create_then_fetch_returns_linked_venues() {
    let (state, me) = setup();
    let v1 = venue(&state, me, "Wembley", &["soccer"]).await;
    let v2 = venue(&state, me, "Anfield", &["soccer"]).await;

    let id = event(
        &state,
        me,
        event_dto(
            "Cup Final",
            "soccer",
            "2026-05-16T14:00:00Z",
            vec![v2.clone(), v1.clone()],
        ),
    )
    .await;

    let fetched = get_event_by_id(&state, me, id.clone())
        .await
        .into_result()
        .unwrap()
        .unwrap();

    let mut venue_ids: Vec<_> = fetched.venues.iter().map(|v| v.id.clone()).collect();
    venue_ids.sort();
    let mut expected = vec![v1, v2];
    expected.sort();
    assert_eq!(venue_ids, expected);
    assert_eq!(fetched.event.id, id);
    assert_eq!(fetched.event.date_time, "2026-05-16T14:00:00.000Z");
}

#[tokio::test]
async fn test_other_owner_cannot_see_or_touch() {
    let (state, me) = setup();
    let stranger = Caller::from(Uuid::new_v4());
    let id = event(
        &state,
        me,
        event_dto("Private", "golf", "2026-08-01T09:00:00Z", vec![]),
    )
    .await;

    let fetched = get_event_by_id(&state, stranger, id.clone()).await;
    assert_eq!(fetched.into_result().unwrap(), None);

    let listed = get_events(&state, stranger, None, None).await.into_result().unwrap();
    assert!(listed.is_empty());

    let update = UpdateEventDto {
        name: Some("Hijacked".to_string()),
        ..Default::default()
    };
    let updated = update_event(&state, stranger, id.clone(), update).await;
    assert_eq!(updated.error(), Some("Resource not found"));

    let deleted = delete_event(&state, stranger, id.clone()).await;
    assert_eq!(deleted.error(), Some("Resource not found"));

    let mine = get_event_by_id(&state, me, id).await.into_result().unwrap().unwrap();
    assert_eq!(mine.event.name, "Private");
}

#[tokio::test]
async fn test_list_is_ordered_and_filtered() {
    let (state, me) = setup();
    event(&state, me, event_dto("Late Tennis", "tennis", "2026-09-10T18:00:00Z", vec![])).await;
    event(&state, me, event_dto("Early Soccer", "soccer", "2026-01-10T18:00:00Z", vec![])).await;
    event(&state, me, event_dto("Mid soccer cup", "soccer", "2026-05-10T18:00:00Z", vec![])).await;

    let all = get_events(&state, me, None, None).await.into_result().unwrap();
    assert_eq!(names(&all), vec!["Early Soccer", "Mid soccer cup", "Late Tennis"]);

    let sentinel = get_events(&state, me, None, Some("all".to_string()))
        .await
        .into_result()
        .unwrap();
    assert_eq!(sentinel, all);

    let soccer = get_events(&state, me, None, Some("soccer".to_string()))
        .await
        .into_result()
        .unwrap();
    assert_eq!(names(&soccer), vec!["Early Soccer", "Mid soccer cup"]);

    let search = get_events(&state, me, Some("SOCCER".to_string()), None)
        .await
        .into_result()
        .unwrap();
    assert_eq!(names(&search), vec!["Early Soccer", "Mid soccer cup"]);

    let both = get_events(
        &state,
        me,
        Some("cup".to_string()),
        Some("soccer".to_string()),
    )
    .await
    .into_result()
    .unwrap();
    assert_eq!(names(&both), vec!["Mid soccer cup"]);
}

#[tokio::test]
async fn test_search_is_unicode_case_insensitive_and_untrimmed() {
    let (state, me) = setup();
    event(&state, me, event_dto("Étoile Derby", "soccer", "2026-03-01T18:00:00Z", vec![])).await;
    event(&state, me, event_dto("World cup", "soccer", "2026-03-02T18:00:00Z", vec![])).await;
    event(&state, me, event_dto("Cupcake Classic", "other", "2026-03-03T18:00:00Z", vec![])).await;

    let accented = get_events(&state, me, Some("étoile".to_string()), None)
        .await
        .into_result()
        .unwrap();
    assert_eq!(names(&accented), vec!["Étoile Derby"]);

    // The leading space is part of the substring
    let spaced = get_events(&state, me, Some(" cup".to_string()), None)
        .await
        .into_result()
        .unwrap();
    assert_eq!(names(&spaced), vec!["World cup"]);
}

#[tokio::test]
async fn test_unknown_sport_filter_fails() {
    let (state, me) = setup();
    let result = get_events(&state, me, None, Some("quidditch".to_string())).await;
    assert!(!result.is_success());
    assert!(result.error().unwrap().contains("quidditch"));
}

#[tokio::test]
async fn test_update_replaces_or_keeps_venues() {
    let (state, me) = setup();
    let v1 = venue(&state, me, "North", &[]).await;
    let v2 = venue(&state, me, "South", &[]).await;
    let id = event(
        &state,
        me,
        event_dto("Match", "hockey", "2026-02-01T19:00:00Z", vec![v1.clone()]),
    )
    .await;

    let venue_ids = |state: &AppState, id: String| {
        let state = state.clone();
        async move {
            get_event_by_id(&state, me, id)
                .await
                .into_result()
                .unwrap()
                .unwrap()
                .venues
                .into_iter()
                .map(|v| v.id)
                .collect::<Vec<_>>()
        }
    };

    // Absent venue_ids leaves links alone
    let rename = UpdateEventDto {
        name: Some("Match Day".to_string()),
        ..Default::default()
    };
    update_event(&state, me, id.clone(), rename).await.into_result().unwrap();
    assert_eq!(venue_ids(&state, id.clone()).await, vec![v1.clone()]);

    // A new set replaces the old one
    let swap = UpdateEventDto {
        venue_ids: Some(vec![v2.clone()]),
        ..Default::default()
    };
    update_event(&state, me, id.clone(), swap).await.into_result().unwrap();
    assert_eq!(venue_ids(&state, id.clone()).await, vec![v2]);

    // An empty set clears them
    let clear = UpdateEventDto {
        venue_ids: Some(vec![]),
        ..Default::default()
    };
    update_event(&state, me, id.clone(), clear).await.into_result().unwrap();
    assert!(venue_ids(&state, id.clone()).await.is_empty());

    let fetched = get_event_by_id(&state, me, id).await.into_result().unwrap().unwrap();
    assert_eq!(fetched.event.name, "Match Day");
    assert!(fetched.event.updated_at >= fetched.event.created_at);
}

#[tokio::test]
async fn test_update_clears_description_only_when_null() {
    let (state, me) = setup();
    let mut dto = event_dto("Open", "golf", "2026-07-01T08:00:00Z", vec![]);
    dto.description = Some("Round one".to_string());
    let id = event(&state, me, dto).await;

    let keep: UpdateEventDto = serde_json::from_str(r#"{"name":"Open R1"}"#).unwrap();
    update_event(&state, me, id.clone(), keep).await.into_result().unwrap();
    let fetched = get_event_by_id(&state, me, id.clone()).await.into_result().unwrap().unwrap();
    assert_eq!(fetched.event.description.as_deref(), Some("Round one"));

    let clear: UpdateEventDto = serde_json::from_str(r#"{"description":null}"#).unwrap();
    update_event(&state, me, id.clone(), clear).await.into_result().unwrap();
    let fetched = get_event_by_id(&state, me, id).await.into_result().unwrap().unwrap();
    assert_eq!(fetched.event.description, None);
}

#[tokio::test]
async fn test_concurrent_partial_updates_keep_both_fields() {
    let (state, me) = setup();
    let id = event(&state, me, event_dto("Derby", "soccer", "2026-04-01T15:00:00Z", vec![])).await;

    let rename = UpdateEventDto {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };
    let describe: UpdateEventDto = serde_json::from_str(r#"{"description":"desc"}"#).unwrap();

    let (renamed, described) = tokio::join!(
        update_event(&state, me, id.clone(), rename),
        update_event(&state, me, id.clone(), describe),
    );
    renamed.into_result().unwrap();
    described.into_result().unwrap();

    let fetched = get_event_by_id(&state, me, id).await.into_result().unwrap().unwrap();
    assert_eq!(fetched.event.name, "Renamed");
    assert_eq!(fetched.event.description.as_deref(), Some("desc"));
    assert_eq!(fetched.event.sport_type, "soccer");
}

#[tokio::test]
async fn test_foreign_venue_fails_create_without_leftovers() {
    let (state, me) = setup();
    let stranger = Caller::from(Uuid::new_v4());
    let theirs = venue(&state, stranger, "Not Yours", &[]).await;

    let result = create_event(
        &state,
        me,
        event_dto("Sneaky", "soccer", "2026-03-03T12:00:00Z", vec![theirs]),
    )
    .await;
    assert_eq!(result.error(), Some("Resource not found"));

    let count = count_events(&state, me).await.into_result().unwrap();
    assert_eq!(count.count, 0);
}

#[tokio::test]
async fn test_delete_twice_reports_not_found() {
    let (state, me) = setup();
    let id = event(
        &state,
        me,
        event_dto("Once", "volleyball", "2026-04-04T10:00:00Z", vec![]),
    )
    .await;

    let first = delete_event(&state, me, id.clone()).await;
    assert_eq!(first.into_result().unwrap(), DeletedDto { success: true });

    let second = delete_event(&state, me, id.clone()).await;
    assert_eq!(second.error(), Some("Resource not found"));

    let gone = get_event_by_id(&state, me, id).await;
    assert_eq!(gone.into_result().unwrap(), None);
}

#[tokio::test]
async fn test_bad_input_is_reported() {
    let (state, me) = setup();

    let bad_id = get_event_by_id(&state, me, "nope".to_string()).await;
    assert!(bad_id.error().unwrap().starts_with("Invalid input"));

    let bad_time = create_event(&state, me, event_dto("X", "soccer", "next friday", vec![])).await;
    assert!(bad_time.error().unwrap().starts_with("Invalid input"));

    let bad_sport = create_event(
        &state,
        me,
        event_dto("X", "cricket", "2026-01-01T00:00:00Z", vec![]),
    )
    .await;
    assert!(bad_sport.error().unwrap().starts_with("Invalid input"));

    let blank = create_event(&state, me, event_dto("  ", "soccer", "2026-01-01T00:00:00Z", vec![])).await;
    assert!(!blank.is_success());
}

#[tokio::test]
async fn test_out_of_range_start_time_is_rejected_and_list_stays_readable() {
    let (state, me) = setup();
    event(&state, me, event_dto("Normal", "soccer", "2026-06-01T12:00:00Z", vec![])).await;

    let overflow = create_event(
        &state,
        me,
        event_dto("Far Future", "soccer", "9999-12-31T23:00:00-05:00", vec![]),
    )
    .await;
    assert!(overflow.error().unwrap().starts_with("Invalid input"));

    let id = event(&state, me, event_dto("Movable", "golf", "2026-06-02T12:00:00Z", vec![])).await;
    let shift = UpdateEventDto {
        date_time: Some("9999-12-31T23:00:00-05:00".to_string()),
        ..Default::default()
    };
    let shifted = update_event(&state, me, id, shift).await;
    assert!(shifted.error().unwrap().starts_with("Invalid input"));

    let listed = get_events(&state, me, None, None).await.into_result().unwrap();
    assert_eq!(names(&listed), vec!["Normal", "Movable"]);
}

#[tokio::test]
async fn test_mutations_invalidate_expected_views() {
    let (state, me) = setup();
    let seen = Arc::new(RwLock::new(Vec::new()));
    let sink = Arc::clone(&seen);
    state.event_bus.subscribe::<ViewsInvalidated, _>(move |event| {
        sink.write().unwrap().push(event.paths.clone());
    });

    let id = event(&state, me, event_dto("Gala", "other", "2026-12-01T20:00:00Z", vec![])).await;
    update_event(&state, me, id.clone(), UpdateEventDto::default())
        .await
        .into_result()
        .unwrap();
    delete_event(&state, me, id.clone()).await.into_result().unwrap();
    // A failed delete invalidates nothing
    delete_event(&state, me, id.clone()).await;

    let seen = seen.read().unwrap();
    assert_eq!(
        *seen,
        vec![
            vec!["/dashboard".to_string()],
            vec!["/dashboard".to_string(), format!("/events/{}/edit", id)],
            vec!["/dashboard".to_string()],
        ]
    );
}
