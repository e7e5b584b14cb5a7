// src/application/commands/event_commands.rs
//
// Event actions
//
// RULES:
// - Accept DTOs and raw strings
// - Resolve the owner, parse, call the service
// - Return DTOs wrapped in ActionResult

use crate::application::action::{run_blocking, safe_action, ActionResult};
use crate::application::commands::{parse_filter, parse_id, parse_ids, parse_sport, parse_timestamp};
use crate::application::dto::*;
use crate::application::state::AppState;
use crate::auth::Caller;
use crate::domain::EventUpdate;
use crate::repositories::EventQuery;
use crate::services::{CreateEventRequest, UpdateEventRequest};

/// List the caller's events with their venues, soonest first
pub async fn get_events(
    state: &AppState,
    caller: Caller,
    search: Option<String>,
    sport: Option<String>,
) -> ActionResult<Vec<EventWithVenuesDto>> {
    safe_action("get_events", || async move {
        let owner = caller.require_owner()?;
        let query = EventQuery {
            search,
            sport: parse_filter(sport.as_deref())?,
        };

        let service = state.event_service.clone();
        let events = run_blocking(move || service.list_events(owner, &query)).await?;

        Ok(events.into_iter().map(EventWithVenuesDto::from).collect())
    })
    .await
}

/// Single event; `None` when it does not exist or belongs to someone else
pub async fn get_event_by_id(
    state: &AppState,
    caller: Caller,
    event_id: String,
) -> ActionResult<Option<EventWithVenuesDto>> {
    safe_action("get_event_by_id", || async move {
        let owner = caller.require_owner()?;
        let id = parse_id(&event_id)?;

        let service = state.event_service.clone();
        let event = run_blocking(move || service.get_event(owner, id)).await?;

        Ok(event.map(EventWithVenuesDto::from))
    })
    .await
}

pub async fn create_event(
    state: &AppState,
    caller: Caller,
    dto: CreateEventDto,
) -> ActionResult<IdDto> {
    safe_action("create_event", || async move {
        let owner = caller.require_owner()?;

        let request = CreateEventRequest {
            name: dto.name,
            sport_type: parse_sport(&dto.sport_type)?,
            date_time: parse_timestamp(&dto.date_time)?,
            description: dto.description,
            venue_ids: parse_ids(&dto.venue_ids)?,
        };

        let service = state.event_service.clone();
        let id = run_blocking(move || service.create_event(owner, request)).await?;

        Ok(IdDto::from(id))
    })
    .await
}

/// Partial update. `venue_ids` present (even empty) replaces every link.
pub async fn update_event(
    state: &AppState,
    caller: Caller,
    event_id: String,
    dto: UpdateEventDto,
) -> ActionResult<IdDto> {
    safe_action("update_event", || async move {
        let owner = caller.require_owner()?;
        let id = parse_id(&event_id)?;

        let request = UpdateEventRequest {
            changes: EventUpdate {
                name: dto.name,
                sport_type: dto.sport_type.as_deref().map(parse_sport).transpose()?,
                date_time: dto.date_time.as_deref().map(parse_timestamp).transpose()?,
                description: dto.description,
            },
            venue_ids: dto.venue_ids.as_deref().map(parse_ids).transpose()?,
        };

        let service = state.event_service.clone();
        let id = run_blocking(move || service.update_event(owner, id, request)).await?;

        Ok(IdDto::from(id))
    })
    .await
}

pub async fn delete_event(
    state: &AppState,
    caller: Caller,
    event_id: String,
) -> ActionResult<DeletedDto> {
    safe_action("delete_event", || async move {
        let owner = caller.require_owner()?;
        let id = parse_id(&event_id)?;

        let service = state.event_service.clone();
        run_blocking(move || service.delete_event(owner, id)).await?;

        Ok(DeletedDto { success: true })
    })
    .await
}

/// Number of events the caller owns (dashboard header)
pub async fn count_events(state: &AppState, caller: Caller) -> ActionResult<CountDto> {
    safe_action("count_events", || async move {
        let owner = caller.require_owner()?;

        let service = state.event_service.clone();
        let count = run_blocking(move || service.count_events(owner)).await?;

        Ok(CountDto { count })
    })
    .await
}
