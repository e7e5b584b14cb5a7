// src/application/commands/venue_commands.rs
//
// Venue actions

use crate::application::action::{run_blocking, safe_action, ActionResult};
use crate::application::commands::{parse_filter, parse_id, parse_sports};
use crate::application::dto::*;
use crate::application::state::AppState;
use crate::auth::Caller;
use crate::domain::{VenueDraft, VenueUpdate};
use crate::repositories::VenueQuery;

/// List the caller's venues by name
pub async fn get_venues(
    state: &AppState,
    caller: Caller,
    search: Option<String>,
    sport: Option<String>,
) -> ActionResult<Vec<VenueDto>> {
    safe_action("get_venues", || async move {
        let owner = caller.require_owner()?;
        let query = VenueQuery {
            search,
            sport: parse_filter(sport.as_deref())?,
        };

        let service = state.venue_service.clone();
        let venues = run_blocking(move || service.list_venues(owner, &query)).await?;

        Ok(venues.into_iter().map(VenueDto::from).collect())
    })
    .await
}

pub async fn get_venue_by_id(
    state: &AppState,
    caller: Caller,
    venue_id: String,
) -> ActionResult<Option<VenueDto>> {
    safe_action("get_venue_by_id", || async move {
        let owner = caller.require_owner()?;
        let id = parse_id(&venue_id)?;

        let service = state.venue_service.clone();
        let venue = run_blocking(move || service.get_venue(owner, id)).await?;

        Ok(venue.map(VenueDto::from))
    })
    .await
}

pub async fn create_venue(
    state: &AppState,
    caller: Caller,
    dto: CreateVenueDto,
) -> ActionResult<IdDto> {
    safe_action("create_venue", || async move {
        let owner = caller.require_owner()?;

        let draft = VenueDraft {
            name: dto.name,
            address: dto.address,
            city: dto.city,
            state: dto.state,
            postal_code: dto.postal_code,
            capacity: dto.capacity,
            supported_sports: parse_sports(&dto.supported_sports)?,
        };

        let service = state.venue_service.clone();
        let id = run_blocking(move || service.create_venue(owner, draft)).await?;

        Ok(IdDto::from(id))
    })
    .await
}

pub async fn update_venue(
    state: &AppState,
    caller: Caller,
    venue_id: String,
    dto: UpdateVenueDto,
) -> ActionResult<IdDto> {
    safe_action("update_venue", || async move {
        let owner = caller.require_owner()?;
        let id = parse_id(&venue_id)?;

        let changes = VenueUpdate {
            name: dto.name,
            address: dto.address,
            city: dto.city,
            state: dto.state,
            postal_code: dto.postal_code,
            capacity: dto.capacity,
            supported_sports: dto.supported_sports.as_deref().map(parse_sports).transpose()?,
        };

        let service = state.venue_service.clone();
        let id = run_blocking(move || service.update_venue(owner, id, changes)).await?;

        Ok(IdDto::from(id))
    })
    .await
}

/// Delete a venue. Events it hosted stay; only their links to it go.
pub async fn delete_venue(
    state: &AppState,
    caller: Caller,
    venue_id: String,
) -> ActionResult<DeletedDto> {
    safe_action("delete_venue", || async move {
        let owner = caller.require_owner()?;
        let id = parse_id(&venue_id)?;

        let service = state.venue_service.clone();
        run_blocking(move || service.delete_venue(owner, id)).await?;

        Ok(DeletedDto { success: true })
    })
    .await
}
