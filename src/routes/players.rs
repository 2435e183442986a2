use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::messages::Locale;
use crate::models::{PlayerDto, PlayerInput, PlayersResponse};
use crate::state::AppState;
use crate::validation::ValidatedJson;

const NOT_FOUND_MESSAGE_KEY: &str = "NotFound.player.message";
const MESSAGE_LOCALE: Locale = Locale::US;

// GET /api/players - List all players
pub async fn get_players(
    State(state): State<AppState>,
) -> Result<Json<PlayersResponse>, ApiError> {
    let players = state.players.find_all().await?;

    Ok(Json(PlayersResponse { players }))
}

// GET /api/players/{id} - Get player by ID
pub async fn get_player_by_id(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<PlayerDto>, ApiError> {
    match state.players.find_by_id(player_id).await? {
        Some(player) => Ok(Json(player)),
        None => {
            let message = state.messages.get_message(
                NOT_FOUND_MESSAGE_KEY,
                &[player_id.to_string()],
                &MESSAGE_LOCALE,
            )?;
            tracing::debug!("Player {} not found", player_id);
            Err(ApiError::NotFound(message))
        }
    }
}

// POST /api/players - Create a player
pub async fn create_player(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<PlayerInput>,
) -> Result<(StatusCode, Json<PlayerDto>), ApiError> {
    let player = state.players.save(input).await?;
    tracing::info!("Created player {}", player.id);

    Ok((StatusCode::CREATED, Json(player)))
}

// PUT /api/players/{id} - Replace a player's fields
// Answers 204 whether or not the id exists; the service decides what an
// unknown id means.
pub async fn update_player_by_id(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<PlayerInput>,
) -> Result<StatusCode, ApiError> {
    state.players.update_by_id(player_id, input).await?;
    tracing::info!("Updated player {}", player_id);

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/players/{id} - Delete a player
pub async fn delete_player_by_id(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.players.delete_by_id(player_id).await?;
    tracing::info!("Deleted player {}", player_id);

    Ok(StatusCode::NO_CONTENT)
}
