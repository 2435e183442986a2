//! Player service: the collaborator the HTTP handlers delegate to.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::db;
use crate::error::ApiError;
use crate::models::{PlayerDto, PlayerInput};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerService: Send + Sync {
    async fn find_all(&self) -> Result<Vec<PlayerDto>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PlayerDto>, ApiError>;
    async fn save(&self, input: PlayerInput) -> Result<PlayerDto, ApiError>;
    /// Unknown ids are ignored.
    async fn update_by_id(&self, id: Uuid, input: PlayerInput) -> Result<(), ApiError>;
    /// Unknown ids are ignored.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), ApiError>;
    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<(), ApiError>;
}

/// `PlayerService` backed by the SQLite `players` table
#[derive(Clone)]
pub struct SqlitePlayerService {
    pool: SqlitePool,
}

impl SqlitePlayerService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerService for SqlitePlayerService {
    async fn find_all(&self) -> Result<Vec<PlayerDto>, ApiError> {
        let players = db::get_all_players(&self.pool).await?;
        Ok(players.iter().map(|p| p.to_dto()).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PlayerDto>, ApiError> {
        let player = db::get_player_by_id(&self.pool, id).await?;
        Ok(player.map(|p| p.to_dto()))
    }

    async fn save(&self, input: PlayerInput) -> Result<PlayerDto, ApiError> {
        let player = db::insert_player(&self.pool, &input).await?;
        Ok(player.to_dto())
    }

    async fn update_by_id(&self, id: Uuid, input: PlayerInput) -> Result<(), ApiError> {
        let updated = db::update_player(&self.pool, id, &input).await?;
        if updated == 0 {
            tracing::debug!("Update skipped, no player with id {}", id);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), ApiError> {
        let deleted = db::delete_player(&self.pool, id).await?;
        if deleted == 0 {
            tracing::debug!("Delete skipped, no player with id {}", id);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), ApiError> {
        db::ping(&self.pool).await?;
        Ok(())
    }
}
