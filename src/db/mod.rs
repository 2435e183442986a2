use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::models::{Player, PlayerInput};

/// Create the players table if it does not exist yet
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS players (
               id            BLOB PRIMARY KEY NOT NULL,
               name          TEXT NOT NULL,
               team          TEXT,
               position      TEXT,
               jersey_number INTEGER,
               created_at    TEXT NOT NULL,
               updated_at    TEXT NOT NULL
           )"#
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Round-trip a trivial query to check the pool can reach the database
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

// Player queries
pub async fn get_all_players(pool: &SqlitePool) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT * FROM players ORDER BY name, created_at"#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_player_by_id(pool: &SqlitePool, player_id: Uuid) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT * FROM players WHERE id = ?"#
    )
    .bind(player_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_player(pool: &SqlitePool, input: &PlayerInput) -> Result<Player, sqlx::Error> {
    let player_id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"INSERT INTO players (id, name, team, position, jersey_number, created_at, updated_at)
           VALUES (?, ?, ?, ?, ?, ?, ?)"#
    )
    .bind(player_id)
    .bind(&input.name)
    .bind(&input.team)
    .bind(&input.position)
    .bind(input.jersey_number)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_player_by_id(pool, player_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Replace the mutable fields of a player. Returns the number of rows touched
/// (0 when the id is unknown).
pub async fn update_player(pool: &SqlitePool, player_id: Uuid, input: &PlayerInput) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE players
           SET name = ?, team = ?, position = ?, jersey_number = ?, updated_at = ?
           WHERE id = ?"#
    )
    .bind(&input.name)
    .bind(&input.team)
    .bind(&input.position)
    .bind(input.jersey_number)
    .bind(Utc::now())
    .bind(player_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Returns the number of rows removed (0 when the id is unknown).
pub async fn delete_player(pool: &SqlitePool, player_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"DELETE FROM players WHERE id = ?"#
    )
    .bind(player_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
