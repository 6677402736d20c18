//! In-memory warm cache for the game catalog.
//!
//! The catalog is seeded once and then immutable, so it is loaded whole at
//! start-up; the progress and scoring endpoints iterate it on every request
//! and should not pay a Postgres round-trip for four rows.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use sqlx::PgPool;

/// One immutable row from the `games` table.
#[derive(Debug, Clone)]
pub struct GameDef {
    pub id: i32,
    pub title: String,
    pub emoji: String,
    pub is_quiz: bool,
}

/// Global map id → GameDef (read-only once warmed).
pub static GAMES: Lazy<DashMap<i32, GameDef>> = Lazy::new(DashMap::new);

/// Fetch the `games` table and populate [`GAMES`]. Idempotent.
pub async fn warm_games(db: &PgPool) -> anyhow::Result<()> {
    let rows = sqlx::query_as::<_, (i32, String, String, bool)>(
        "SELECT id, title, emoji, is_quiz FROM games",
    )
    .fetch_all(db)
    .await?;

    for (id, title, emoji, is_quiz) in rows {
        GAMES.insert(
            id,
            GameDef {
                id,
                title,
                emoji,
                is_quiz,
            },
        );
    }
    Ok(())
}

/// Retrieve a cached game definition by ID.
pub fn get_game(id: i32) -> Option<GameDef> {
    GAMES.get(&id).map(|e| e.value().clone())
}

/// Whole catalog, ordered by id.
pub fn all_games() -> Vec<GameDef> {
    let mut games: Vec<GameDef> = GAMES.iter().map(|e| e.value().clone()).collect();
    games.sort_by_key(|g| g.id);
    games
}

/// Warm every in-memory cache we have (called once at startup).
pub async fn warm_all(db: &PgPool) {
    if let Err(e) = warm_games(db).await {
        log::warn!("cache warm-up failed: {e:?}");
    }
}
