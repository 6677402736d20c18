//! Catalog cache accessors (warmed by hand, no database needed).

use cyberquest_server::cache::{all_games, get_game, GameDef, GAMES};
use std::sync::Once;

static FILL: Once = Once::new();

// Tests in this binary share the global map; fill it exactly once.
fn fill_catalog() {
    FILL.call_once(|| {
        for (id, title, emoji) in [
            (3, "Passwords & Passphrases", "🔐"),
            (1, "My Digital Footprint", "👣"),
        ] {
            GAMES.insert(
                id,
                GameDef {
                    id,
                    title: title.into(),
                    emoji: emoji.into(),
                    is_quiz: true,
                },
            );
        }
    });
}

#[test]
fn get_game_returns_cached_rows() {
    fill_catalog();
    let game = get_game(3).expect("cached game");
    assert_eq!(game.title, "Passwords & Passphrases");
    assert!(game.is_quiz);
}

#[test]
fn missing_id_returns_none() {
    fill_catalog();
    assert!(get_game(-9999).is_none());
}

#[test]
fn all_games_is_ordered_by_id() {
    fill_catalog();
    let ids: Vec<i32> = all_games().iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 3]);
}
