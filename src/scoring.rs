//! Pure helpers behind the score and moderation routes.

use chrono::{DateTime, Utc};

/// Highest reachable score per catalog game (10 points a question).
/// Games without an entry report 0, which also pins their progress to 0%.
pub fn max_score_for(game_id: i32) -> i32 {
    match game_id {
        1 => 60, // My Digital Footprint
        2 => 60, // Personal Info & Privacy
        3 => 50, // Passwords & Passphrases
        4 => 60, // Social Media Safety
        _ => 0,
    }
}

/// Completion percentage, floored. A game with no configured maximum is
/// always 0% regardless of the score on record.
pub fn progress_percent(best: i32, max: i32) -> i32 {
    if max > 0 {
        best * 100 / max
    } else {
        0
    }
}

/// Coarse fraud signal for the admin user list: either too many failed
/// logins, or a recorded login with no recorded origin. The two triggers
/// are independent.
pub fn suspicious(
    failed_logins: i32,
    last_login_at: Option<DateTime<Utc>>,
    last_login_ip: Option<&str>,
) -> bool {
    failed_logins >= 5
        || (last_login_at.is_some() && last_login_ip.map_or(true, |ip| ip.is_empty()))
}
