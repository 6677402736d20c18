//! Unit tests for the pure score/moderation helpers.

use chrono::Utc;
use cyberquest_server::scoring::{max_score_for, progress_percent, suspicious};

#[test]
fn catalog_maxima_match_question_counts() {
    assert_eq!(max_score_for(1), 60);
    assert_eq!(max_score_for(2), 60);
    assert_eq!(max_score_for(3), 50);
    assert_eq!(max_score_for(4), 60);
}

#[test]
fn unknown_game_has_no_maximum() {
    assert_eq!(max_score_for(99), 0);
}

#[test]
fn percent_is_floored() {
    // 20/60 = 33.33 %
    assert_eq!(progress_percent(20, 60), 33);
    assert_eq!(progress_percent(50, 50), 100);
    assert_eq!(progress_percent(0, 60), 0);
}

#[test]
fn percent_without_a_maximum_is_zero() {
    // Games with no configured maximum pin to 0 % whatever the score.
    assert_eq!(progress_percent(45, 0), 0);
}

#[test]
fn five_failed_logins_flag_a_user() {
    assert!(suspicious(5, None, None));
    assert!(!suspicious(4, None, None));
}

#[test]
fn login_without_origin_flags_a_user() {
    let now = Utc::now();
    assert!(suspicious(0, Some(now), None));
    assert!(suspicious(0, Some(now), Some("")));
    assert!(!suspicious(0, Some(now), Some("203.0.113.7")));
}

#[test]
fn never_logged_in_is_not_suspicious() {
    assert!(!suspicious(0, None, None));
}
