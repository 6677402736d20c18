//! Password hashing round-trips.

use cyberquest_server::security::{hash_password, verify_password};

#[test]
fn hash_then_verify_round_trip() {
    let stored = hash_password("correct horse battery staple").expect("hash");
    assert_ne!(stored, "correct horse battery staple");
    assert!(verify_password("correct horse battery staple", &stored));
    assert!(!verify_password("correct horse battery stable", &stored));
}

#[test]
fn empty_password_is_rejected() {
    assert!(hash_password("").is_err());
}

#[test]
fn garbage_stored_form_never_verifies() {
    assert!(!verify_password("whatever", "not-a-bcrypt-digest"));
}

#[test]
fn secrets_agreeing_on_first_72_bytes_are_equivalent() {
    let a = "a".repeat(72) + "tail-one";
    let b = "a".repeat(72) + "different-tail";
    let stored = hash_password(&a).expect("hash");
    assert!(verify_password(&b, &stored));
}
