//! Token issue/verify round-trips and the request extractor.

use actix_web::dev::Payload;
use actix_web::test::TestRequest;
use actix_web::FromRequest;
use chrono::Utc;
use cyberquest_server::http::auth::{decode_token, issue_token, JwtAuth};

const SECRET: &[u8] = b"test-signing-secret";

#[test]
fn issue_then_decode_round_trip() {
    let token = issue_token(42, SECRET, 24).expect("issue");
    let claims = decode_token(&token, SECRET).expect("decode");
    assert_eq!(claims.sub, "42");
    assert!(claims.exp > Utc::now().timestamp() as usize);
}

#[test]
fn tampered_token_is_rejected() {
    let mut token = issue_token(42, SECRET, 24).expect("issue");
    token.push('x');
    assert!(decode_token(&token, SECRET).is_err());
}

#[test]
fn wrong_key_is_rejected() {
    let token = issue_token(42, SECRET, 24).expect("issue");
    assert!(decode_token(&token, b"some-other-secret").is_err());
}

#[test]
fn expired_token_is_rejected() {
    let token = issue_token(42, SECRET, -1).expect("issue");
    assert!(decode_token(&token, SECRET).is_err());
}

#[actix_rt::test]
async fn extractor_accepts_a_fresh_bearer_token() {
    std::env::set_var("JWT_SECRET", "extractor-secret");
    let secret = std::env::var("JWT_SECRET").unwrap();

    let token = issue_token(7, secret.as_bytes(), 1).expect("issue");
    let req = TestRequest::default()
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_http_request();

    let auth = JwtAuth::from_request(&req, &mut Payload::None)
        .await
        .expect("extract");
    assert_eq!(auth.user_id, 7);
}

#[actix_rt::test]
async fn extractor_rejects_missing_and_malformed_headers() {
    std::env::set_var("JWT_SECRET", "extractor-secret");

    let bare = TestRequest::default().to_http_request();
    assert!(JwtAuth::from_request(&bare, &mut Payload::None)
        .await
        .is_err());

    let malformed = TestRequest::default()
        .insert_header(("Authorization", "Token abcdef"))
        .to_http_request();
    assert!(JwtAuth::from_request(&malformed, &mut Payload::None)
        .await
        .is_err());

    let garbage = TestRequest::default()
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_http_request();
    assert!(JwtAuth::from_request(&garbage, &mut Payload::None)
        .await
        .is_err());
}
