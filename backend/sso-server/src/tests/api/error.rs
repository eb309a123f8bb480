use crate::{ApiError, OAuthError};

use sso_core::{StoreError, Uid};
use sso_link::LinkError;

use std::panic::Location;

use axum::{http::StatusCode, response::IntoResponse};
use error_location::ErrorLocation;
use googletest::prelude::*;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn given_registration_disabled_when_rendered_then_403_with_code() {
    let error = ApiError::from(LinkError::registration_disabled("GitHub"));

    let (status, json) = body_json(error).await;

    assert_that!(status, eq(StatusCode::FORBIDDEN));
    assert_that!(json["error"]["code"].as_str(), some(eq("REGISTRATION_DISABLED")));
    assert_that!(
        json["error"]["message"].as_str(),
        some(eq("Registration via GitHub SSO is disabled"))
    );
    assert_that!(json["error"].get("field"), none());
}

#[tokio::test]
async fn given_duplicate_email_when_converted_then_409() {
    let link = LinkError::storage(StoreError::duplicate("email", "a@example.com"), None);

    let (status, json) = body_json(ApiError::from(link)).await;

    assert_that!(status, eq(StatusCode::CONFLICT));
    assert_that!(json["error"]["code"].as_str(), some(eq("CONFLICT")));
}

#[tokio::test]
async fn given_backend_outage_when_converted_then_503_without_details() {
    let link = LinkError::storage(StoreError::backend("disk on fire"), None);

    let (status, json) = body_json(ApiError::from(link)).await;

    assert_that!(status, eq(StatusCode::SERVICE_UNAVAILABLE));
    assert_that!(json["error"]["code"].as_str(), some(eq("SERVICE_UNAVAILABLE")));
    assert_that!(
        json["error"]["message"].as_str(),
        some(not(contains_substring("disk")))
    );
}

#[tokio::test]
async fn given_non_retryable_storage_failure_when_converted_then_500() {
    let uid = Uid::new(42).unwrap();
    let link = LinkError::storage(StoreError::user_not_found(uid), Some(uid));

    let (status, json) = body_json(ApiError::from(link)).await;

    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_that!(json["error"]["code"].as_str(), some(eq("INTERNAL_ERROR")));
}

#[tokio::test]
async fn given_rejected_code_when_converted_then_401() {
    let error = ApiError::from(OAuthError::invalid_code("bad_verification_code"));

    let (status, json) = body_json(error).await;

    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(json["error"]["code"].as_str(), some(eq("UNAUTHORIZED")));
}

#[tokio::test]
async fn given_provider_failure_when_converted_then_502() {
    let error = ApiError::from(OAuthError::provider("token endpoint answered 500"));

    let (status, json) = body_json(error).await;

    assert_that!(status, eq(StatusCode::BAD_GATEWAY));
    assert_that!(json["error"]["code"].as_str(), some(eq("PROVIDER_ERROR")));
}

#[test]
fn test_unconfigured_oauth_maps_to_not_found() {
    let error = ApiError::from(OAuthError::not_configured());

    assert_eq!(error.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_invalid_identity_when_converted_then_400_on_id_field() {
    let link = LinkError::InvalidIdentity {
        message: "external id is empty".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(ApiError::from(link)).await;

    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["error"]["field"].as_str(), some(eq("id")));
}

#[test]
fn test_status_per_variant() {
    assert_eq!(ApiError::unauthorized("x").status(), StatusCode::UNAUTHORIZED);
    assert_eq!(ApiError::forbidden("x").status(), StatusCode::FORBIDDEN);
    assert_eq!(ApiError::internal("x").status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
    assert_eq!(
        ApiError::bad_request("x", Some("state")).status(),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn test_store_error_maps_to_internal() {
    let error = ApiError::from(StoreError::backend("boom"));

    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
