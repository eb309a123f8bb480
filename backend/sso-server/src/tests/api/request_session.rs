use crate::RequestSession;

use sso_core::{NewUser, SessionContext};
use sso_db::{Database, SessionRepository, UserRepository};

use googletest::prelude::*;

#[tokio::test]
async fn given_anonymous_request_when_session_established_then_token_issued() {
    // Given
    let pool = Database::in_memory().await.unwrap();
    let uid = UserRepository::new(pool.clone())
        .create(&NewUser::new("erin", "erin@example.com"))
        .await
        .unwrap();
    let sessions = SessionRepository::new(pool);
    let session = RequestSession::new(None, sessions.clone());

    // When
    session.establish_session(uid).await.unwrap();

    // Then
    let token = session.into_issued_token().unwrap();
    assert_that!(sessions.find_uid(&token).await.unwrap(), some(eq(uid)));
}

#[tokio::test]
async fn given_no_login_when_finished_then_no_token() {
    let pool = Database::in_memory().await.unwrap();
    let session = RequestSession::new(None, SessionRepository::new(pool));

    assert_that!(session.current_uid(), none());
    assert_that!(session.into_issued_token(), none());
}
