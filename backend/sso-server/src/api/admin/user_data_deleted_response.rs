use sso_core::Uid;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UserDataDeletedResponse {
    pub uid: Uid,
}
