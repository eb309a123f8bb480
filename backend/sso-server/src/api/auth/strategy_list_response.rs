use sso_link::LoginStrategy;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StrategyListResponse {
    pub strategies: Vec<LoginStrategy>,
}
