pub mod auth;
pub mod callback_params;
pub mod callback_response;
pub mod strategy_list_response;
