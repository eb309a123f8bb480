pub mod deauth;
pub mod deauth_view;
