pub mod admin_menu_item;
pub mod error;
pub mod identity_linker;
pub mod link_metrics;
pub mod login_guard;
pub mod login_strategy;
pub mod provider_profile;
pub mod resolution;

pub use admin_menu_item::AdminMenuItem;
pub use error::{LinkError, Result};
pub use identity_linker::{IdentityLinker, append_user_field_whitelist};
pub use link_metrics::LinkMetrics;
pub use login_guard::{LoginGuard, LoginPermit};
pub use login_strategy::LoginStrategy;
pub use provider_profile::{ProfileId, ProfileValue, ProviderProfile};
pub use resolution::{Resolution, ResolutionKind};
