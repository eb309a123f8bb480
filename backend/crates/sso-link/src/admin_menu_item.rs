use sso_core::Provider;

use serde::Serialize;

/// Entry under the admin "authentication" menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminMenuItem {
    pub route: String,
    pub icon: String,
    pub name: String,
}

impl From<&Provider> for AdminMenuItem {
    fn from(provider: &Provider) -> Self {
        Self {
            route: provider.admin_route(),
            icon: provider.icon.clone(),
            name: provider.name.clone(),
        }
    }
}
