use std::fmt;
use std::str::FromStr;

use color_eyre::eyre::{Report, eyre};

use crate::model::Role;

/// Navigable pages, addressed by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    SignUp,
    RoleSelection,
    CustomerDashboard,
    ProviderDashboard,
    About,
    Legal,
}

impl Route {
    pub const ALL: [Self; 6] = [
        Self::SignUp,
        Self::RoleSelection,
        Self::CustomerDashboard,
        Self::ProviderDashboard,
        Self::About,
        Self::Legal,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::SignUp => "/signup",
            Self::RoleSelection => "/role-selection",
            Self::CustomerDashboard => "/customer/dashboard",
            Self::ProviderDashboard => "/provider/dashboard",
            Self::About => "/about",
            Self::Legal => "/legal",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::SignUp => "Sign up",
            Self::RoleSelection => "Choose your role",
            Self::CustomerDashboard => "Dashboard",
            Self::ProviderDashboard => "Provider dashboard",
            Self::About => "About",
            Self::Legal => "Legal",
        }
    }

    /// Landing page for a role.
    pub const fn dashboard(role: Role) -> Self {
        match role {
            Role::Customer => Self::CustomerDashboard,
            Role::Provider => Self::ProviderDashboard,
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = if s.starts_with('/') {
            s.to_string()
        } else {
            format!("/{s}")
        };
        Self::from_path(&normalized).ok_or_else(|| {
            let known: Vec<_> = Self::ALL.iter().map(|r| r.path()).collect();
            eyre!("Unknown route '{s}', expected one of: {}", known.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_parse_with_and_without_slash() {
        assert_eq!("legal".parse::<Route>().unwrap(), Route::Legal);
        assert_eq!(
            "/provider/dashboard/".parse::<Route>().unwrap(),
            Route::ProviderDashboard
        );
        assert!("/admin".parse::<Route>().is_err());
    }

    #[test]
    fn test_dashboard_for_role() {
        assert_eq!(Route::dashboard(Role::Customer).path(), "/customer/dashboard");
        assert_eq!(Route::dashboard(Role::Provider).path(), "/provider/dashboard");
    }
}
