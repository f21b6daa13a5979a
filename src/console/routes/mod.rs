//! Client-side route table

pub(crate) mod guard;

use std::collections::BTreeMap;
use derive_more::Display;
use crate::console::routes::guard::{protect, Guard};
use crate::console::storage::{access_token, LocalStorage};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Page {
    #[display("restaurant manager landing")]
    Landing,
    #[display("manager login")]
    Login,
    #[display("manager registration")]
    Register,
    #[display("forgot password")]
    ForgotPassword,
    #[display("password reset")]
    ResetPassword,
    #[display("admin dashboard")]
    Dashboard,
    #[display("order management")]
    OrderManagement,
    #[display("restaurant onboarding")]
    CreateRestaurant,
    #[display("restaurant home")]
    Home,
    #[display("menu")]
    Menu,
    #[display("orders")]
    Orders,
    #[display("restaurant profile")]
    RestaurantInfo,
    #[display("notifications")]
    Notifications,
    #[display("manager profile")]
    ManagerProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Page(Page),
    Redirect(&'static str),
}

/// Routes sharing a prefix, optionally behind the access guard
pub(crate) struct RouteGroup {
    pub prefix: &'static str,
    pub guarded: bool,
    /// child patterns relative to the prefix, `""` is the index, `:name` captures
    pub routes: &'static [(&'static str, Target)],
}

pub(crate) const ROUTES: &[RouteGroup] = &[
    RouteGroup {
        prefix: "/",
        guarded: false,
        routes: &[("", Target::Redirect("/restaurant-manager"))],
    },
    RouteGroup {
        prefix: "/manager",
        guarded: false,
        routes: &[
            ("login", Target::Page(Page::Login)),
            ("register", Target::Page(Page::Register)),
            ("forgot-password", Target::Page(Page::ForgotPassword)),
        ],
    },
    RouteGroup {
        prefix: "/reset-password",
        guarded: false,
        routes: &[(":token", Target::Page(Page::ResetPassword))],
    },
    RouteGroup {
        prefix: "/restaurant-manager",
        guarded: false,
        routes: &[("", Target::Page(Page::Landing))],
    },
    RouteGroup {
        prefix: "/admin",
        guarded: true,
        routes: &[
            ("", Target::Page(Page::Dashboard)),
            ("orders", Target::Page(Page::OrderManagement)),
        ],
    },
    RouteGroup {
        prefix: "/create-restaurant",
        guarded: true,
        routes: &[("", Target::Page(Page::CreateRestaurant))],
    },
    RouteGroup {
        prefix: "/restaurant",
        guarded: true,
        routes: &[
            ("", Target::Page(Page::Home)),
            ("menu", Target::Page(Page::Menu)),
            ("orders", Target::Page(Page::Orders)),
            ("restaurant-info", Target::Page(Page::RestaurantInfo)),
            ("notifications", Target::Page(Page::Notifications)),
            ("manager-info", Target::Page(Page::ManagerProfile)),
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Navigation {
    Render {
        page: Page,
        params: BTreeMap<String, String>,
    },
    Redirect(String),
    NotFound,
}

/// Resolve `path` using the token currently held in `storage`.
pub(crate) fn resolve(path: &str, storage: &impl LocalStorage) -> Navigation {
    resolve_with(path, access_token(storage).as_deref())
}

pub(crate) fn resolve_with(path: &str, token: Option<&str>) -> Navigation {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments = split(path);

    for group in ROUTES {
        let prefix = split(group.prefix);
        let Some(rest) = segments.strip_prefix(prefix.as_slice()) else {
            continue;
        };
        for (pattern, target) in group.routes {
            let Some(params) = match_pattern(&split(pattern), rest) else {
                continue;
            };
            if group.guarded {
                if let Guard::Redirect(to) = protect(token) {
                    return Navigation::Redirect(to.to_string());
                }
            }
            return match target {
                Target::Page(page) => Navigation::Render {
                    page: *page,
                    params,
                },
                Target::Redirect(to) => Navigation::Redirect(to.to_string()),
            };
        }
    }
    Navigation::NotFound
}

/// Full paths of every registered route, in table order.
pub(crate) fn paths() -> Vec<String> {
    ROUTES
        .iter()
        .flat_map(|group| {
            group.routes.iter().map(move |(pattern, _)| {
                let mut segments = split(group.prefix);
                segments.extend(split(pattern));
                format!("/{}", segments.join("/"))
            })
        })
        .collect()
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn match_pattern(pattern: &[&str], segments: &[&str]) -> Option<BTreeMap<String, String>> {
    if pattern.len() != segments.len() {
        return None;
    }
    let mut params = BTreeMap::new();
    for (expected, actual) in pattern.iter().zip(segments) {
        match expected.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), actual.to_string());
            }
            None if expected == actual => {}
            None => return None,
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use super::*;
    use crate::console::storage::MemoryStorage;

    fn render(page: Page) -> Navigation {
        Navigation::Render {
            page,
            params: BTreeMap::new(),
        }
    }

    #[test]
    fn public_routes_render_without_token() {
        assert_eq!(resolve_with("/manager/login", None), render(Page::Login));
        assert_eq!(resolve_with("/manager/register/", None), render(Page::Register));
        assert_eq!(resolve_with("/restaurant-manager", None), render(Page::Landing));
        assert_eq!(
            resolve_with("/", None),
            Navigation::Redirect("/restaurant-manager".to_string())
        );
    }

    #[test]
    fn reset_password_captures_token() {
        let Navigation::Render { page, params } = resolve_with("/reset-password/xyz123?utm=mail", None) else {
            panic!("should render");
        };
        assert_eq!(page, Page::ResetPassword);
        assert_eq!(params.get("token").map(String::as_str), Some("xyz123"));
    }

    #[test]
    fn protected_routes_follow_token() {
        for path in ["/admin", "/admin/orders", "/create-restaurant", "/restaurant", "/restaurant/restaurant-info"] {
            assert_eq!(
                resolve_with(path, None),
                Navigation::Redirect(guard::LOGIN_PATH.to_string()),
                "{path}"
            );
            assert!(matches!(resolve_with(path, Some("tok")), Navigation::Render { .. }), "{path}");
        }
        assert_eq!(resolve_with("/restaurant/menu", Some("tok")), render(Page::Menu));
    }

    #[test]
    fn resolve_reads_token_from_storage() {
        let signed_in = MemoryStorage::with_token("tok");
        assert_eq!(resolve("/restaurant/orders", &signed_in), render(Page::Orders));
        assert_eq!(
            resolve("/restaurant/orders", &MemoryStorage::default()),
            Navigation::Redirect(guard::LOGIN_PATH.to_string())
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(resolve_with("/restaurant/unknown", Some("tok")), Navigation::NotFound);
        assert_eq!(resolve_with("/reset-password", None), Navigation::NotFound);
        assert_eq!(resolve_with("/manager", None), Navigation::NotFound);
    }

    #[test]
    fn every_path_is_registered_once() {
        let paths = paths();
        let unique = paths.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), paths.len());
        assert_eq!(
            paths.iter().filter(|p| p.as_str() == "/restaurant/restaurant-info").count(),
            1
        );
    }
}
