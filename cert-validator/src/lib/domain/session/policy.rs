/// Authorization level required to reach a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionLevel {
    Public,
    Authenticated,
    AdminOnly,
}

/// Static mapping from path prefixes to protection levels.
///
/// A path resolves to the level of its longest matching prefix, or `Public`
/// when nothing matches. Matching is per path segment, so `/admin` covers
/// `/admin/users` but not `/administrator`.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    rules: Vec<(String, ProtectionLevel)>,
}

impl RoutePolicy {
    /// Login entry point.
    pub const LOGIN_PATH: &'static str = "/auth";
    /// Landing page for authenticated non-admin users.
    pub const VERIFY_PATH: &'static str = "/verify";
    /// Landing page for admins.
    pub const ADMIN_PATH: &'static str = "/admin";

    pub fn new<P: Into<String>>(rules: impl IntoIterator<Item = (P, ProtectionLevel)>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(prefix, level)| (prefix.into(), level))
                .collect(),
        }
    }

    pub fn resolve(&self, path: &str) -> ProtectionLevel {
        self.rules
            .iter()
            .filter(|(prefix, _)| matches_prefix(path, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map_or(ProtectionLevel::Public, |(_, level)| *level)
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::new([
            (Self::ADMIN_PATH, ProtectionLevel::AdminOnly),
            (Self::VERIFY_PATH, ProtectionLevel::Authenticated),
            (Self::LOGIN_PATH, ProtectionLevel::Public),
        ])
    }
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        return path.starts_with('/');
    }
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
