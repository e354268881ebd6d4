//! The closed set of bridge methods.

use std::fmt;

/// A capability the application can request through the bridge.
///
/// Wire names are the host's camelCase capability names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    /// `closeWindow`: sync, no reply.
    CloseWindow,
    /// `getAccessToken`: sync, replies with the token or `null`.
    GetAccessToken,
    /// `getLanguage`: sync, replies with the language tag.
    GetLanguage,
    /// `getVersion`: sync, replies with the SDK version.
    GetVersion,
    /// `isLoggedIn`: sync, replies with a boolean.
    IsLoggedIn,
    /// `getProfile`: async, replies with the profile on success.
    GetProfile,
    /// `openWindow`: sync, no reply.
    OpenWindow,
    /// `sendMessages`: async, never replies.
    SendMessages,
}

impl Method {
    /// Every method, in wire-name order.
    pub const ALL: [Self; 8] = [
        Self::CloseWindow,
        Self::GetAccessToken,
        Self::GetLanguage,
        Self::GetProfile,
        Self::GetVersion,
        Self::IsLoggedIn,
        Self::OpenWindow,
        Self::SendMessages,
    ];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CloseWindow => "closeWindow",
            Self::GetAccessToken => "getAccessToken",
            Self::GetLanguage => "getLanguage",
            Self::GetVersion => "getVersion",
            Self::IsLoggedIn => "isLoggedIn",
            Self::GetProfile => "getProfile",
            Self::OpenWindow => "openWindow",
            Self::SendMessages => "sendMessages",
        }
    }

    /// Look up a method by wire name. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for method in Method::ALL {
            assert_eq!(Method::from_name(method.as_str()), Some(method));
        }
    }

    #[test]
    fn all_is_sorted_by_wire_name() {
        let names: Vec<_> = Method::ALL.iter().map(|m| m.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn unknown_and_miscased_names_are_rejected() {
        assert_eq!(Method::from_name("unknownThing"), None);
        assert_eq!(Method::from_name("IsLoggedIn"), None);
        assert_eq!(Method::from_name(""), None);
    }

    #[test]
    fn display_uses_wire_name() {
        assert_eq!(Method::SendMessages.to_string(), "sendMessages");
    }
}
