use std::net::SocketAddr;

/// The entry in a client list that means "everyone".
pub const WILDCARD: &str = "*";

/// The client allowed when nothing else is configured.
pub const DEFAULT_CLIENT: &str = "localhost";

/// Which clients may fetch files.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccessPolicy {
    AllowAll,

    /// Only clients whose identifier equals one of these strings.
    AllowListed(Vec<String>)
}

impl AccessPolicy {
    /// Merges an externally supplied client list into the policy.
    ///
    /// A list consisting of exactly the wildcard opens the server to
    /// everyone. Any other list is appended to the existing entries.
    pub fn merge(self, clients: Vec<String>) -> AccessPolicy {
        if clients.len() == 1 && clients[0] == WILDCARD {
            return AccessPolicy::AllowAll
        }
        match self {
            AccessPolicy::AllowAll => AccessPolicy::AllowAll,
            AccessPolicy::AllowListed(mut list) => {
                list.extend(clients);
                AccessPolicy::AllowListed(list)
            }
        }
    }

    pub fn admits(&self, client: &str) -> bool {
        match *self {
            AccessPolicy::AllowAll => true,
            AccessPolicy::AllowListed(ref list) => {
                list.iter().any(|allowed| allowed == client)
            }
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> AccessPolicy {
        AccessPolicy::AllowListed(vec![DEFAULT_CLIENT.to_string()])
    }
}

/// Determines the identifier a request is checked against.
///
/// A non-empty forwarded-for value takes precedence over the peer. Anything
/// from its first colon on is taken to be a port and dropped.
pub fn client_identifier(forwarded_for: Option<&str>, peer: &SocketAddr) -> String {
    match forwarded_for {
        Some(value) if !value.is_empty() => {
            match value.find(':') {
                Some(index) => value[..index].to_string(),
                None => value.to_string()
            }
        }
        _ => peer.ip().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use super::{client_identifier, AccessPolicy};

    fn peer() -> SocketAddr {
        "192.0.2.7:53211".parse().unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_allows_only_localhost() {
        let policy = AccessPolicy::default();
        assert!(policy.admits("localhost"));
        assert!(!policy.admits("203.0.113.5"));
        assert!(!policy.admits("LOCALHOST"));
    }

    #[test]
    fn wildcard_list_allows_all() {
        let policy = AccessPolicy::default().merge(strings(&["*"]));
        assert_eq!(policy, AccessPolicy::AllowAll);
        assert!(policy.admits("203.0.113.5"));
        assert!(policy.admits(""));
    }

    #[test]
    fn other_lists_are_appended() {
        let policy = AccessPolicy::default()
            .merge(strings(&["10.0.0.1", "*"]));
        assert_eq!(
            policy,
            AccessPolicy::AllowListed(strings(&["localhost", "10.0.0.1", "*"]))
        );
        assert!(policy.admits("10.0.0.1"));
        // Only a lone wildcard is special.
        assert!(!policy.admits("10.0.0.2"));
    }

    #[test]
    fn allow_all_survives_later_lists() {
        let policy = AccessPolicy::AllowAll.merge(strings(&["10.0.0.1"]));
        assert_eq!(policy, AccessPolicy::AllowAll);
    }

    #[test]
    fn forwarded_for_wins_over_peer() {
        assert_eq!(client_identifier(Some("198.51.100.1"), &peer()), "198.51.100.1");
    }

    #[test]
    fn forwarded_for_port_is_stripped() {
        assert_eq!(client_identifier(Some("localhost:8080"), &peer()), "localhost");
    }

    #[test]
    fn peer_used_without_forwarded_for() {
        assert_eq!(client_identifier(None, &peer()), "192.0.2.7");
        assert_eq!(client_identifier(Some(""), &peer()), "192.0.2.7");
    }

    #[test]
    fn ipv6_peer_keeps_full_address() {
        let peer: SocketAddr = "[::1]:4000".parse().unwrap();
        assert_eq!(client_identifier(None, &peer), "::1");
    }
}
