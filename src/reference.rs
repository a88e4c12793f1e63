//! Image reference handling
//!
//! Splitting follows the Docker registry convention: a first path segment
//! with no dot or colon is a namespace on the default index, not a registry
//! host. `localhost` is the documented exception - it counts as a host
//! despite having neither.

/// Default public index assumed for unqualified references
pub const DEFAULT_INDEX: &str = "docker.io";

/// Split an image reference into an index name and a remote name.
///
/// `ubuntu` and `samalba/hipache` live on the default index and keep the
/// whole reference as their remote name; `myregistry.example.com:5000/foo/bar`
/// names its registry host explicitly and the remote name is the remainder.
pub fn split_repos_name(reference: &str) -> (String, String) {
    match reference.split_once('/') {
        Some((host, remainder))
            if host.contains('.') || host.contains(':') || host == "localhost" =>
        {
            (host.to_string(), remainder.to_string())
        }
        _ => (DEFAULT_INDEX.to_string(), reference.to_string()),
    }
}
