//! End-to-end tests for kind-registry
//!
//! These tests require `docker` and `kind` on PATH. They are ignored by
//! default and can be run with:
//!
//! ```bash
//! cargo test --test e2e -- --ignored
//! ```
//!
//! The roundtrip test creates and removes a real container on the kind
//! network; the cluster used for node enumeration does not need to exist.

use kind_registry::provider::Provider;
use kind_registry::registry::{self, Strategy};
use kind_registry::runtime::Runtime;
use kind_registry::Error;

/// Story: delete finds what create made. The container name is derived from
/// the cluster name on both sides, so a create/delete pair over the same
/// cluster name leaves nothing behind.
#[tokio::test]
#[ignore = "requires docker and the kind network"]
async fn create_then_delete_roundtrip() {
    let runtime = Runtime::new();
    let cluster = "registry-e2e";
    let container = registry::container_name(cluster);

    // Clean slate in case a previous run left the container behind
    let _ = runtime.remove(&container).await;

    let created = registry::create_container(&runtime, cluster, Strategy::Mirror, false)
        .await
        .expect("create should succeed");
    assert_eq!(created, container);

    // The container is inspectable under its derived name
    runtime
        .output(&["inspect", &container])
        .await
        .expect("created container should be inspectable");

    registry::delete_container(&runtime, cluster)
        .await
        .expect("delete should succeed");

    // And gone afterwards
    assert!(runtime.output(&["inspect", &container]).await.is_err());
}

/// Story: a cluster with no nodes fails the precondition check before any
/// mutation happens.
#[tokio::test]
#[ignore = "requires kind"]
async fn missing_cluster_resolves_to_no_nodes() {
    let provider = Provider::new(Runtime::new());

    let err = provider
        .list_nodes("definitely-not-a-cluster")
        .await
        .unwrap_err();

    match err {
        Error::NoNodesFound { cluster } => assert_eq!(cluster, "definitely-not-a-cluster"),
        other => panic!("expected NoNodesFound, got {other}"),
    }
}
