/*! Integration tests for nestdoc.
 *
 * One test binary; modules exercise entities declared through the
 * `Entity` derive end to end:
 * - fixtures: the derived entities shared by every module
 * - paths: collection, document and field paths
 * - attributes: attribute constants, value sequences and reconstruction
 * - session: writes and reads through the in-memory store
 * - registry: configuration and metrics surface
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("nestdoc_core=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod attributes;
mod fixtures;
mod paths;
mod registry;
mod session;
