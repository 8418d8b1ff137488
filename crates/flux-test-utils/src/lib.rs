//! Testing utilities for the flux workspace
//!
//! Shared fixtures (feature namespaces shaped like the admin and client
//! apps' action modules) and tracing setup.

#![allow(missing_docs)]

use flux_namespace::{CreatorGroup, Namespace};
use flux_registry::ActionRegistry;
use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static TRACING: OnceCell<()> = OnceCell::new();

/// Install a test-writer fmt subscriber once per process
///
/// Filter comes from `RUST_LOG`, defaulting to `debug`.
pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

pub fn login_namespace() -> Namespace {
    Namespace::new("Login")
        .add_async("submit")
        .add_async("createAccount")
        .add("setState")
}

pub fn reset_password_namespace() -> Namespace {
    Namespace::new("ResetPassword")
        .add_async("requestReset")
        .add_async("setPassword")
        .add("setState")
}

pub fn shop_detail_namespace() -> Namespace {
    Namespace::new("ShopDetail")
        .add_async("getShopDetail")
        .add("clearShopDetail")
        .add_async("syncShop")
        .add_async("deleteShop")
        .add("scheduleShopDetailPoll")
        .add_async("pollShopDetail")
}

pub fn etsy_namespace() -> Namespace {
    Namespace::new("Etsy")
        .add(
            Namespace::new("Shops")
                .add("set_state_filter")
                .add_async("sync"),
        )
        .add(
            Namespace::new("Products")
                .add("select")
                .add("deselectAll")
                .add_async("applyBulkEdit"),
        )
}

/// Compiled creator trees of the fixture namespaces
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub login: CreatorGroup,
    pub reset_password: CreatorGroup,
    pub shop_detail: CreatorGroup,
    pub etsy: CreatorGroup,
}

/// Register every fixture namespace, the way feature modules do at boot
pub fn install_fixtures(registry: &mut ActionRegistry) -> anyhow::Result<Fixtures> {
    Ok(Fixtures {
        login: registry.register(&login_namespace())?.into_creators(),
        reset_password: registry.register(&reset_password_namespace())?.into_creators(),
        shop_detail: registry.register(&shop_detail_namespace())?.into_creators(),
        etsy: registry.register(&etsy_namespace())?.into_creators(),
    })
}

/// Fresh registry with every fixture registered and sealed
pub fn sealed_registry() -> anyhow::Result<(ActionRegistry, Fixtures)> {
    let mut registry = ActionRegistry::new();
    let fixtures = install_fixtures(&mut registry)?;
    registry.seal();
    Ok((registry, fixtures))
}
