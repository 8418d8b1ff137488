use flux_namespace::{AsyncPhase, Namespace, NamingConvention};
use flux_registry::{
    ActionRegistry, CollisionDiagnostic, ConflictKind, RegistryError, ResolutionSuggestion,
    SharedRegistry,
};
use flux_test_utils::{init_tracing, install_fixtures, login_namespace, sealed_registry};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Scenario: every feature module registers at boot, then the app seals the
/// registry and starts dispatching.
#[test]
fn test_boot_sequence() -> anyhow::Result<()> {
    init_tracing();
    let (registry, fixtures) = sealed_registry()?;

    assert!(registry.is_sealed());
    assert_eq!(registry.len(), 37);
    let names: Vec<_> = registry.namespaces().map(|ns| ns.name.as_str()).collect();
    assert_eq!(names, ["Login", "ResetPassword", "ShopDetail", "Etsy"]);

    let action = fixtures.login.async_action("submit").unwrap().success().call("token");
    let registered = registry.validate_action(&action)?;
    assert_eq!(registered.namespace, "Login");
    assert_eq!(registered.phase, Some(AsyncPhase::Success));
    Ok(())
}

#[test]
fn test_late_registration_is_refused() -> anyhow::Result<()> {
    let (mut registry, _) = sealed_registry()?;
    let result = registry.register(&Namespace::new("Orders").add("refresh"));

    assert!(matches!(result, Err(RegistryError::Sealed { .. })));
    assert!(!registry.contains("ORDERS_REFRESH"));
    Ok(())
}

#[test]
fn test_unknown_dispatched_action() -> anyhow::Result<()> {
    let (registry, _) = sealed_registry()?;
    let action = flux_namespace::Action::new("LOGOUT", None);

    match registry.validate_action(&action) {
        Err(RegistryError::UnknownAction { action_type }) => assert_eq!(action_type, "LOGOUT"),
        other => panic!("expected UnknownAction, got {other:?}"),
    }
    Ok(())
}

/// Scenario: a second module named `EtsyShops` duplicates an action the
/// `Etsy` module already declares under its `Shops` child.
#[test]
fn test_cross_module_collision_with_diagnostic() -> anyhow::Result<()> {
    let mut registry = ActionRegistry::new();
    install_fixtures(&mut registry)?;
    let before = registry.len();

    let err = registry
        .register(&Namespace::new("EtsyShops").add("clearCache").add_async("sync"))
        .unwrap_err();
    assert!(err.is_collision());
    assert_eq!(registry.len(), before);
    assert!(!registry.contains("ETSY_SHOPS_CLEAR_CACHE"));

    let diagnostic = CollisionDiagnostic::from_error(&err).unwrap();
    assert_eq!(diagnostic.kind, ConflictKind::CrossNamespace);
    assert_eq!(
        diagnostic.suggestion,
        ResolutionSuggestion::NestUnderExisting {
            namespace: "Etsy".to_string()
        }
    );
    assert!(diagnostic.description.contains("ETSY_SHOPS_SYNC_PENDING"));
    Ok(())
}

#[test]
fn test_reregistering_fixture_is_idempotent() -> anyhow::Result<()> {
    let mut registry = ActionRegistry::new();
    install_fixtures(&mut registry)?;
    let before = registry.len();

    registry.register(&login_namespace())?;
    assert_eq!(registry.len(), before);
    assert_eq!(registry.namespaces().count(), 4);
    Ok(())
}

#[test]
fn test_conflicting_module_with_same_name() -> anyhow::Result<()> {
    let mut registry = ActionRegistry::new();
    install_fixtures(&mut registry)?;

    let err = registry
        .register(&Namespace::new("Login").add("logout"))
        .unwrap_err();
    let diagnostic = CollisionDiagnostic::from_error(&err).unwrap();
    assert_eq!(diagnostic.kind, ConflictKind::DuplicateNamespace);
    assert!(registry.get("LOGIN_LOGOUT").is_none());
    Ok(())
}

#[test]
fn test_prefix_listing_and_ownership() -> anyhow::Result<()> {
    let (registry, _) = sealed_registry()?;

    let etsy: Vec<_> = registry
        .constants_with_prefix("ETSY_PRODUCTS_")
        .into_iter()
        .map(|c| c.action_type.as_str())
        .collect();
    assert_eq!(etsy.len(), 5);
    assert!(etsy.iter().all(|c| c.starts_with("ETSY_PRODUCTS_")));

    // RESET_PASSWORD_* is not under the LOGIN_ prefix
    assert_eq!(registry.constants_with_prefix("LOGIN_").len(), 7);
    assert_eq!(registry.constants_of("ResetPassword").len(), 7);
    assert!(registry.constants_of("Orders").is_empty());
    Ok(())
}

#[test]
fn test_registry_with_custom_convention() -> anyhow::Result<()> {
    let convention = NamingConvention::new().with_suffixes("REQUEST", "DONE", "ERROR");
    let mut registry = ActionRegistry::with_convention(convention);
    let fixtures = install_fixtures(&mut registry)?;

    let sync = fixtures.shop_detail.async_action("syncShop").unwrap();
    assert_eq!(sync.pending().action_type(), "SHOP_DETAIL_SYNC_SHOP_REQUEST");
    assert!(registry.contains("SHOP_DETAIL_SYNC_SHOP_DONE"));
    assert!(!registry.contains("SHOP_DETAIL_SYNC_SHOP_SUCCESS"));
    Ok(())
}

#[test]
fn test_precompiled_namespace_must_match_convention() {
    let mut registry = ActionRegistry::new();
    let custom = NamingConvention::new().with_separator("/");
    let compiled = login_namespace().compile_with(&custom).unwrap();

    let result = registry.register_compiled(&compiled);
    assert!(matches!(result, Err(RegistryError::ConventionMismatch { .. })));
    assert!(registry.is_empty());

    let compiled = login_namespace().compile().unwrap();
    registry.register_compiled(&compiled).unwrap();
    assert_eq!(registry.len(), 7);
}

/// Scenario: modules register from several threads during boot, then
/// request handlers read concurrently.
#[test]
fn test_shared_registry_across_threads() -> anyhow::Result<()> {
    init_tracing();
    let shared = SharedRegistry::default();

    std::thread::scope(|scope| {
        for name in ["Orders", "Invoices", "Customers", "Reports"] {
            let shared = shared.clone();
            scope.spawn(move || {
                shared
                    .register(&Namespace::new(name).add("refresh").add_async("load"))
                    .unwrap();
            });
        }
    });
    shared.seal();

    assert_eq!(shared.read().len(), 16);
    std::thread::scope(|scope| {
        for constant in ["ORDERS_REFRESH", "INVOICES_LOAD_FAILURE", "REPORTS_LOAD_SUCCESS"] {
            let shared = shared.clone();
            scope.spawn(move || assert!(shared.contains(constant)));
        }
    });
    Ok(())
}

proptest! {
    #[test]
    fn prop_disjoint_namespaces_never_collide(
        names in proptest::collection::btree_set("[A-Z][a-z]{2,8}", 1..6),
    ) {
        let mut registry = ActionRegistry::new();
        for name in &names {
            let ns = Namespace::new(name.clone()).add("refresh").add_async("load");
            registry.register(&ns).unwrap();
        }
        prop_assert_eq!(registry.len(), names.len() * 4);
        prop_assert_eq!(registry.namespaces().count(), names.len());
    }

    #[test]
    fn prop_registration_is_all_or_nothing(
        extra in proptest::collection::btree_set("[a-z]{1,8}", 0..6),
    ) {
        let mut registry = ActionRegistry::new();
        registry
            .register(&Namespace::new("Feature").add(Namespace::new("Shared").add("sync")))
            .unwrap();
        let before = registry.len();

        // FEATURE_SHARED_SYNC is owned by Feature, so none of the others land
        let clash = extra
            .iter()
            .fold(Namespace::new("FeatureShared"), |ns, a| ns.add(format!("{a}New")))
            .add("sync");
        prop_assert!(registry.register(&clash).is_err());
        prop_assert_eq!(registry.len(), before);
        prop_assert!(registry.namespace("FeatureShared").is_none());
    }
}
