//! Integration test: end-to-end verification scenarios through the store,
//! the collaborator snapshot, and the verifier.

use tessera_core::{Credential, CredentialStatus};
use tessera_integration_tests::*;
use tessera_verify::{ExpiryState, Snapshot, Sources, VerificationSummary, Verifier};

// =========================================================================
// Scenario A: one active, non-expiring credential from a trusted issuer
// =========================================================================

#[test]
fn test_single_trusted_credential() {
    let store = store_with_issuers();
    store.insert_credential(credential("c1", T_RUST, ACADEMY));

    let verifier = Verifier::default();
    let summary = verifier
        .run(HOLDER, &Sources::from_backend(&store), NOW, |report| {
            assert_eq!(report.verified.len(), 1);
            assert!(report.verified[0].issuer_verified);
            assert_eq!(report.verified[0].expiry_state, ExpiryState::NeverExpires);
            assert!(report.composites.is_empty());
            report.summary
        })
        .unwrap();

    assert_eq!(
        summary,
        VerificationSummary {
            total_credentials: 1,
            active_credentials: 1,
            revoked_credentials: 0,
            expired_credentials: 0,
            composite_credentials: 0,
            all_issuers_verified: true,
        }
    );
}

// =========================================================================
// Scenario B: credential from a suspended issuer
// =========================================================================

#[test]
fn test_suspended_issuer_is_not_verified() {
    let store = store_with_issuers();
    store.insert_credential(credential("c1", T_RUST, ACADEMY));
    store.insert_credential(credential("c2", T_SYSTEMS, GUILD));

    let verifier = Verifier::default();
    verifier
        .run(HOLDER, &Sources::from_backend(&store), NOW, |report| {
            let guild_cred = report
                .verified
                .iter()
                .find(|v| v.credential.id == "c2")
                .expect("c2 annotated");
            assert!(!guild_cred.issuer_verified);
            assert_eq!(
                guild_cred.issuer_info.and_then(|i| i.name.as_deref()),
                Some("Systems Guild")
            );
            assert!(!report.summary.all_issuers_verified);
            // Still active: trust does not change the status counts.
            assert_eq!(report.summary.active_credentials, 2);
        })
        .unwrap();
}

// =========================================================================
// Scenario C: composite with a missing component
// =========================================================================

#[test]
fn test_composite_missing_component() {
    let store = store_with_issuers();
    store.register_rule(master_rule(&[T_RUST, T_SYSTEMS])).unwrap();
    store.insert_credential(master_credential("m1"));
    store.insert_credential(credential("c1", T_RUST, ACADEMY));

    Verifier::default()
        .run(HOLDER, &Sources::from_backend(&store), NOW, |report| {
            assert_eq!(report.composites.len(), 1);
            let group = &report.composites[0];
            assert_eq!(group.composite.credential.id, "m1");
            assert!(group.has_missing_component);
            assert!(!group.all_components_valid);
            assert_eq!(group.components().count(), 1);
            assert_eq!(group.missing_types().collect::<Vec<_>>(), vec![T_SYSTEMS]);
        })
        .unwrap();
}

#[test]
fn test_composite_requires_three_holds_two() {
    let store = store_with_issuers();
    store
        .register_rule(master_rule(&[T_RUST, T_SYSTEMS, T_SECURITY]))
        .unwrap();
    store.insert_credential(master_credential("m1"));
    store.insert_credential(credential("c1", T_RUST, ACADEMY));
    store.insert_credential(credential("c2", T_SYSTEMS, ACADEMY));

    Verifier::default()
        .run(HOLDER, &Sources::from_backend(&store), NOW, |report| {
            let group = &report.composites[0];
            assert_eq!(group.components().count(), 2);
            assert!(group
                .components()
                .all(|c| c.is_valid_component()));
            assert!(group.has_missing_component);
            assert!(!group.all_components_valid);
        })
        .unwrap();
}

// =========================================================================
// Scenario D: composite with a revoked component
// =========================================================================

#[test]
fn test_composite_revoked_component() {
    let store = store_with_issuers();
    store.register_rule(master_rule(&[T_RUST, T_SYSTEMS])).unwrap();
    store.insert_credential(master_credential("m1"));
    store.insert_credential(credential("c1", T_RUST, ACADEMY));
    store.insert_credential(credential("c2", T_SYSTEMS, ACADEMY));
    store.revoke_credential("c2").unwrap();

    Verifier::default()
        .run(HOLDER, &Sources::from_backend(&store), NOW, |report| {
            let group = &report.composites[0];
            assert!(!group.has_missing_component);
            assert!(!group.all_components_valid);
            assert_eq!(report.summary.revoked_credentials, 1);
        })
        .unwrap();
}

#[test]
fn test_composite_fully_valid() {
    let store = store_with_issuers();
    store.register_rule(master_rule(&[T_RUST, T_SYSTEMS])).unwrap();
    store.insert_credential(master_credential("m1"));
    store.insert_credential(credential("c1", T_RUST, ACADEMY));
    store.insert_credential(credential("c2", T_SYSTEMS, ACADEMY).with_expiry(NOW + 90 * DAY));

    Verifier::default()
        .run(HOLDER, &Sources::from_backend(&store), NOW, |report| {
            let group = &report.composites[0];
            assert!(!group.has_missing_component);
            assert!(group.all_components_valid);
            assert_eq!(report.summary.composite_credentials, 1);
            assert_eq!(report.summary.active_credentials, 3);
        })
        .unwrap();
}

// =========================================================================
// Isolation between identities
// =========================================================================

#[test]
fn test_components_come_from_the_same_identity() {
    let store = store_with_issuers();
    store.register_rule(master_rule(&[T_RUST])).unwrap();
    store.insert_credential(master_credential("m1"));
    // The component is held by someone else.
    store.insert_credential(Credential::new("c-other", T_RUST, ACADEMY, OTHER_HOLDER));

    Verifier::default()
        .run(HOLDER, &Sources::from_backend(&store), NOW, |report| {
            assert_eq!(report.verified.len(), 1);
            assert!(report.composites[0].has_missing_component);
        })
        .unwrap();
}

#[test]
fn test_snapshot_with_foreign_credentials_is_filtered() {
    let snapshot = Snapshot {
        credentials: vec![
            master_credential("m1"),
            Credential::new("c-other", T_RUST, ACADEMY, OTHER_HOLDER),
        ],
        issuers: issuers(),
        rules: vec![master_rule(&[T_RUST])],
    };

    let report = Verifier::default().verify(HOLDER, &snapshot, NOW).unwrap();
    assert_eq!(report.summary.total_credentials, 1);
    assert!(report
        .verified
        .iter()
        .all(|v| v.credential.recipient_address == HOLDER));

    let group = &report.composites[0];
    assert!(group.has_missing_component);
    assert!(!group.all_components_valid);
    assert_eq!(group.components().count(), 0);
}

#[test]
fn test_revocation_is_reflected_on_next_call() {
    let store = store_with_issuers();
    store.insert_credential(credential("c1", T_RUST, ACADEMY));
    let verifier = Verifier::default();

    let before = verifier
        .run(HOLDER, &Sources::from_backend(&store), NOW, |r| r.summary)
        .unwrap();
    store.revoke_credential("c1").unwrap();
    let after = verifier
        .run(HOLDER, &Sources::from_backend(&store), NOW, |r| r.summary)
        .unwrap();

    assert_eq!(before.active_credentials, 1);
    assert_eq!(after.active_credentials, 0);
    assert_eq!(after.revoked_credentials, 1);
    assert_eq!(
        store.get_credential("c1").map(|c| c.status),
        Some(CredentialStatus::Revoked)
    );
}
