//! Integration test: properties that hold for every verification.

use tessera_core::{CredentialStatus, IssuerStatus};
use tessera_integration_tests::*;
use tessera_verify::{
    Collaborator, Dataset, ExpiryState, MemoryStore, Sources, VerificationReport, Verifier,
    VerifyError,
};

/// A holder with a bit of everything: trusted, untrusted, revoked,
/// expired, expiring soon, and a composite.
fn mixed_store() -> MemoryStore {
    let store = store_with_issuers();
    store.register_rule(master_rule(&[T_RUST, T_SYSTEMS])).unwrap();
    store.insert_credential(master_credential("m1"));
    store.insert_credential(credential("c1", T_RUST, ACADEMY));
    store.insert_credential(credential("c2", T_SYSTEMS, GUILD).with_expiry(NOW + DAY));
    store.insert_credential(credential("c3", T_SECURITY, SHADY).with_expiry(NOW));
    store.insert_credential(
        credential("c4", T_SECURITY, ACADEMY).with_status(CredentialStatus::Revoked),
    );
    store.insert_credential(credential("c5", "cred-type:unknown", "0xnobody"));
    store
}

#[test]
fn test_determinism_byte_identical() {
    let store = mixed_store();
    let verifier = Verifier::default();
    let sources = Sources::from_backend(&store);

    let first = verifier
        .run(HOLDER, &sources, NOW, |r| serde_json::to_string(&r))
        .unwrap()
        .unwrap();
    let second = verifier
        .run(HOLDER, &sources, NOW, |r| serde_json::to_string(&r))
        .unwrap()
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_summary_partition() {
    let store = mixed_store();
    let summary = Verifier::default()
        .run(HOLDER, &Sources::from_backend(&store), NOW, |r| r.summary)
        .unwrap();

    assert_eq!(summary.total_credentials, 6);
    assert_eq!(
        summary.active_credentials + summary.revoked_credentials + summary.expired_credentials,
        summary.total_credentials
    );
    assert_eq!(summary.expired_credentials, 1);
    assert_eq!(summary.revoked_credentials, 1);
}

#[test]
fn test_trust_monotonicity() {
    let store = mixed_store();
    Verifier::default()
        .run(HOLDER, &Sources::from_backend(&store), NOW, |report| {
            for v in &report.verified {
                let authorized = v
                    .issuer_info
                    .map(|i| i.status == IssuerStatus::Active)
                    .unwrap_or(false);
                assert_eq!(v.issuer_verified, authorized, "credential {}", v.credential.id);
            }
        })
        .unwrap();
}

#[test]
fn test_suspending_issuer_flips_every_credential() {
    let store = mixed_store();
    store.set_issuer_status(ACADEMY, IssuerStatus::Suspended).unwrap();
    Verifier::default()
        .run(HOLDER, &Sources::from_backend(&store), NOW, |report| {
            assert!(report
                .verified
                .iter()
                .filter(|v| v.credential.issuer_address == ACADEMY)
                .all(|v| !v.issuer_verified));
            assert!(!report.composites[0].all_components_valid);
        })
        .unwrap();
}

#[test]
fn test_expiry_boundary() {
    let store = store_with_issuers();
    store.insert_credential(credential("at-now", T_RUST, ACADEMY).with_expiry(NOW));
    store.insert_credential(credential("before", T_RUST, ACADEMY).with_expiry(NOW - 1));
    store.insert_credential(credential("after", T_RUST, ACADEMY).with_expiry(NOW + 1));

    Verifier::default()
        .run(HOLDER, &Sources::from_backend(&store), NOW, |report| {
            let states: Vec<ExpiryState> = report.verified.iter().map(|v| v.expiry_state).collect();
            assert_eq!(
                states,
                vec![ExpiryState::Expired, ExpiryState::Expired, ExpiryState::ExpiringSoon]
            );
            assert_eq!(report.summary.expired_credentials, 2);
            assert_eq!(report.summary.active_credentials, 1);
        })
        .unwrap();
}

#[test]
fn test_invalid_identity_is_the_only_caller_error() {
    let store = mixed_store();
    let verifier = Verifier::default();
    let result = verifier.run("", &Sources::from_backend(&store), NOW, |_| ());
    assert!(matches!(result, Err(VerifyError::InvalidIdentity(_))));

    let result = verifier.run("0xnot-hex", &Sources::from_backend(&store), NOW, |_| ());
    assert!(matches!(result, Err(VerifyError::InvalidIdentity(_))));
}

#[test]
fn test_collaborator_failure_is_propagated() {
    let store = mixed_store();
    let verifier = Verifier::default();

    for failing in [
        Collaborator::CredentialStore,
        Collaborator::IssuerRegistry,
        Collaborator::RuleStore,
    ] {
        let backend = Unavailable {
            failing,
            inner: &store,
        };
        let result = verifier.run(HOLDER, &Sources::from_backend(&backend), NOW, |_| ());
        match result {
            Err(VerifyError::CollaboratorUnavailable(e)) => {
                assert_eq!(e.collaborator, failing);
                assert_eq!(e.reason, "connection refused");
            }
            other => panic!("expected collaborator failure, got {:?}", other.map(|_| ())),
        }
    }
}

#[test]
fn test_invalid_identity_checked_before_fetch() {
    let store = mixed_store();
    let backend = Unavailable {
        failing: Collaborator::CredentialStore,
        inner: &store,
    };
    let result = Verifier::default().run("", &Sources::from_backend(&backend), NOW, |_| ());
    assert!(matches!(result, Err(VerifyError::InvalidIdentity(_))));
}

#[test]
fn test_dataset_file_roundtrip_preserves_report() {
    let store = mixed_store();
    let json = store.to_dataset().to_json_pretty().unwrap();
    let reloaded = MemoryStore::from_dataset(Dataset::from_json(&json).unwrap()).unwrap();

    fn render(report: VerificationReport<'_>) -> String {
        serde_json::to_string(&report).unwrap()
    }

    let verifier = Verifier::default();
    let original = verifier
        .run(HOLDER, &Sources::from_backend(&store), NOW, render)
        .unwrap();
    let reloaded = verifier
        .run(HOLDER, &Sources::from_backend(&reloaded), NOW, render)
        .unwrap();
    assert_eq!(original, reloaded);
}

#[test]
fn test_concurrent_verifications() {
    let store = mixed_store();
    let verifier = Verifier::default();
    let expected = verifier
        .run(HOLDER, &Sources::from_backend(&store), NOW, |r| r.summary)
        .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    verifier
                        .run(HOLDER, &Sources::from_backend(&store), NOW, |r| r.summary)
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
