//! Wire view of a verification report and its terminal rendering.

use serde::Deserialize;

use tessera_verify::VerificationSummary;

#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub data: Option<ReportView>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub identity: String,
    pub checked_at: i64,
    pub verified: Vec<CredentialView>,
    pub composites: Vec<CompositeView>,
    pub summary: VerificationSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialView {
    pub id: String,
    pub credential_type_id: String,
    pub issuer_address: String,
    pub status: String,
    pub expires_at: Option<i64>,
    pub issuer_verified: bool,
    pub issuer_info: Option<IssuerView>,
    pub expiry_state: String,
}

#[derive(Debug, Deserialize)]
pub struct IssuerView {
    pub name: Option<String>,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeView {
    pub composite: CredentialView,
    pub resolutions: Vec<ResolutionView>,
    pub all_components_valid: bool,
    pub has_missing_component: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionView {
    pub required_credential_type_id: String,
    pub outcome: String,
    pub credential: Option<CredentialView>,
}

fn issuer_label(credential: &CredentialView) -> String {
    match &credential.issuer_info {
        Some(IssuerView {
            name: Some(name),
            status,
        }) => format!("{} [{}]", name, status),
        Some(IssuerView { name: None, status }) => format!("{} [{}]", credential.issuer_address, status),
        None => format!("{} [unknown]", credential.issuer_address),
    }
}

pub fn print(report: &ReportView) {
    println!("Identity:   {}", report.identity);
    println!("Checked at: {}", report.checked_at);
    println!();

    if report.verified.is_empty() {
        println!("Credentials: (none)");
    } else {
        println!("Credentials:");
        for c in &report.verified {
            let trust = if c.issuer_verified { "TRUSTED" } else { "UNTRUSTED" };
            let expires = c
                .expires_at
                .map(|t| t.to_string())
                .unwrap_or_else(|| "never".into());
            println!(
                "  {}  type={}  status={}  expiry={} ({})  issuer={} ({})",
                c.id,
                c.credential_type_id,
                c.status,
                c.expiry_state,
                expires,
                issuer_label(c),
                trust
            );
        }
    }

    if !report.composites.is_empty() {
        println!();
        println!("Composites:");
        for group in &report.composites {
            let verdict = if group.all_components_valid { "VALID" } else { "INVALID" };
            println!(
                "  [{}] {} ({})",
                verdict, group.composite.id, group.composite.credential_type_id
            );
            for r in &group.resolutions {
                match &r.credential {
                    Some(c) => println!(
                        "      {} -> {} (status={}, issuer verified={})",
                        r.required_credential_type_id, c.id, c.status, c.issuer_verified
                    ),
                    None => println!("      {} -> {}", r.required_credential_type_id, r.outcome.to_uppercase()),
                }
            }
            if group.has_missing_component {
                println!("      (missing required components)");
            }
        }
    }

    let s = &report.summary;
    println!();
    println!("Summary:");
    println!("  Total:      {}", s.total_credentials);
    println!("  Active:     {}", s.active_credentials);
    println!("  Revoked:    {}", s.revoked_credentials);
    println!("  Expired:    {}", s.expired_credentials);
    println!("  Composites: {}", s.composite_credentials);
    println!(
        "  Issuers:    {}",
        if s.all_issuers_verified {
            "all verified"
        } else {
            "NOT all verified"
        }
    );
}
