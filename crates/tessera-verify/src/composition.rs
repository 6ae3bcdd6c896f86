use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashMap;

use tessera_core::CompositionRule;

use crate::annotate::VerifiedCredential;

/// Composition rules indexed by the composite credential type they govern.
///
/// If two rules govern the same type, the first one wins.
#[derive(Debug, Default)]
pub struct RuleIndex<'a> {
    by_composite: HashMap<&'a str, &'a CompositionRule>,
}

impl<'a> RuleIndex<'a> {
    pub fn build(rules: &'a [CompositionRule]) -> Self {
        let mut by_composite = HashMap::with_capacity(rules.len());
        for rule in rules {
            let key = rule.composite_credential_type_id.as_str();
            if by_composite.contains_key(key) {
                tracing::debug!(composite = key, "ignoring duplicate composition rule");
                continue;
            }
            by_composite.insert(key, rule);
        }
        Self { by_composite }
    }

    /// The rule governing a credential type, if the type is composite.
    pub fn rule_for(&self, credential_type_id: &str) -> Option<&'a CompositionRule> {
        self.by_composite.get(credential_type_id).copied()
    }

    pub fn is_composite(&self, credential_type_id: &str) -> bool {
        self.by_composite.contains_key(credential_type_id)
    }

    pub fn len(&self) -> usize {
        self.by_composite.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_composite.is_empty()
    }
}

/// Result of looking up one required credential type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome<'a> {
    Found(VerifiedCredential<'a>),
    Missing,
}

/// Resolution of one entry of a rule's required credential types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentResolution<'a> {
    pub required_credential_type_id: &'a str,
    pub outcome: ResolutionOutcome<'a>,
}

impl<'a> ComponentResolution<'a> {
    pub fn found(&self) -> Option<&VerifiedCredential<'a>> {
        match &self.outcome {
            ResolutionOutcome::Found(credential) => Some(credential),
            ResolutionOutcome::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.outcome, ResolutionOutcome::Missing)
    }
}

impl Serialize for ComponentResolution<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ComponentResolution", 3)?;
        state.serialize_field("requiredCredentialTypeId", self.required_credential_type_id)?;
        match &self.outcome {
            ResolutionOutcome::Found(credential) => {
                state.serialize_field("outcome", "found")?;
                state.serialize_field("credential", credential)?;
            }
            ResolutionOutcome::Missing => {
                state.serialize_field("outcome", "missing")?;
                state.serialize_field("credential", &Option::<()>::None)?;
            }
        }
        state.end()
    }
}

/// A composite credential together with the resolution of its components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeGroup<'a> {
    pub composite: VerifiedCredential<'a>,
    /// Rule used for resolution; `None` if no rule governs the type.
    pub rule: Option<&'a CompositionRule>,
    /// One entry per required type, in rule order.
    pub resolutions: Vec<ComponentResolution<'a>>,
    pub all_components_valid: bool,
    pub has_missing_component: bool,
}

impl<'a> CompositeGroup<'a> {
    /// Resolve one composite credential against the holder's credentials.
    ///
    /// `held` maps each credential type to the first annotated credential of
    /// that type.
    pub fn resolve(
        composite: VerifiedCredential<'a>,
        rule: Option<&'a CompositionRule>,
        held: &HashMap<&'a str, VerifiedCredential<'a>>,
    ) -> Self {
        let Some(rule) = rule else {
            tracing::debug!(
                credential = %composite.credential.id,
                credential_type = composite.credential_type_id(),
                "no composition rule for composite credential"
            );
            return Self {
                composite,
                rule: None,
                resolutions: Vec::new(),
                all_components_valid: false,
                has_missing_component: false,
            };
        };

        let resolutions: Vec<ComponentResolution<'a>> = rule
            .required_credential_type_ids
            .iter()
            .map(|required| {
                let outcome = match held.get(required.as_str()) {
                    Some(found) => ResolutionOutcome::Found(*found),
                    None => {
                        tracing::debug!(
                            credential = %composite.credential.id,
                            required = %required,
                            "composite component missing"
                        );
                        ResolutionOutcome::Missing
                    }
                };
                ComponentResolution {
                    required_credential_type_id: required.as_str(),
                    outcome,
                }
            })
            .collect();

        let has_missing_component = resolutions.iter().any(ComponentResolution::is_missing);
        let all_components_valid = !has_missing_component
            && resolutions
                .iter()
                .filter_map(ComponentResolution::found)
                .all(VerifiedCredential::is_valid_component);

        Self {
            composite,
            rule: Some(rule),
            resolutions,
            all_components_valid,
            has_missing_component,
        }
    }

    /// Component credentials actually found, in rule order.
    pub fn components(&self) -> impl Iterator<Item = &VerifiedCredential<'a>> {
        self.resolutions.iter().filter_map(ComponentResolution::found)
    }

    /// Required types with no matching credential, in rule order.
    pub fn missing_types(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.resolutions
            .iter()
            .filter(|r| r.is_missing())
            .map(|r| r.required_credential_type_id)
    }
}

impl Serialize for CompositeGroup<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let components: Vec<&VerifiedCredential<'_>> = self.components().collect();
        let mut state = serializer.serialize_struct("CompositeGroup", 6)?;
        state.serialize_field("composite", &self.composite)?;
        state.serialize_field("rule", &self.rule)?;
        state.serialize_field("components", &components)?;
        state.serialize_field("resolutions", &self.resolutions)?;
        state.serialize_field("allComponentsValid", &self.all_components_valid)?;
        state.serialize_field("hasMissingComponent", &self.has_missing_component)?;
        state.end()
    }
}

/// Find every composite credential in `verified` and resolve its components
/// from the same set.
///
/// A credential is composite when a rule governs its type. Output follows
/// the order of `verified`.
pub fn resolve_composites<'a>(
    verified: &[VerifiedCredential<'a>],
    rules: &RuleIndex<'a>,
) -> Vec<CompositeGroup<'a>> {
    let mut held: HashMap<&'a str, VerifiedCredential<'a>> = HashMap::with_capacity(verified.len());
    for credential in verified {
        held.entry(credential.credential_type_id()).or_insert(*credential);
    }

    verified
        .iter()
        .filter_map(|credential| {
            rules
                .rule_for(credential.credential_type_id())
                .map(|rule| CompositeGroup::resolve(*credential, Some(rule), &held))
        })
        .collect()
}
