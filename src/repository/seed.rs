// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Built-in templates a fresh store starts with.

use crate::models::template::TemplateRecord;

const SEED_AUTHOR: &str = "FARA-GRC Team";
const SEED_VERSION: &str = "1.0.0";

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    tags: &'static [&'static str],
    content: &'static str,
}

const SEEDS: [Seed; 3] = [
    Seed {
        id: "mfa-audit",
        name: "MFA Posture Check",
        description: "Comprehensive audit of MFA settings across Azure AD Conditional Access \
                      policies. Verifies Global Admin MFA enforcement, legacy auth blocking, and \
                      emergency access account configuration.",
        tags: &["mfa", "authentication", "azure-ad", "critical"],
        content: include_str!("../../assets/templates/mfa_posture_check.yaml"),
    },
    Seed {
        id: "conditional-access-audit",
        name: "Conditional Access Policy Audit",
        description: "Full audit of Conditional Access policies including coverage gaps, break \
                      glass exclusions, location-based policies, device compliance, and \
                      sign-in/user risk policies.",
        tags: &["conditional-access", "azure-ad", "zero-trust", "compliance"],
        content: include_str!("../../assets/templates/conditional_access_policy_audit.yaml"),
    },
    Seed {
        id: "pim-audit",
        name: "Privileged Identity Management Audit",
        description: "Audit of Azure AD PIM configurations, eligible vs active assignments, \
                      just-in-time access controls, activation requirements, and access reviews.",
        tags: &["pim", "privileged-access", "jit", "least-privilege"],
        content: include_str!("../../assets/templates/privileged_identity_management_audit.yaml"),
    },
];

/// Fresh copies of the built-in templates, in display order.
pub fn default_templates() -> Vec<TemplateRecord> {
    SEEDS
        .iter()
        .map(|seed| TemplateRecord {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            version: SEED_VERSION.to_string(),
            author: SEED_AUTHOR.to_string(),
            tags: seed.tags.iter().map(|tag| tag.to_string()).collect(),
            content: seed.content.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::default_templates;

    #[test]
    fn seeds_are_valid_and_uniquely_identified() {
        let seeds = default_templates();
        assert_eq!(seeds.len(), 3);

        let ids: HashSet<_> = seeds.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), seeds.len());

        for seed in &seeds {
            seed.validate().unwrap();
            assert!(seed.content.contains(&format!("name: \"{}\"", seed.name)));
        }
    }
}
