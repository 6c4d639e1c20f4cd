//! Priority tiers: the order in which rules are applied.

use std::collections::BTreeMap;

use crate::RuleCatalog;

/// Rules sharing a priority tier, as indices into the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tier {
    /// Tier number. Lower tiers run first.
    pub tier: u32,
    /// Catalog indices of the tier's rules, in declaration order.
    pub rules: Vec<usize>,
}

/// Groups the catalog's rules into tiers, ascending by tier number.
///
/// Within a tier rules keep their declaration order. Rules declaring tier 0
/// are scheduled with tier 1.
pub fn group_by_tier(catalog: &RuleCatalog) -> Vec<Tier> {
    let mut tiers: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (index, rule) in catalog.rules().iter().enumerate() {
        tiers.entry(rule.effective_tier()).or_default().push(index);
    }
    tiers
        .into_iter()
        .map(|(tier, rules)| Tier { tier, rules })
        .collect()
}
