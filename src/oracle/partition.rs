//! Partitioning candidate sets by attribute value

use crate::core::{AttributeIndex, CandidateSet, ItemIndex, ItemTable, ValueCode};
use rustc_hash::FxHashMap;

/// Group the members of `state` by their value of `attribute`
///
/// Returns `(value, members)` pairs ordered by value. Members inside each
/// group stay in ascending order because `state` is iterated in order.
fn group_by_value(
    items: &ItemTable,
    state: &CandidateSet,
    attribute: AttributeIndex,
) -> Vec<(ValueCode, Vec<ItemIndex>)> {
    let mut buckets: FxHashMap<ValueCode, Vec<ItemIndex>> = FxHashMap::default();

    for member in state.iter() {
        buckets
            .entry(items.value_code(member, attribute))
            .or_default()
            .push(member);
    }

    let mut groups: Vec<_> = buckets.into_iter().collect();
    groups.sort_unstable_by_key(|&(code, _)| code);
    groups
}

/// Partition a candidate state by the value of a single attribute
///
/// Returns the non-empty child states ordered by attribute value. A single
/// child means every candidate shares the same value and the question carries
/// no information here.
#[must_use]
pub fn split_on_attribute(
    items: &ItemTable,
    state: &CandidateSet,
    attribute: AttributeIndex,
) -> Vec<CandidateSet> {
    group_by_value(items, state, attribute)
        .into_iter()
        .map(|(_, members)| CandidateSet::from_sorted(members))
        .collect()
}

/// Answers `attribute` can take over `state`, with how many candidates give each
#[must_use]
pub fn answer_distribution(
    items: &ItemTable,
    state: &CandidateSet,
    attribute: AttributeIndex,
) -> Vec<(ValueCode, usize)> {
    group_by_value(items, state, attribute)
        .into_iter()
        .map(|(code, members)| (code, members.len()))
        .collect()
}

/// Keep the candidates whose `attribute` equals `answer`
#[must_use]
pub fn restrict(
    items: &ItemTable,
    state: &CandidateSet,
    attribute: AttributeIndex,
    answer: ValueCode,
) -> CandidateSet {
    state.filter(|member| items.value_code(member, attribute) == answer)
}
