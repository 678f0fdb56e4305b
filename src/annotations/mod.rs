//! Associations between gene products and the GO terms annotated to them
//!
//! An [`AssociationMap`] is a plain member → terms mapping, where a member
//! is the accession of a gene product (e.g. a UniProtKB AC) and the terms
//! are its *direct* annotations. Enrichment runs use two maps: one for the
//! background population and one for the subset of interest.

use std::collections::hash_map::Keys;
use std::collections::HashMap;

use tracing::trace;

use crate::term::GoGroup;
use crate::GoTermId;

/// Maps gene product accessions to their directly annotated GO terms
///
/// The map is read-only during an enrichment run. Term counting is done
/// per member: a member counts for a term set once, no matter how many
/// of its annotations fall into the set.
#[derive(Debug, Default, Clone)]
pub struct AssociationMap {
    members: HashMap<String, GoGroup>,
}

impl AssociationMap {
    /// Constructs a new, empty [`AssociationMap`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one member → term association
    ///
    /// The member is created on first use. Returns whether the term was
    /// newly associated to the member.
    pub fn add(&mut self, member: &str, term: GoTermId) -> bool {
        self.members
            .entry(member.to_string())
            .or_default()
            .insert(term)
    }

    /// Returns the annotation group of the given member
    pub fn get(&self, member: &str) -> Option<&GoGroup> {
        self.members.get(member)
    }

    /// Returns the number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the map has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns an iterator of all member accessions
    pub fn members(&self) -> Keys<'_, String, GoGroup> {
        self.members.keys()
    }

    /// Returns the union of all members' annotation groups
    pub fn terms(&self) -> GoGroup {
        let mut terms = GoGroup::new();
        for group in self.members.values() {
            for id in group {
                terms.insert(id);
            }
        }
        terms
    }

    /// Counts the members annotated to at least one of the `valid` terms
    ///
    /// Every member is counted at most once. An empty `valid` group
    /// matches no member.
    pub fn count_associated(&self, valid: &GoGroup) -> u64 {
        if valid.is_empty() {
            return 0;
        }
        let mut count = 0u64;
        for group in self.members.values() {
            if group.intersects(valid) {
                count += 1;
            }
        }
        count
    }

    /// Builds a new map restricted to the given members
    ///
    /// Members without annotations are skipped; they do not occur in the
    /// returned map and therefore do not count towards its population
    /// size.
    pub fn subset<'a, I: IntoIterator<Item = &'a str>>(&self, members: I) -> AssociationMap {
        let mut subset = AssociationMap::new();
        for member in members {
            match self.members.get(member) {
                Some(group) => {
                    subset.members.insert(member.to_string(), group.clone());
                }
                None => trace!("{} has no annotations", member),
            }
        }
        subset
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample_map() -> AssociationMap {
        let mut map = AssociationMap::new();
        map.add("P00001", 10u32.into());
        map.add("P00001", 20u32.into());
        map.add("P00002", 20u32.into());
        map.add("P00003", 30u32.into());
        map
    }

    #[test]
    fn add_and_get() {
        let mut map = sample_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("P00001").unwrap().len(), 2);
        assert!(map.get("P99999").is_none());

        assert!(!map.add("P00001", 10u32.into()));
        assert!(map.add("P00001", 30u32.into()));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn union_of_all_annotations() {
        let map = sample_map();
        let terms = map.terms();
        assert_eq!(terms.len(), 3);
        assert!(terms.contains(&10u32.into()));
        assert!(terms.contains(&20u32.into()));
        assert!(terms.contains(&30u32.into()));
    }

    #[test]
    fn count_members_once() {
        let map = sample_map();

        // P00001 matches both valid terms but counts once
        let valid: GoGroup = [10u32, 20u32].iter().map(|id| (*id).into()).collect();
        assert_eq!(map.count_associated(&valid), 2);

        let valid: GoGroup = [30u32].iter().map(|id| (*id).into()).collect();
        assert_eq!(map.count_associated(&valid), 1);

        let valid: GoGroup = [99u32].iter().map(|id| (*id).into()).collect();
        assert_eq!(map.count_associated(&valid), 0);
    }

    #[test]
    fn empty_valid_group_matches_nothing() {
        let map = sample_map();
        assert_eq!(map.count_associated(&GoGroup::new()), 0);
    }

    #[test]
    fn descendant_terms_extend_the_match() {
        // root (1) -> mid (2) -> leaf (3), members annotated per level
        let mut map = AssociationMap::new();
        map.add("M00001", 2u32.into());
        map.add("L00001", 3u32.into());
        map.add("L00002", 3u32.into());

        let mid_alone: GoGroup = [2u32].iter().map(|id| (*id).into()).collect();
        assert_eq!(map.count_associated(&mid_alone), 1);

        // extending mid by its descendant picks up the leaf members
        let mid_and_below: GoGroup = [2u32, 3u32].iter().map(|id| (*id).into()).collect();
        assert_eq!(map.count_associated(&mid_and_below), 3);
    }

    #[test]
    fn subset_keeps_only_requested_members() {
        let map = sample_map();
        let subset = map.subset(["P00001", "P00003", "P99999"]);

        assert_eq!(subset.len(), 2);
        assert_eq!(subset.get("P00001").unwrap().len(), 2);
        assert!(subset.get("P00002").is_none());
        assert!(subset.get("P99999").is_none());
    }
}
