use std::collections::hash_map::Values;
use std::collections::HashMap;

use crate::term::internal::GoTermInternal;
use crate::GoTermId;

/// Owns every term record of the ontology, keyed by term id
pub(crate) struct Arena {
    terms: HashMap<GoTermId, GoTermInternal>,
}

impl Arena {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn insert(&mut self, term: GoTermInternal) {
        let id = term.id();
        self.terms.insert(*id, term);
    }

    pub fn contains(&self, id: GoTermId) -> bool {
        self.terms.contains_key(&id)
    }

    pub fn get(&self, id: GoTermId) -> Option<&GoTermInternal> {
        self.terms.get(&id)
    }

    pub fn get_unchecked(&self, id: GoTermId) -> &GoTermInternal {
        self.terms.get(&id).unwrap()
    }

    pub fn get_unchecked_mut(&mut self, id: GoTermId) -> &mut GoTermInternal {
        self.terms.get_mut(&id).unwrap()
    }

    pub fn values(&self) -> Values<'_, GoTermId, GoTermInternal> {
        self.terms.values()
    }

    pub fn keys(&self) -> Vec<GoTermId> {
        self.terms.keys().copied().collect()
    }
}

impl Default for Arena {
    fn default() -> Self {
        // the full Gene Ontology holds roughly 40,000 non-obsolete terms
        Self {
            terms: HashMap::with_capacity(50_000),
        }
    }
}
