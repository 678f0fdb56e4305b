//! Parse `go-basic.obo` term stanzas into an [`Ontology`]
//!
//! # Example stanza
//!
//! ```text
//! [Term]
//! id: GO:0061024
//! name: membrane organization
//! namespace: biological_process
//! def: "A process which results in the biosynthesis of a membrane." [GOC:dph]
//! is_a: GO:0016043 ! cellular component organization
//! ```

use std::fs;
use std::path::Path;

use tracing::{trace, warn};

use crate::term::internal::GoTermInternal;
use crate::{GoError, GoResult, GoTermId, Ontology};

// stores tuples of child - parent
type Connections = Vec<(GoTermId, GoTermId)>;

/// Reads an OBO release file into an [`Ontology`]
///
/// # Errors
///
/// Fails with [`GoError::CannotOpenFile`] if the file cannot be read.
pub fn read_file<P: AsRef<Path>>(file: P) -> GoResult<Ontology> {
    let filename = file.as_ref().display().to_string();
    let content = fs::read_to_string(file).map_err(|_| GoError::CannotOpenFile(filename))?;
    Ok(from_str(&content))
}

/// Builds an [`Ontology`] from OBO formatted text
///
/// Non-term stanzas, obsolete terms and term stanzas without id, name
/// and namespace are skipped. `is_a` relations to unknown terms are
/// skipped as well, so a partial extract of the full ontology parses.
pub fn from_str(content: &str) -> Ontology {
    let mut ontology = Ontology::default();
    let mut connections: Connections = Vec::new();

    for stanza in content.split("\n\n") {
        let Some(stanza) = stanza.strip_prefix("[Term]\n") else {
            trace!("ignoring: {}", stanza);
            continue;
        };
        if stanza.lines().any(|line| line == "is_obsolete: true") {
            trace!("skipping obsolete term: {}", stanza);
            continue;
        }
        if let Some(term) = term_from_stanza(stanza) {
            let id = ontology.add_term(term);
            collect_connections(&mut connections, stanza, id);
        } else {
            warn!("unable to parse: {}", stanza);
        }
    }

    for (child, parent) in connections {
        if ontology.add_parent(parent, child).is_err() {
            warn!("{} has unknown parent {}", child, parent);
        }
    }

    ontology.create_cache();
    ontology
}

fn term_from_stanza(stanza: &str) -> Option<GoTermInternal> {
    let mut id: Option<GoTermId> = None;
    let mut name: Option<&str> = None;
    let mut namespace: Option<&str> = None;
    for line in stanza.lines() {
        match line.split_once(": ") {
            Some(("id", value)) => id = GoTermId::try_from(value).ok(),
            Some(("name", value)) => name = Some(value),
            Some(("namespace", value)) => namespace = Some(value),
            _ => (),
        }
        if let (Some(id), Some(name), Some(namespace)) = (id, name, namespace) {
            return Some(GoTermInternal::new(
                name.to_string(),
                namespace.to_string(),
                id,
            ));
        }
    }
    None
}

fn collect_connections(connections: &mut Connections, stanza: &str, id: GoTermId) {
    for line in stanza.lines() {
        let Some(value) = line.strip_prefix("is_a: ") else {
            continue;
        };
        // `is_a: GO:0048308 ! organelle inheritance`
        let parent = value.split_once(' ').map_or(value, |(parent, _)| parent);
        match GoTermId::try_from(parent) {
            Ok(parent) => connections.push((id, parent)),
            Err(_) => warn!("unable to parse parent id from: {}", value),
        }
    }
}
