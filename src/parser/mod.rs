//! Parsing the Gene Ontology release files
//!
//! [`obo`] reads the term stanzas of a `go-basic.obo` release into an
//! [`Ontology`](crate::Ontology). [`gaf`] reads GO annotation (GAF)
//! files into an [`AssociationMap`](crate::annotations::AssociationMap).
//!
//! Both releases are available from the
//! [Gene Ontology downloads](http://geneontology.org/docs/download-ontology/).

pub mod gaf;
pub mod obo;
