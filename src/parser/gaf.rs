//! Parse GO annotation (GAF) files into an [`AssociationMap`]
//!
//! # Example lines
//!
//! ```text
//! !gaf-version: 2.2
//! UniProtKB  P00813  ADA   enables      GO:0002686  PMID:12858173  IDA  ...
//! UniProtKB  P04217  A1BG  NOT|enables  GO:0003993  GO_REF:0000024  IEA  ...
//! ```
//!
//! Only the object id (column 2), the qualifier (column 4) and the GO id
//! (column 5) are used. Annotations with a `NOT` qualifier document the
//! absence of a function and are skipped.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use tracing::warn;

use crate::annotations::AssociationMap;
use crate::{GoError, GoResult, GoTermId};

struct Association<'a> {
    member: &'a str,
    term: GoTermId,
}

fn parse_line(line: &str) -> Option<Association<'_>> {
    if line.starts_with('!') {
        return None;
    }

    let mut cols = line.splitn(6, '\t');
    cols.next()?; // database
    let member = cols.next()?;
    cols.next()?; // object symbol
    let qualifier = cols.next()?;
    let term = cols.next()?;

    if qualifier.split('|').any(|qualifier| qualifier == "NOT") {
        return None;
    }

    match GoTermId::try_from(term) {
        Ok(term) => Some(Association { member, term }),
        Err(_) => {
            warn!("unable to parse GO id from: {}", line);
            None
        }
    }
}

/// Builds an [`AssociationMap`] from GAF formatted text
pub fn from_str(content: &str) -> AssociationMap {
    let mut map = AssociationMap::new();
    for line in content.lines() {
        if let Some(association) = parse_line(line) {
            map.add(association.member, association.term);
        }
    }
    map
}

/// Reads a GO annotation (GAF) file into an [`AssociationMap`]
///
/// # Errors
///
/// Fails with [`GoError::CannotOpenFile`] if the file cannot be read.
pub fn read_file<P: AsRef<Path>>(file: P) -> GoResult<AssociationMap> {
    let filename = file.as_ref().display().to_string();
    let file = File::open(file).map_err(|_| GoError::CannotOpenFile(filename.clone()))?;
    let reader = BufReader::new(file);

    let mut map = AssociationMap::new();
    for line in reader.lines() {
        let line = line.map_err(|_| GoError::CannotOpenFile(filename.clone()))?;
        if let Some(association) = parse_line(&line) {
            map.add(association.member, association.term);
        }
    }
    Ok(map)
}
