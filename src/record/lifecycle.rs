//! Moving virtual attributes between live field storage and the serialized column.
//!
//! `unpack` runs right after a record is materialized from storage and `pack` right
//! before it is written. Both are no-ops for rows whose schema lacks the serialized
//! column, so legacy tables and upgraded ones can share an inheritance hierarchy.

use crate::core::{AttributeMap, Result};
use crate::record::Record;
use crate::schema::AttributeRegistry;
use log::{debug, warn};

/// Expands the serialized column into live storage, backfilling defaults for keys
/// the stored blob predates, and drops stored keys the model no longer declares.
pub fn unpack(record: &mut Record) -> Result<()> {
    if !record.has_serialized_column() {
        return Ok(());
    }

    let definition = record.model.definition()?;
    let mut data = record.take_decoded()?;

    let mut backfilled = 0usize;
    for descriptor in definition.iter() {
        let value = match data.get(descriptor.name()) {
            Some(stored) => stored.clone(),
            None => {
                backfilled += 1;
                descriptor.default().clone()
            }
        };
        record.attributes.insert(descriptor.name().to_string(), value);
    }

    let removed = prune(&mut data, &definition);
    if !removed.is_empty() {
        warn!(
            "{}: dropping undeclared serialized keys {:?}",
            record.model.name(),
            removed
        );
    }

    debug!(
        "{}: unpacked {} attributes ({} defaulted)",
        record.model.name(),
        definition.len(),
        backfilled
    );
    record.serialized_data = Some(data);
    Ok(())
}

/// Collects the current cast value of every declared attribute into the serialized
/// column and prunes it to exactly the declared names.
pub fn pack(record: &mut Record) -> Result<()> {
    if !record.has_serialized_column() {
        return Ok(());
    }

    let definition = record.model.definition()?;
    let current: Vec<_> = definition
        .iter()
        .map(|descriptor| (descriptor.name().to_string(), record.cast_current(descriptor)))
        .collect();

    let mut data = record.take_decoded()?;
    data.extend(current);

    let removed = prune(&mut data, &definition);
    if !removed.is_empty() {
        debug!("{}: pruned {:?} while packing", record.model.name(), removed);
    }

    debug!("{}: packed {} attributes", record.model.name(), data.len());
    record.serialized_data = Some(data);
    Ok(())
}

/// Keeps only declared keys; returns the ones removed.
fn prune(data: &mut AttributeMap, definition: &AttributeRegistry) -> Vec<String> {
    let mut removed = Vec::new();
    data.retain(|key, _| {
        let keep = definition.contains(key);
        if !keep {
            removed.push(key.clone());
        }
        keep
    });
    removed
}

impl Record {
    pub fn unpack_serialized_attributes(&mut self) -> Result<()> {
        unpack(self)
    }

    pub fn pack_serialized_attributes(&mut self) -> Result<()> {
        pack(self)
    }
}
