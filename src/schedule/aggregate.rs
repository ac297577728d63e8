use std::collections::HashMap;
use tracing::{info, warn};

use super::types::{AggregatedInvigilator, DutyDetail, DutyRecord};
use crate::identity::IdentityMap;
use crate::TARGET_PIPELINE;

/// Group duty records by resolved identity.
///
/// Identities appear in the order their first record appears, and each
/// identity is shown under the display name of that first record. Details keep
/// record order. Records with an empty name key are skipped.
pub fn aggregate(records: &[DutyRecord], identities: &IdentityMap) -> Vec<AggregatedInvigilator> {
    let mut grouped: Vec<AggregatedInvigilator> = Vec::new();
    let mut position_of: HashMap<&str, usize> = HashMap::new();

    for record in records {
        if record.name_key.trim().is_empty() {
            continue;
        }

        let canonical = match identities.canonical(&record.name_key) {
            Some(canonical) => canonical,
            None => {
                warn!(
                    target: TARGET_PIPELINE,
                    "Name key '{}' was not resolved, grouping it on its own", record.name_key
                );
                record.name_key.as_str()
            }
        };

        let position = *position_of.entry(canonical).or_insert_with(|| {
            grouped.push(AggregatedInvigilator {
                invigilator: record.raw_invigilator_name.clone(),
                details: Vec::new(),
            });
            grouped.len() - 1
        });
        grouped[position].details.push(DutyDetail::from(record));
    }

    info!(
        target: TARGET_PIPELINE,
        "Aggregated {} duty records under {} invigilators",
        records.len(),
        grouped.len()
    );

    grouped
}
