//! Collector factory
//!
//! The model of a Symmetrix is encoded in the middle of its SID (EMC knowledge
//! base articles 000333474 and 000323234). That code picks the collector.

use super::collector::{Collector, Generation};
use crate::error::{InventoryError, Result};

/// Model code → generation
const GENERATIONS: &[(&str, Generation)] = &[
    ("26", Generation::Vmax2),
    ("49", Generation::Vmax2),
    ("57", Generation::Vmax2),
    ("59", Generation::Vmax2),
    ("87", Generation::Vmax2),
    ("67", Generation::Vmax3),
    ("68", Generation::Vmax3),
    ("70", Generation::Vmax3),
    ("72", Generation::Vmax3),
    ("75", Generation::Vmax3),
    ("77", Generation::Vmax3),
    ("78", Generation::Vmax3),
];

/// Characters 5 and 6 of the SID
pub fn model_code(sid: &str) -> Option<&str> {
    sid.get(5..7)
}

/// Generation of the array behind `sid`
pub fn generation_for(sid: &str) -> Result<Generation> {
    let code = model_code(sid).unwrap_or_default();

    GENERATIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, generation)| *generation)
        .ok_or_else(|| {
            tracing::error!("The SID {} doesn't match with any VMAX Array model", sid);
            InventoryError::Factory {
                sid: sid.to_string(),
                code: code.to_string(),
            }
        })
}

/// Fresh collector for the array behind `sid`
pub fn create(sid: &str) -> Result<Collector> {
    let generation = generation_for(sid)?;
    tracing::debug!("SID {} is a {} array", sid, generation);
    Ok(Collector::new(generation))
}
