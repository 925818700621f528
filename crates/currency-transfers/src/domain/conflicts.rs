//! # Conflict Scheduling
//!
//! Operations touching a common address must see each other's commits, so
//! they cannot be pre-processed against the same snapshot. `plan_waves`
//! groups a batch into waves of mutually independent operations:
//!
//! ```text
//! ops:    0:{A,B}  1:{C}  2:{B,D}  3:{E}  4:{D}
//! waves:  [0, 1, 3]  [2]  [4]
//! ```
//!
//! An operation lands in the wave after the latest wave holding an earlier
//! operation it conflicts with, so conflicting operations keep their input
//! order.

use super::operation::Operation;
use shared_types::Address;
use std::collections::HashMap;

/// Operation indexes grouped into conflict-free waves, in execution order.
pub fn plan_waves(operations: &[Operation]) -> Vec<Vec<usize>> {
    let mut last_wave: HashMap<Address, usize> = HashMap::new();
    let mut waves: Vec<Vec<usize>> = Vec::new();

    for (index, op) in operations.iter().enumerate() {
        let addresses = op.addresses();
        let wave = addresses
            .iter()
            .filter_map(|address| last_wave.get(address))
            .max()
            .map_or(0, |latest| latest + 1);

        if wave == waves.len() {
            waves.push(Vec::new());
        }
        waves[wave].push(index);

        for address in addresses {
            last_wave.insert(address, wave);
        }
    }

    waves
}
