use crate::state::TellerState;

/// Index of the teller with the fewest queued customers. Only a strictly
/// shorter queue displaces the current pick, so ties go to the lowest index.
pub fn shortest_queue(tellers: &[TellerState]) -> usize {
    let mut min_idx = 0;
    for (idx, teller) in tellers.iter().enumerate() {
        if teller.len() < tellers[min_idx].len() {
            min_idx = idx;
        }
    }
    min_idx
}
