use crate::{state::RunState, task::TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub title: String,
    pub status: TaskStatus,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: RunState,
    // Number of steps executed since initialize.
    pub step: u64,
    // Pending titles, oldest first.
    pub pending: Vec<String>,
    // One entry per worker slot, `None` for an idle slot.
    pub slots: Vec<Option<SlotView>>,
    // Completed titles in completion order.
    pub completed: Vec<String>,
}

impl Snapshot {
    pub fn is_drained(&self) -> bool {
        self.state == RunState::Drained
    }

    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn conservation_total(&self) -> usize {
        self.pending.len() + self.occupied_slots() + self.completed.len()
    }
}
