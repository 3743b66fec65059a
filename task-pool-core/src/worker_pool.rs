use tracing::{debug, error};

use crate::task::Task;

#[derive(Debug, Default, Clone)]
pub struct WorkerPool {
    slots: Vec<Option<Task>>,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn assign(&mut self, slot: usize, mut task: Task) {
        let size = self.size();
        let Some(entry) = self.slots.get_mut(slot) else {
            error!("Assign to slot {} of a pool with {} slots", slot, size);
            panic!("worker slot {} out of range (pool size {})", slot, size);
        };
        if let Some(current) = entry {
            error!(
                "Slot {} already runs {}, refusing {}",
                slot,
                current.title(),
                task.title()
            );
            panic!("worker slot {} is already occupied", slot);
        }
        task.start();
        debug!("Assigned {} to slot {}", task.title(), slot);
        *entry = Some(task);
    }

    pub fn vacate(&mut self, slot: usize) -> Task {
        match self.slots.get_mut(slot).and_then(Option::take) {
            Some(task) => {
                debug!("Vacated slot {} ({})", slot, task.title());
                task
            }
            None => {
                error!("Vacate of empty or missing slot {}", slot);
                panic!("worker slot {} is empty", slot);
            }
        }
    }

    pub fn occupied(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    pub fn all_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn task(&self, slot: usize) -> Option<&Task> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn task_mut(&mut self, slot: usize) -> Option<&mut Task> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Task>> {
        self.slots.iter().map(Option::as_ref)
    }
}
