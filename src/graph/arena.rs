use std::collections::BTreeMap;

/// Address of an arena slot together with the generation it was issued for.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub(crate) struct SlotKey {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

struct Slot<T> {
    generation: u64,
    seq: u64,
    value: Option<T>,
}

/// A growable table of slots.
///
/// Vacated slots are recycled, and every removal bumps the slot's generation,
/// so a key issued before the removal never addresses the new occupant.
/// Live values are iterated in insertion order.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    vacant: Vec<usize>,
    order: BTreeMap<u64, usize>,
    next_seq: u64,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![],
            vacant: vec![],
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn insert(&mut self, value: T) -> SlotKey {
        let seq = self.next_seq;
        self.next_seq += 1;
        let index = match self.vacant.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.seq = seq;
                slot.value = Some(value);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    seq,
                    value: Some(value),
                });
                self.slots.len() - 1
            }
        };
        self.order.insert(seq, index);
        SlotKey {
            index,
            generation: self.slots[index].generation,
        }
    }

    pub(crate) fn remove(&mut self, key: SlotKey) -> Option<T> {
        let slot = self.slots.get_mut(key.index)?;
        if slot.generation != key.generation {
            return None;
        }
        let value = slot.value.take()?;
        self.order.remove(&slot.seq);
        // a slot whose generation is exhausted is retired for good
        if let Some(generation) = slot.generation.checked_add(1) {
            slot.generation = generation;
            self.vacant.push(key.index);
        }
        Some(value)
    }

    pub(crate) fn get(&self, key: SlotKey) -> Option<&T> {
        self.slots
            .get(key.index)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub(crate) fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        self.slots
            .get_mut(key.index)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Live entries in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (SlotKey, &T)> + '_ {
        self.order.values().filter_map(move |index| {
            let slot = &self.slots[*index];
            slot.value.as_ref().map(|value| {
                (
                    SlotKey {
                        index: *index,
                        generation: slot.generation,
                    },
                    value,
                )
            })
        })
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.value.as_mut())
    }
}
