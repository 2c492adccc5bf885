//! Generation-checked handle table backing the opaque `u64` region handles.
//!
//! A handle packs a slot index (high 32 bits) and the slot's generation at
//! insertion time (low 32 bits). Removing an entry bumps the generation, so
//! a handle that outlives its region resolves to nothing instead of to
//! whatever reuses the slot. Destroying twice is a harmless miss.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    fn to_raw(self) -> u64 {
        (u64::from(self.index) << 32) | u64::from(self.generation)
    }

    fn from_raw(raw: u64) -> Self {
        Self {
            index: (raw >> 32) as u32,
            generation: raw as u32,
        }
    }
}

struct Entry<T> {
    generation: u32,
    value: Option<T>,
}

/// Slots of `T` addressed by generation-checked handles.
pub(crate) struct HandleTable<T> {
    entries: Vec<Entry<T>>,
    vacant: Vec<u32>,
}

impl<T> HandleTable<T> {
    /// An empty table, usable in a `static`.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            vacant: Vec::new(),
        }
    }

    /// Store `value`, reusing a vacant slot if one exists.
    pub fn insert(&mut self, value: T) -> u64 {
        let handle = match self.vacant.pop() {
            Some(index) => {
                let entry = &mut self.entries[index as usize];
                entry.value = Some(value);
                Handle {
                    index,
                    generation: entry.generation,
                }
            }
            None => {
                let index = self.entries.len() as u32;
                self.entries.push(Entry {
                    generation: 0,
                    value: Some(value),
                });
                Handle {
                    index,
                    generation: 0,
                }
            }
        };
        handle.to_raw()
    }

    fn live(&mut self, raw: u64) -> Option<&mut Entry<T>> {
        let handle = Handle::from_raw(raw);
        self.entries
            .get_mut(handle.index as usize)
            .filter(|entry| entry.generation == handle.generation)
    }

    /// The value behind `raw`, if the handle is current.
    #[cfg(test)]
    pub fn get(&self, raw: u64) -> Option<&T> {
        let handle = Handle::from_raw(raw);
        self.entries
            .get(handle.index as usize)
            .filter(|entry| entry.generation == handle.generation)?
            .value
            .as_ref()
    }

    /// The value behind `raw` mutably, if the handle is current.
    pub fn get_mut(&mut self, raw: u64) -> Option<&mut T> {
        self.live(raw)?.value.as_mut()
    }

    /// Take the value behind `raw` out of the table.
    ///
    /// A slot whose generation wraps to 0 is retired rather than reused, so
    /// a handle from its first lifetime can never match again.
    pub fn remove(&mut self, raw: u64) -> Option<T> {
        let index = Handle::from_raw(raw).index;
        let entry = self.live(raw)?;
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        if entry.generation != 0 {
            self.vacant.push(index);
        }
        Some(value)
    }

    /// Number of live values.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.value.is_some()).count()
    }
}
