//! Slot storage for remembered dialog state.
//!
//! Every shown dialog owns a [`Scope`]. Values remembered through a scope live
//! in a process-wide slot table until the scope is dropped, at which point all
//! of its slots are released and outstanding [`State`] handles become stale.
//!
//! Mutations made through [`State::with_mut`] or [`State::set`] bump the
//! slot's version, mark the owning scope as invalidated and then call every
//! subscriber registered with [`State::subscribe`].

use std::{
    any::{Any, TypeId},
    collections::{BTreeSet, HashMap, hash_map::DefaultHasher},
    hash::{Hash, Hasher},
    marker::PhantomData,
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::RwLock;
use thiserror::Error;
use tracing::trace;

type Listener = Arc<dyn Fn() + Send + Sync>;
type SlotValue = Arc<dyn Any + Send + Sync>;

const POSITIONAL_TAG: u8 = 0;
const KEYED_TAG: u8 = 1;

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

/// Errors raised when a [`State`] handle cannot reach its value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The handle points past the end of the slot table.
    #[error("state points to unknown slot {slot}")]
    UnknownSlot {
        /// Slot index stored in the handle.
        slot: u32,
    },
    /// The slot was released (its scope was dropped) after the handle was
    /// created.
    #[error("state is stale (slot {slot}, generation {generation}, current generation {current})")]
    Stale {
        /// Slot index stored in the handle.
        slot: u32,
        /// Generation stored in the handle.
        generation: u64,
        /// Generation currently held by the slot.
        current: u64,
    },
    /// The slot holds a value of another type.
    #[error("state type mismatch for slot {slot}: expected {expected}")]
    TypeMismatch {
        /// Slot index stored in the handle.
        slot: u32,
        /// Type the handle expected.
        expected: &'static str,
    },
    /// The slot exists but no longer holds a value.
    #[error("state slot {slot} has been cleared")]
    Cleared {
        /// Slot index stored in the handle.
        slot: u32,
    },
}

/// Identifier of a [`Scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u64);

impl ScopeId {
    /// Returns the raw identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Hash, Eq, PartialEq, Clone, Copy)]
struct SlotKey {
    scope: ScopeId,
    slot_hash: u64,
    type_id: TypeId,
}

struct SlotEntry {
    key: SlotKey,
    generation: u64,
    version: u64,
    value: Option<SlotValue>,
    listeners: Vec<(u64, Listener)>,
}

#[derive(Default)]
struct SlotTable {
    entries: Vec<SlotEntry>,
    free_list: Vec<u32>,
    key_to_slot: HashMap<SlotKey, u32>,
    scope_slots: HashMap<ScopeId, Vec<u32>>,
    invalidated: BTreeSet<ScopeId>,
    next_listener_id: u64,
}

impl SlotTable {
    fn lookup(&self, key: &SlotKey) -> Option<(u32, u64)> {
        let slot = *self.key_to_slot.get(key)?;
        let entry = self.entries.get(slot as usize)?;
        entry.value.as_ref()?;
        Some((slot, entry.generation))
    }

    fn allocate(&mut self, key: SlotKey, value: SlotValue) -> (u32, u64) {
        let slot = match self.free_list.pop() {
            Some(slot) => {
                let entry = &mut self.entries[slot as usize];
                entry.key = key;
                entry.version = 0;
                entry.value = Some(value);
                entry.listeners.clear();
                slot
            }
            None => {
                self.entries.push(SlotEntry {
                    key,
                    generation: 0,
                    version: 0,
                    value: Some(value),
                    listeners: Vec::new(),
                });
                (self.entries.len() - 1) as u32
            }
        };

        self.key_to_slot.insert(key, slot);
        self.scope_slots.entry(key.scope).or_default().push(slot);
        (slot, self.entries[slot as usize].generation)
    }

    fn entry(&self, slot: u32, generation: u64) -> Result<&SlotEntry, StateError> {
        let entry = self
            .entries
            .get(slot as usize)
            .ok_or(StateError::UnknownSlot { slot })?;
        if entry.generation != generation {
            return Err(StateError::Stale {
                slot,
                generation,
                current: entry.generation,
            });
        }
        Ok(entry)
    }

    fn entry_mut(&mut self, slot: u32, generation: u64) -> Result<&mut SlotEntry, StateError> {
        let entry = self
            .entries
            .get_mut(slot as usize)
            .ok_or(StateError::UnknownSlot { slot })?;
        if entry.generation != generation {
            return Err(StateError::Stale {
                slot,
                generation,
                current: entry.generation,
            });
        }
        Ok(entry)
    }

    /// Records a mutation and returns the listeners to call once the table
    /// lock is released.
    fn mark_changed(&mut self, slot: u32, generation: u64) -> Vec<Listener> {
        let Ok(entry) = self.entry_mut(slot, generation) else {
            return Vec::new();
        };
        entry.version = entry.version.wrapping_add(1);
        let scope = entry.key.scope;
        let listeners = entry
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        trace!(slot, scope = scope.0, "state changed, scope invalidated");
        self.invalidated.insert(scope);
        listeners
    }

    /// Frees every slot owned by `scope`, returning the dropped values so
    /// they can be released outside the lock.
    fn release_scope(&mut self, scope: ScopeId) -> Vec<SlotValue> {
        let slots = self.scope_slots.remove(&scope).unwrap_or_default();
        let mut released = Vec::with_capacity(slots.len());
        for slot in slots {
            let Some(entry) = self.entries.get_mut(slot as usize) else {
                continue;
            };
            self.key_to_slot.remove(&entry.key);
            if let Some(value) = entry.value.take() {
                released.push(value);
            }
            entry.listeners.clear();
            entry.generation = entry.generation.wrapping_add(1);
            self.free_list.push(slot);
        }
        self.invalidated.remove(&scope);
        released
    }
}

static SLOT_TABLE: OnceLock<RwLock<SlotTable>> = OnceLock::new();

fn slot_table() -> &'static RwLock<SlotTable> {
    SLOT_TABLE.get_or_init(|| RwLock::new(SlotTable::default()))
}

fn slot_hash<K: Hash>(tag: u8, key: &K) -> u64 {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    key.hash(&mut hasher);
    hasher.finish()
}

/// Handle to state remembered by a [`Scope`].
///
/// `State<T>` is `Copy + Send + Sync` and provides `with`, `with_mut`, `get`,
/// and `set` to read or update the stored value. The handle stays valid until
/// the owning scope is dropped.
///
/// `with` and `with_mut` hold a lock on the value while the closure runs, so
/// the closure must not access the same state again.
///
/// # Examples
///
/// ```
/// use material_dialogs_ui::runtime::Scope;
///
/// let scope = Scope::new();
/// let count = scope.remember(|| 0usize);
/// count.with_mut(|c| *c += 1);
/// assert_eq!(count.get(), 1);
/// ```
pub struct State<T> {
    slot: u32,
    generation: u64,
    _marker: PhantomData<T>,
}

impl<T> Copy for State<T> {}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for State<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot && self.generation == other.generation
    }
}

impl<T> Eq for State<T> {}

impl<T> Hash for State<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slot.hash(state);
        self.generation.hash(state);
    }
}

impl<T> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("slot", &self.slot)
            .field("generation", &self.generation)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> State<T> {
    fn new(slot: u32, generation: u64) -> Self {
        Self {
            slot,
            generation,
            _marker: PhantomData,
        }
    }
}

impl<T> State<T>
where
    T: Send + Sync + 'static,
{
    fn try_load(&self) -> Result<Arc<RwLock<T>>, StateError> {
        let table = slot_table().read();
        let entry = table.entry(self.slot, self.generation)?;

        if entry.key.type_id != TypeId::of::<T>() {
            return Err(StateError::TypeMismatch {
                slot: self.slot,
                expected: std::any::type_name::<T>(),
            });
        }

        let value = entry
            .value
            .as_ref()
            .ok_or(StateError::Cleared { slot: self.slot })?
            .clone();
        value
            .downcast::<RwLock<T>>()
            .map_err(|_| StateError::TypeMismatch {
                slot: self.slot,
                expected: std::any::type_name::<T>(),
            })
    }

    /// Returns whether the owning scope is still alive.
    pub fn is_alive(&self) -> bool {
        self.try_load().is_ok()
    }

    /// Execute a closure with a shared reference to the stored value.
    pub fn try_with<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, StateError> {
        let lock = self.try_load()?;
        let guard = lock.read();
        Ok(f(&guard))
    }

    /// Execute a closure with a mutable reference to the stored value, then
    /// notify subscribers.
    pub fn try_with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, StateError> {
        let lock = self.try_load()?;
        let result = {
            let mut guard = lock.write();
            f(&mut guard)
        };
        let listeners = slot_table().write().mark_changed(self.slot, self.generation);
        for listener in listeners {
            listener();
        }
        Ok(result)
    }

    /// Execute a closure with a shared reference to the stored value.
    ///
    /// # Panics
    ///
    /// Panics if the owning scope has been dropped.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.try_with(f).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Execute a closure with a mutable reference to the stored value.
    ///
    /// # Panics
    ///
    /// Panics if the owning scope has been dropped.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.try_with_mut(f).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Get a cloned value. Requires `T: Clone`.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(Clone::clone)
    }

    /// Replace the stored value.
    pub fn set(&self, value: T) {
        self.with_mut(|slot| *slot = value);
    }

    /// Number of mutations applied since the value was remembered.
    pub fn version(&self) -> Result<u64, StateError> {
        let table = slot_table().read();
        Ok(table.entry(self.slot, self.generation)?.version)
    }

    /// Registers a listener called after every mutation of this state.
    ///
    /// Listeners run synchronously on the mutating thread, after the value
    /// lock is released, so they may read the state. They are dropped with
    /// the slot.
    pub fn subscribe(
        &self,
        listener: impl Fn() + Send + Sync + 'static,
    ) -> Result<Subscription, StateError> {
        let mut table = slot_table().write();
        let id = table.next_listener_id;
        table.next_listener_id = table.next_listener_id.wrapping_add(1);
        let entry = table.entry_mut(self.slot, self.generation)?;
        entry.listeners.push((id, Arc::new(listener)));
        Ok(Subscription {
            slot: self.slot,
            generation: self.generation,
            id,
        })
    }
}

/// Registration returned by [`State::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    slot: u32,
    generation: u64,
    id: u64,
}

impl Subscription {
    /// Removes the listener. Returns `false` if it was already gone.
    pub fn unsubscribe(self) -> bool {
        let mut table = slot_table().write();
        let Ok(entry) = table.entry_mut(self.slot, self.generation) else {
            return false;
        };
        let before = entry.listeners.len();
        entry.listeners.retain(|(id, _)| *id != self.id);
        entry.listeners.len() != before
    }
}

/// Owner of remembered state.
///
/// Positional [`remember`](Scope::remember) calls are matched by call order
/// within a frame; call [`begin_frame`](Scope::begin_frame) before every
/// composition pass. Dropping the scope releases all of its slots.
#[derive(Debug)]
pub struct Scope {
    id: ScopeId,
    call_counter: AtomicU64,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self {
            id: ScopeId(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed)),
            call_counter: AtomicU64::new(0),
        }
    }

    /// Returns the scope identifier.
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Resets positional call tracking for a new composition pass.
    pub fn begin_frame(&self) {
        self.call_counter.store(0, Ordering::Relaxed);
    }

    /// Remember a value across frames, identified by call order.
    ///
    /// `init` runs only the first time this position is reached.
    pub fn remember<F, T>(&self, init: F) -> State<T>
    where
        F: FnOnce() -> T,
        T: Send + Sync + 'static,
    {
        let position = self.call_counter.fetch_add(1, Ordering::Relaxed);
        self.remember_slot(slot_hash(POSITIONAL_TAG, &position), init)
    }

    /// Remember a value across frames with an explicit key.
    ///
    /// Use this for state created inside loops, where call order is not
    /// stable.
    pub fn remember_with_key<K, F, T>(&self, key: K, init: F) -> State<T>
    where
        K: Hash,
        F: FnOnce() -> T,
        T: Send + Sync + 'static,
    {
        self.remember_slot(slot_hash(KEYED_TAG, &key), init)
    }

    fn remember_slot<F, T>(&self, slot_hash: u64, init: F) -> State<T>
    where
        F: FnOnce() -> T,
        T: Send + Sync + 'static,
    {
        let key = SlotKey {
            scope: self.id,
            slot_hash,
            type_id: TypeId::of::<T>(),
        };

        if let Some((slot, generation)) = slot_table().read().lookup(&key) {
            return State::new(slot, generation);
        }

        let value: SlotValue = Arc::new(RwLock::new(init()));
        let mut table = slot_table().write();
        let (slot, generation) = match table.lookup(&key) {
            Some(existing) => existing,
            None => table.allocate(key, value),
        };
        State::new(slot, generation)
    }

    /// Returns whether any state of this scope changed since the last call to
    /// [`take_invalidated`](Scope::take_invalidated).
    pub fn is_invalidated(&self) -> bool {
        slot_table().read().invalidated.contains(&self.id)
    }

    /// Clears and returns the invalidation flag.
    pub fn take_invalidated(&self) -> bool {
        slot_table().write().invalidated.remove(&self.id)
    }

    /// Number of slots currently held by this scope.
    pub fn slot_count(&self) -> usize {
        slot_table()
            .read()
            .scope_slots
            .get(&self.id)
            .map_or(0, Vec::len)
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        let released = slot_table().write().release_scope(self.id);
        trace!(scope = self.id.0, slots = released.len(), "scope released");
        drop(released);
    }
}

/// Drains the set of scopes invalidated since the last call.
///
/// Rendering layers poll this once per frame to decide what to rebuild.
pub fn take_invalidated_scopes() -> Vec<ScopeId> {
    std::mem::take(&mut slot_table().write().invalidated)
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn remember_returns_same_slot_across_frames() {
        let scope = Scope::new();

        scope.begin_frame();
        let first = scope.remember(|| 1u32);
        let second = scope.remember(|| String::from("a"));
        first.set(7);

        scope.begin_frame();
        let first_again = scope.remember(|| 100u32);
        let second_again = scope.remember(|| String::from("b"));

        assert_eq!(first, first_again);
        assert_eq!(first_again.get(), 7);
        assert_eq!(second_again.get(), "a");
        assert_eq!(second, second_again);
        assert_eq!(scope.slot_count(), 2);
    }

    #[test]
    fn keyed_state_is_independent_of_call_order() {
        let scope = Scope::new();
        let a = scope.remember_with_key("a", || 1);
        let b = scope.remember_with_key("b", || 2);
        assert_eq!(scope.remember_with_key("b", || 0), b);
        assert_eq!(scope.remember_with_key("a", || 0), a);
        assert_eq!(a.get() + b.get(), 3);
    }

    #[test]
    fn dropping_scope_makes_handles_stale() {
        let scope = Scope::new();
        let state = scope.remember(|| 5i64);
        assert!(state.is_alive());

        drop(scope);

        assert!(!state.is_alive());
        assert!(matches!(
            state.try_with(|v| *v),
            Err(StateError::Stale { .. })
        ));
    }

    #[test]
    fn reused_slot_does_not_revive_old_handle() {
        let scope = Scope::new();
        let old = scope.remember(|| 1u8);
        drop(scope);

        let scope = Scope::new();
        let fresh = scope.remember(|| 2u8);
        assert_eq!(fresh.get(), 2);
        assert!(old.try_with(|v| *v).is_err());
    }

    #[test]
    fn mutation_invalidates_scope_and_notifies() {
        let scope = Scope::new();
        let state = scope.remember(|| 0u32);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(AtomicUsize::new(0));

        let subscription = {
            let calls = Arc::clone(&calls);
            let seen = Arc::clone(&seen);
            state
                .subscribe(move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    seen.store(state.get() as usize, Ordering::SeqCst);
                })
                .expect("state is alive")
        };

        assert!(!scope.is_invalidated());
        state.set(3);
        assert!(scope.take_invalidated());
        assert!(!scope.is_invalidated());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(seen.load(Ordering::SeqCst), 3);
        assert_eq!(state.version(), Ok(1));

        assert!(subscription.unsubscribe());
        state.set(4);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!subscription.unsubscribe());
    }
}
