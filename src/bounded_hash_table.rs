//! BoundedHashTable: fixed grid of string-keyed slots with per-row scanning.

use crate::error::{Error, InsertError};
use crate::geometry::Geometry;
use core::fmt;
use core::hash::BuildHasher;
use hashbrown::hash_map::DefaultHashBuilder;

#[derive(Debug)]
struct Slot<V> {
    key: Box<str>,
    value: V,
}

/// Fixed-capacity map from strings to `V`.
///
/// Storage is one contiguous buffer of `bucket_count * bucket_width`
/// slots; row `i` occupies `[i * bucket_width, (i + 1) * bucket_width)`.
/// A key lives only in the row its hash selects, so every lookup scans at
/// most `bucket_width` slots. The table never grows; build a larger one and
/// re-insert if more room is needed.
pub struct BoundedHashTable<V, S = DefaultHashBuilder> {
    hasher: S,
    geometry: Geometry,
    slots: Box<[Option<Slot<V>>]>,
    len: usize,
}

impl<V> BoundedHashTable<V> {
    /// Create a table sized for `capacity` entries. See [`Geometry`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

/// Iterator over immutable entries in grid order.
pub struct Iter<'a, V> {
    it: core::slice::Iter<'a, Option<Slot<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .find_map(|s| s.as_ref())
            .map(|s| (&*s.key, &s.value))
    }
}

/// Iterator over mutable entries in grid order.
pub struct IterMut<'a, V> {
    it: core::slice::IterMut<'a, Option<Slot<V>>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .find_map(|s| s.as_mut())
            .map(|s| (&*s.key, &mut s.value))
    }
}

impl<V, S> BoundedHashTable<V, S>
where
    S: BuildHasher,
{
    /// Create a table sized for `capacity` entries that hashes keys with
    /// `hasher`. All slots are allocated here; the table never reallocates.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let geometry = Geometry::from_capacity(capacity);
        let slots = core::iter::repeat_with(|| None)
            .take(geometry.slot_count())
            .collect();
        Self {
            hasher,
            geometry,
            slots,
            len: 0,
        }
    }

    fn row_of(&self, key: &str) -> usize {
        self.geometry.row_of(self.hasher.hash_one(key))
    }

    /// Flat index of `key`'s slot, if present.
    fn find(&self, key: &str) -> Option<usize> {
        let range = self.geometry.row_range(self.row_of(key));
        let start = range.start;
        self.slots[range]
            .iter()
            .position(|s| matches!(s, Some(s) if &*s.key == key))
            .map(|i| start + i)
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }
    pub fn bucket_count(&self) -> usize {
        self.geometry.bucket_count()
    }
    pub fn bucket_width(&self) -> usize {
        self.geometry.bucket_width()
    }
    /// Maximum number of entries admitted: half the physical slots.
    pub fn capacity(&self) -> usize {
        self.geometry.admission_cap()
    }
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        if self.is_empty() {
            return None;
        }
        let i = self.find(key)?;
        self.slots[i].as_ref().map(|s| &s.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        if self.is_empty() {
            return None;
        }
        let i = self.find(key)?;
        self.slots[i].as_mut().map(|s| &mut s.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        !self.is_empty() && self.find(key).is_some()
    }

    /// Store `value` under `key`.
    ///
    /// Returns `Ok(Some(old))` when an existing entry was overwritten and
    /// `Ok(None)` when a new slot was taken. Updates never consume capacity.
    /// Once `len()` reaches [`capacity`](Self::capacity) every call fails
    /// with [`InsertError::CapacityReached`], updates included, and a new key
    /// whose row is full fails with [`InsertError::BucketFull`]. Failed calls
    /// leave the table unchanged.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, InsertError> {
        if self.len >= self.geometry.admission_cap() {
            return Err(InsertError::CapacityReached);
        }
        let range = self.geometry.row_range(self.row_of(key));
        let row = &mut self.slots[range.clone()];

        if let Some(slot) = row.iter_mut().flatten().find(|s| &*s.key == key) {
            return Ok(Some(core::mem::replace(&mut slot.value, value)));
        }

        let free = row.iter_mut().find(|s| s.is_none());
        match free {
            Some(cell) => {
                *cell = Some(Slot {
                    key: key.into(),
                    value,
                });
                self.len += 1;
                self.debug_check_row(range, key);
                Ok(None)
            }
            None => Err(InsertError::BucketFull),
        }
    }

    /// Store `value` under `key`, reporting only success or failure.
    pub fn set(&mut self, key: &str, value: V) -> bool {
        self.insert(key, value).is_ok()
    }

    /// Remove `key`, returning its value if it was present.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let i = self.find(key)?;
        let slot = self.slots[i].take()?;
        self.len -= 1;
        Some(slot.value)
    }

    /// Occupied fraction of the physical slots, `len / slot_count`.
    pub fn load(&self) -> f64 {
        log::debug!(
            "load: bucket_count={} bucket_width={} len={}",
            self.geometry.bucket_count(),
            self.geometry.bucket_width(),
            self.len
        );
        self.len as f64 / self.geometry.slot_count() as f64
    }

    /// Checked [`get`](Self::get) for a key that may be unset.
    ///
    /// `None` returns [`Error::InvalidArgument`]; the table is never
    /// modified.
    pub fn try_get(&self, key: Option<&str>) -> Result<Option<&V>, Error> {
        let key = key.ok_or(Error::InvalidArgument { op: "get" })?;
        Ok(self.get(key))
    }

    /// Checked [`set`](Self::set) for a key that may be unset.
    ///
    /// `None` returns [`Error::InvalidArgument`], drops `value` and leaves
    /// the table unchanged. Otherwise yields what `set` would.
    pub fn try_set(&mut self, key: Option<&str>, value: V) -> Result<bool, Error> {
        let key = key.ok_or(Error::InvalidArgument { op: "set" })?;
        Ok(self.set(key, value))
    }

    /// Checked [`delete`](Self::delete) for a key that may be unset.
    ///
    /// `None` returns [`Error::InvalidArgument`] and leaves the table
    /// unchanged.
    pub fn try_delete(&mut self, key: Option<&str>) -> Result<Option<V>, Error> {
        let key = key.ok_or(Error::InvalidArgument { op: "delete" })?;
        Ok(self.delete(key))
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            it: self.slots.iter_mut(),
        }
    }

    /// Debug-only: `key` occupies exactly one slot of its row. Touches only
    /// that row.
    #[inline]
    fn debug_check_row(&self, range: core::ops::Range<usize>, key: &str) {
        #[cfg(debug_assertions)]
        {
            let hits = self.slots[range]
                .iter()
                .filter(|s| matches!(s, Some(s) if &*s.key == key))
                .count();
            assert_eq!(hits, 1, "key stored {hits} times in its row");
        }
        #[cfg(not(debug_assertions))]
        let _ = (range, key);
    }
}

impl<V: fmt::Debug, S: BuildHasher> fmt::Debug for BoundedHashTable<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V, S: BuildHasher> IntoIterator for &'a BoundedHashTable<V, S> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
