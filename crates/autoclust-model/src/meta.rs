#![deny(unsafe_code)]

use crate::ColumnMeta;

/// Order-preserving map of column name to [`ColumnMeta`].
///
/// Column names mutate during sanitation, so the map exposes an explicit
/// [`rename`](ColumnMetaMap::rename) that moves the value to the new key in
/// place. Insertion order is the column order of the owning dataset.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColumnMetaMap {
    entries: Vec<(String, ColumnMeta)>,
}

impl ColumnMetaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the metadata for `name`.
    ///
    /// Re-inserting an existing name overwrites the value but keeps the
    /// entry's original position (last write wins on the value only).
    pub fn insert(&mut self, name: impl Into<String>, meta: ColumnMeta) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = meta,
            None => self.entries.push((name, meta)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ColumnMeta> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, meta)| meta)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ColumnMeta> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, meta)| meta)
    }

    /// Move the metadata under `old` to the key `new`, keeping its position.
    ///
    /// Returns false when `old` is absent. Renaming onto an existing key is
    /// rejected; the duplicate has to be surfaced by the caller's header
    /// check, not silently collapsed here.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.entries.iter().any(|(n, _)| n == old);
        }
        if self.entries.iter().any(|(n, _)| n == new) {
            return false;
        }
        match self.entries.iter_mut().find(|(n, _)| n == old) {
            Some((slot, _)) => {
                *slot = new.to_string();
                true
            }
            None => false,
        }
    }

    /// Union with `other`, last write wins per name (positions of existing
    /// entries are preserved, new names append in `other`'s order).
    pub fn extend(&mut self, other: &ColumnMetaMap) {
        for (name, meta) in &other.entries {
            self.insert(name.clone(), *meta);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnMeta)> {
        self.entries.iter().map(|(n, m)| (n.as_str(), m))
    }
}
