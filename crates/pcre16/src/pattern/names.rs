//! Named capture groups, decoded once per compiled pattern.
//!
//! The engine's table is a packed array of fixed-stride entries. Each entry
//! starts with a 16-bit group number followed by the NUL-terminated UTF-16
//! group name; the stride is reported in bytes.

use std::ffi::c_void;

use ahash::AHashMap;
use smol_str::SmolStr;

use crate::codec;
use crate::error::PcreResult;
use crate::ffi::EngineApi;

#[derive(Debug, Clone, Default)]
pub struct NameTable {
    by_index: AHashMap<usize, SmolStr>,
    by_name: AHashMap<SmolStr, usize>,
}

impl NameTable {
    /// # Safety
    /// `code` must be a live handle produced by `api.compile`.
    pub(crate) unsafe fn decode(api: &EngineApi, code: *mut c_void) -> PcreResult<Self> {
        let mut table = NameTable::default();
        let (count, stride, base) = unsafe {
            (
                (api.get_match_name_count)(code) as usize,
                (api.get_match_name_table_entry_size)(code) as usize,
                (api.get_match_name_table)(code),
            )
        };
        if count == 0 || base.is_null() || stride < 4 {
            return Ok(table);
        }

        let max_name_units = (stride - 2) / 2;
        let mut name = Vec::with_capacity(max_name_units);
        for i in 0..count {
            name.clear();
            unsafe {
                let entry = base.add(i * stride);
                let index = std::ptr::read_unaligned(entry as *const u16) as usize;
                let chars = entry.add(2) as *const u16;
                for j in 0..max_name_units {
                    let unit = std::ptr::read_unaligned(chars.add(j));
                    if unit == 0 {
                        break;
                    }
                    name.push(unit);
                }
                table.insert(index, SmolStr::new(codec::decode(&name)?));
            }
        }
        Ok(table)
    }

    fn insert(&mut self, index: usize, name: SmolStr) {
        // Duplicate names map to the lowest group number.
        let lowest = self.by_name.entry(name.clone()).or_insert(index);
        *lowest = (*lowest).min(index);
        self.by_index.insert(index, name);
    }

    pub fn name(&self, index: usize) -> Option<&SmolStr> {
        self.by_index.get(&index)
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }

    /// Entries ordered by group number.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        let mut entries: Vec<_> = self.by_index.iter().map(|(&i, n)| (i, n.as_str())).collect();
        entries.sort_unstable_by_key(|&(i, _)| i);
        entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        let mut table = NameTable::default();
        table.insert(2, SmolStr::new("year"));
        table.insert(1, SmolStr::new("day"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.name(2).map(SmolStr::as_str), Some("year"));
        assert_eq!(table.index("day"), Some(1));
        assert_eq!(table.name(3), None);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(1, "day"), (2, "year")]);
    }

    #[test]
    fn test_duplicate_name_keeps_lowest_index() {
        let mut table = NameTable::default();
        table.insert(3, SmolStr::new("x"));
        table.insert(1, SmolStr::new("x"));
        assert_eq!(table.index("x"), Some(1));
        assert_eq!(table.len(), 2);
    }
}
