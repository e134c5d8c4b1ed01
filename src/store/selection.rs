use indexmap::IndexMap;

/// Which tasks are checked in an open bulk-action dialog.
///
/// Entries are seeded `false` for every task when the dialog opens. Ids that
/// were never seeded read as unselected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    flags: IndexMap<String, bool>,
}

impl Selection {
    /// One unselected entry per id
    pub fn seeded<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Selection {
            flags: ids.into_iter().map(|id| (id, false)).collect(),
        }
    }

    /// Flip the flag for `id`; an unknown id becomes selected
    pub fn toggle(&mut self, id: &str) {
        match self.flags.get_mut(id) {
            Some(flag) => *flag = !*flag,
            None => {
                self.flags.insert(id.to_string(), true);
            }
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Unselect everything, keeping the entries
    pub fn clear(&mut self) {
        for flag in self.flags.values_mut() {
            *flag = false;
        }
    }

    /// Drop the entry for a task that no longer exists
    pub fn forget(&mut self, id: &str) {
        self.flags.shift_remove(id);
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.flags
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn any(&self) -> bool {
        self.flags.values().any(|selected| *selected)
    }

    /// Number of entries, selected or not
    #[cfg(test)]
    fn len(&self) -> usize {
        self.flags.len()
    }
}
