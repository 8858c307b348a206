//! Author list editing for wizard step 3.
//!
//! The author sequence is order-sensitive: the primary contact is an index
//! into it, and persisted entries removed by the author must be remembered
//! so the repository layer can purge them on the next save.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// One entry in the in-progress author sequence.
///
/// `author_id` is `None` until the entry has been persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorEntry {
    pub author_id: Option<DbId>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub affiliation: String,
    #[serde(default)]
    pub email: String,
}

/// Direction for moving an author within the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    /// Parse the request flag; anything other than `u` means down.
    pub fn from_flag(flag: &str) -> Self {
        if flag == "u" {
            Self::Up
        } else {
            Self::Down
        }
    }
}

/// The editable author sequence with its primary-contact index and the
/// removal list of already-persisted authors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorList {
    pub entries: Vec<AuthorEntry>,
    /// Index of the corresponding author within `entries`.
    pub primary_contact: usize,
    /// Persisted author ids the author has deleted in-form; purged
    /// server-side on the next successful save.
    pub deleted: Vec<DbId>,
}

impl AuthorList {
    pub fn new(entries: Vec<AuthorEntry>, primary_contact: usize) -> Self {
        Self {
            entries,
            primary_contact,
            deleted: Vec::new(),
        }
    }

    /// Append an empty entry to the end of the sequence.
    pub fn add_blank(&mut self) {
        self.entries.push(AuthorEntry::default());
    }

    /// Remove the entry at `index`.
    ///
    /// A persisted entry is recorded in `deleted`. If the primary contact
    /// pointed at the removed entry it is reset to 0; if it pointed past
    /// the removed entry it shifts down to keep tracking the same author.
    /// Out-of-range indices are ignored.
    pub fn delete(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        let removed = self.entries.remove(index);
        if let Some(id) = removed.author_id {
            self.deleted.push(id);
        }
        if self.primary_contact == index {
            self.primary_contact = 0;
        } else if self.primary_contact > index {
            self.primary_contact -= 1;
        }
    }

    /// Swap the entry at `index` with its neighbour in `direction`.
    ///
    /// A move past either boundary is a no-op. The primary contact index
    /// follows whichever of the two swapped entries it pointed at.
    pub fn move_entry(&mut self, direction: MoveDirection, index: usize) {
        let len = self.entries.len();
        let neighbour = match direction {
            MoveDirection::Up => {
                if index == 0 || index >= len {
                    return;
                }
                index - 1
            }
            MoveDirection::Down => {
                if index + 1 >= len {
                    return;
                }
                index + 1
            }
        };
        self.entries.swap(index, neighbour);
        if self.primary_contact == index {
            self.primary_contact = neighbour;
        } else if self.primary_contact == neighbour {
            self.primary_contact = index;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, id: Option<DbId>) -> AuthorEntry {
        AuthorEntry {
            author_id: id,
            first_name: name.to_string(),
            last_name: format!("{name}son"),
            affiliation: String::new(),
            email: format!("{name}@example.edu"),
        }
    }

    fn list_of(n: usize) -> AuthorList {
        let entries = (0..n)
            .map(|i| entry(&format!("a{i}"), Some(i as DbId + 100)))
            .collect();
        AuthorList::new(entries, 0)
    }

    // -- add --

    #[test]
    fn add_blank_appends_empty_entry() {
        let mut list = list_of(2);
        list.add_blank();
        assert_eq!(list.entries.len(), 3);
        assert_eq!(list.entries[2], AuthorEntry::default());
        assert_eq!(list.primary_contact, 0);
    }

    // -- delete --

    #[test]
    fn delete_shrinks_sequence_and_records_persisted_id() {
        let mut list = list_of(3);
        list.delete(1);
        assert_eq!(list.entries.len(), 2);
        assert_eq!(list.deleted, vec![101]);
        assert_eq!(list.entries[1].first_name, "a2");
    }

    #[test]
    fn delete_unpersisted_entry_records_nothing() {
        let mut list = list_of(1);
        list.add_blank();
        list.delete(1);
        assert!(list.deleted.is_empty());
        assert_eq!(list.entries.len(), 1);
    }

    #[test]
    fn delete_primary_contact_resets_to_zero() {
        let mut list = list_of(3);
        list.primary_contact = 2;
        list.delete(2);
        assert_eq!(list.primary_contact, 0);
    }

    #[test]
    fn delete_before_primary_contact_shifts_it_down() {
        let mut list = list_of(3);
        list.primary_contact = 2;
        list.delete(0);
        // Still points at the same author, now at index 1.
        assert_eq!(list.primary_contact, 1);
        assert_eq!(list.entries[1].first_name, "a2");
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let mut list = list_of(2);
        list.delete(5);
        assert_eq!(list.entries.len(), 2);
        assert!(list.deleted.is_empty());
    }

    #[test]
    fn primary_contact_never_dangles_after_delete() {
        for pc in 0..4 {
            for del in 0..4 {
                let mut list = list_of(4);
                list.primary_contact = pc;
                list.delete(del);
                assert!(list.primary_contact < list.entries.len());
            }
        }
    }

    // -- move --

    #[test]
    fn move_up_at_top_is_noop() {
        let mut list = list_of(3);
        let before = list.clone();
        list.move_entry(MoveDirection::Up, 0);
        assert_eq!(list, before);
    }

    #[test]
    fn move_down_at_bottom_is_noop() {
        let mut list = list_of(3);
        let before = list.clone();
        list.move_entry(MoveDirection::Down, 2);
        assert_eq!(list, before);
    }

    #[test]
    fn move_up_swaps_with_previous() {
        let mut list = list_of(3);
        list.move_entry(MoveDirection::Up, 2);
        assert_eq!(list.entries[1].first_name, "a2");
        assert_eq!(list.entries[2].first_name, "a1");
    }

    #[test]
    fn move_down_swaps_with_next() {
        let mut list = list_of(3);
        list.move_entry(MoveDirection::Down, 0);
        assert_eq!(list.entries[0].first_name, "a1");
        assert_eq!(list.entries[1].first_name, "a0");
    }

    #[test]
    fn primary_contact_follows_moved_author() {
        let mut list = list_of(3);
        list.primary_contact = 1;
        list.move_entry(MoveDirection::Up, 1);
        assert_eq!(list.primary_contact, 0);

        let mut list = list_of(3);
        list.primary_contact = 0;
        list.move_entry(MoveDirection::Up, 1);
        // The displaced neighbour carries the index the mover vacated.
        assert_eq!(list.primary_contact, 1);

        let mut list = list_of(3);
        list.primary_contact = 2;
        list.move_entry(MoveDirection::Down, 1);
        assert_eq!(list.primary_contact, 1);
    }

    #[test]
    fn primary_contact_untouched_by_unrelated_move() {
        let mut list = list_of(4);
        list.primary_contact = 3;
        list.move_entry(MoveDirection::Down, 0);
        assert_eq!(list.primary_contact, 3);
    }

    // -- direction flag --

    #[test]
    fn direction_flag_parses_like_the_wizard_form() {
        assert_eq!(MoveDirection::from_flag("u"), MoveDirection::Up);
        assert_eq!(MoveDirection::from_flag("d"), MoveDirection::Down);
        // Anything unrecognized falls back to down.
        assert_eq!(MoveDirection::from_flag("x"), MoveDirection::Down);
        assert_eq!(MoveDirection::from_flag(""), MoveDirection::Down);
    }
}
