use crate::grid::Position;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Entry {
    priority: u32,
    rank: u64,
    pos: Position,
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap behavior: lowest priority, then earliest rank.
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.rank.cmp(&self.rank),
            other => other,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Member {
    priority: u32,
    rank: u64,
}

/// Open set of a best-first search.
///
/// Cells come out in ascending priority. Equal priorities come out in the
/// order the cells were first inserted; lowering a member's priority keeps
/// its original rank. Superseded heap entries are skipped lazily on pop.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    members: FxHashMap<Position, Member>,
    next_rank: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `pos`, or moves it to `priority` if it is already a member.
    ///
    /// Returns `true` when `pos` was not a member before the call.
    pub fn push(&mut self, pos: Position, priority: u32) -> bool {
        let (rank, inserted) = match self.members.get_mut(&pos) {
            Some(member) => {
                if member.priority == priority {
                    return false;
                }
                member.priority = priority;
                (member.rank, false)
            }
            None => {
                let rank = self.next_rank;
                self.next_rank += 1;
                self.members.insert(pos, Member { priority, rank });
                (rank, true)
            }
        };

        self.heap.push(Entry { priority, rank, pos });
        inserted
    }

    /// Removes and returns the member with the lowest priority.
    pub fn pop(&mut self) -> Option<Position> {
        while let Some(entry) = self.heap.pop() {
            let live = self
                .members
                .get(&entry.pos)
                .is_some_and(|m| m.priority == entry.priority && m.rank == entry.rank);

            if live {
                self.members.remove(&entry.pos);
                return Some(entry.pos);
            }
        }
        None
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.members.contains_key(pos)
    }

    pub fn priority_of(&self, pos: &Position) -> Option<u32> {
        self.members.get(pos).map(|m| m.priority)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn pops_lowest_priority_first() {
        let mut frontier = Frontier::new();
        frontier.push(p(0, 0), 30);
        frontier.push(p(0, 1), 10);
        frontier.push(p(0, 2), 20);

        assert_eq!(frontier.pop(), Some(p(0, 1)));
        assert_eq!(frontier.pop(), Some(p(0, 2)));
        assert_eq!(frontier.pop(), Some(p(0, 0)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn ties_go_to_earliest_insertion() {
        let mut frontier = Frontier::new();
        frontier.push(p(2, 2), 40);
        frontier.push(p(0, 0), 40);
        frontier.push(p(1, 1), 40);

        assert_eq!(frontier.pop(), Some(p(2, 2)));
        assert_eq!(frontier.pop(), Some(p(0, 0)));
        assert_eq!(frontier.pop(), Some(p(1, 1)));
    }

    #[test]
    fn lowered_priority_keeps_insertion_rank() {
        let mut frontier = Frontier::new();
        frontier.push(p(0, 0), 50);
        frontier.push(p(0, 1), 20);
        assert!(!frontier.push(p(0, 0), 20));

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.priority_of(&p(0, 0)), Some(20));
        // Both at 20; (0, 0) was inserted first.
        assert_eq!(frontier.pop(), Some(p(0, 0)));
        assert_eq!(frontier.pop(), Some(p(0, 1)));
        // The superseded entry at 50 is discarded.
        assert_eq!(frontier.pop(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn membership_tracks_pushes_and_pops() {
        let mut frontier = Frontier::new();
        assert!(frontier.push(p(3, 3), 7));
        assert!(frontier.contains(&p(3, 3)));
        assert_eq!(frontier.pop(), Some(p(3, 3)));
        assert!(!frontier.contains(&p(3, 3)));
        assert!(frontier.push(p(3, 3), 9));
    }

    #[test]
    fn reinserted_cell_ignores_its_old_entries() {
        let mut frontier = Frontier::new();
        frontier.push(p(0, 0), 10);
        frontier.push(p(0, 0), 5);
        assert_eq!(frontier.pop(), Some(p(0, 0)));

        frontier.push(p(1, 1), 8);
        frontier.push(p(0, 0), 10);
        assert_eq!(frontier.pop(), Some(p(1, 1)));
        assert_eq!(frontier.pop(), Some(p(0, 0)));
        assert_eq!(frontier.pop(), None);
    }
}
