//! Breadth-first reachability over walkable cells, following neighbor links.
//! Every query is read-only, so callers can test hypothetical exclusions freely.

use std::collections::{BTreeMap, BTreeSet, VecDeque, btree_map::Entry};

use crate::station::Station;
use crate::types::Pos;

pub fn reachable(station: &Station, start: Pos, excluded: &BTreeSet<Pos>) -> BTreeSet<Pos> {
    let mut visited = BTreeSet::new();
    if !station.is_walkable(start) || excluded.contains(&start) {
        return visited;
    }

    let mut queue = VecDeque::from([start]);
    visited.insert(start);
    while let Some(current) = queue.pop_front() {
        for neighbor in station.neighbors(current) {
            if !excluded.contains(&neighbor) && visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited
}

pub fn reachable_count(station: &Station, start: Pos, excluded: &BTreeSet<Pos>) -> usize {
    reachable(station, start, excluded).len()
}

/// BFS depth of every walkable cell reachable from `start`.
pub fn distances_from(station: &Station, start: Pos) -> BTreeMap<Pos, u32> {
    let mut distances = BTreeMap::new();
    if !station.is_walkable(start) {
        return distances;
    }

    let mut queue = VecDeque::from([start]);
    distances.insert(start, 0_u32);
    while let Some(current) = queue.pop_front() {
        let next_distance = distances.get(&current).copied().unwrap_or(0) + 1;
        for neighbor in station.neighbors(current) {
            if let Entry::Vacant(slot) = distances.entry(neighbor) {
                slot.insert(next_distance);
                queue.push_back(neighbor);
            }
        }
    }

    distances
}
