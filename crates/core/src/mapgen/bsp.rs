//! Binary space partitioning: split the interior into leaves, give each leaf a
//! room, and join sibling subtrees with L-shaped corridors.

use crate::station::Station;

use super::layout::{Rect, carve_l_shaped_corridor};
use super::seed::StationRng;

/// Aspect ratio (as 5:4) past which the split axis is forced.
const FORCED_AXIS_RATIO: (usize, usize) = (5, 4);

#[derive(Clone, Copy, Debug)]
pub(super) struct PartitionParams {
    pub(super) min_node_size: usize,
    pub(super) min_room_size: usize,
    pub(super) room_padding: usize,
}

#[derive(Clone, Debug)]
pub(super) enum BspNode {
    Leaf { area: Rect, room: Option<Rect> },
    Split { left: Box<BspNode>, right: Box<BspNode> },
}

impl BspNode {
    /// Rooms in left-to-right leaf order.
    pub(super) fn rooms(&self) -> Vec<Rect> {
        let mut rooms = Vec::new();
        self.collect_rooms(&mut rooms);
        rooms
    }

    fn collect_rooms(&self, rooms: &mut Vec<Rect>) {
        match self {
            BspNode::Leaf { room, .. } => rooms.extend(*room),
            BspNode::Split { left, right } => {
                left.collect_rooms(rooms);
                right.collect_rooms(rooms);
            }
        }
    }

    #[cfg(test)]
    pub(super) fn leaves(&self) -> Vec<Rect> {
        match self {
            BspNode::Leaf { area, .. } => vec![*area],
            BspNode::Split { left, right } => {
                let mut leaves = left.leaves();
                leaves.extend(right.leaves());
                leaves
            }
        }
    }
}

pub(super) fn partition(area: Rect, params: &PartitionParams, rng: &mut StationRng) -> BspNode {
    match split_area(area, params.min_node_size, rng) {
        Some((first, second)) => BspNode::Split {
            left: Box::new(partition(first, params, rng)),
            right: Box::new(partition(second, params, rng)),
        },
        None => BspNode::Leaf { area, room: place_room(area, params, rng) },
    }
}

fn split_area(area: Rect, min_node_size: usize, rng: &mut StationRng) -> Option<(Rect, Rect)> {
    let can_split_vertically = area.width >= 2 * min_node_size;
    let can_split_horizontally = area.height >= 2 * min_node_size;
    let vertical = match (can_split_vertically, can_split_horizontally) {
        (false, false) => return None,
        (true, false) => true,
        (false, true) => false,
        (true, true) => {
            let (wide, narrow) = FORCED_AXIS_RATIO;
            if area.width * narrow >= area.height * wide {
                true
            } else if area.height * narrow >= area.width * wide {
                false
            } else {
                rng.coin()
            }
        }
    };

    if vertical {
        let cut = rng.range_usize(min_node_size, area.width - min_node_size);
        Some((
            Rect { width: cut, ..area },
            Rect { x: area.x + cut, width: area.width - cut, ..area },
        ))
    } else {
        let cut = rng.range_usize(min_node_size, area.height - min_node_size);
        Some((
            Rect { height: cut, ..area },
            Rect { y: area.y + cut, height: area.height - cut, ..area },
        ))
    }
}

fn place_room(leaf: Rect, params: &PartitionParams, rng: &mut StationRng) -> Option<Rect> {
    let max_width = leaf.width.checked_sub(params.room_padding)?;
    let max_height = leaf.height.checked_sub(params.room_padding)?;
    if max_width < params.min_room_size || max_height < params.min_room_size {
        return None;
    }

    let width = rng.range_usize(params.min_room_size, max_width);
    let height = rng.range_usize(params.min_room_size, max_height);
    let leading = params.room_padding / 2;
    let trailing = params.room_padding - leading;
    let x = rng.range_usize(leaf.x + leading, leaf.x + leaf.width - width - trailing);
    let y = rng.range_usize(leaf.y + leading, leaf.y + leaf.height - height - trailing);
    Some(Rect { x, y, width, height })
}

/// Carves one corridor per split node, post-order, and returns the subtree's rooms.
pub(super) fn connect_subtrees(
    node: &BspNode,
    station: &mut Station,
    rng: &mut StationRng,
) -> Vec<Rect> {
    match node {
        BspNode::Leaf { room, .. } => room.iter().copied().collect(),
        BspNode::Split { left, right } => {
            let mut left_rooms = connect_subtrees(left, station, rng);
            let right_rooms = connect_subtrees(right, station, rng);
            let left_pick = rng.pick(&left_rooms).copied();
            let right_pick = rng.pick(&right_rooms).copied();
            if let (Some(from), Some(to)) = (left_pick, right_pick) {
                let horizontal_first = rng.coin();
                carve_l_shaped_corridor(station, from.center(), to.center(), horizontal_first);
            }
            left_rooms.extend(right_rooms);
            left_rooms
        }
    }
}
