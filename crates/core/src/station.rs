//! The station grid: a fixed row-major arena of cells with coordinate-addressed
//! neighbor links, the item arena, and the start/exit references.

mod occupant;
mod validate;

use std::collections::BTreeSet;

use slotmap::SlotMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{CORRIDOR, Direction, Item, ItemId, Pos};

pub use occupant::{
    Door, FurnitureKind, Generator, HazardKind, Occupant, door_name, key_name,
};
pub use validate::LayoutError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub pos: Pos,
    pub walkable: bool,
    /// Empty for walls, [`CORRIDOR`] for passages, otherwise the room name.
    pub name: String,
    pub discovered: bool,
    pub visited: bool,
    pub exit: bool,
    pub locked: bool,
    pub occupant: Occupant,
    pub items: Vec<ItemId>,
    pub(crate) links: [Option<Pos>; 4],
}

impl Cell {
    fn wall(pos: Pos) -> Self {
        Self {
            pos,
            walkable: false,
            name: String::new(),
            discovered: false,
            visited: false,
            exit: false,
            locked: false,
            occupant: Occupant::Empty,
            items: Vec::new(),
            links: [None; 4],
        }
    }

    pub fn is_corridor(&self) -> bool {
        self.walkable && self.name == CORRIDOR
    }

    pub fn is_room(&self) -> bool {
        self.walkable && !self.name.is_empty() && self.name != CORRIDOR
    }

    /// Walkable and not holding a permanent obstacle.
    pub fn is_passable(&self) -> bool {
        self.walkable && !self.occupant.is_obstacle()
    }

    pub fn neighbor(&self, direction: Direction) -> Option<Pos> {
        self.links[direction.index()]
    }

    pub fn links(&self) -> impl Iterator<Item = Pos> + '_ {
        self.links.iter().flatten().copied()
    }
}

#[derive(Clone, Debug)]
pub struct Station {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Pos,
    exit: Pos,
    pub items: SlotMap<ItemId, Item>,
}

impl Station {
    pub(crate) fn blank(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::wall(Pos { y: y as i32, x: x as i32 }));
            }
        }
        Self {
            width,
            height,
            cells,
            start: Pos { y: 0, x: 0 },
            exit: Pos { y: 0, x: 0 },
            items: SlotMap::with_key(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn exit(&self) -> Pos {
        self.exit
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(self.index(pos))
    }

    pub fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.cells.get_mut(idx)
    }

    /// Row-major traversal of every cell.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|cell| cell.walkable)
    }

    pub fn name_at(&self, pos: Pos) -> Option<&str> {
        self.cell(pos).filter(|cell| cell.walkable).map(|cell| cell.name.as_str())
    }

    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        self.cell(pos).into_iter().flat_map(|cell| cell.links())
    }

    pub fn room_names(&self) -> BTreeSet<String> {
        self.cells.iter().filter(|cell| cell.is_room()).map(|cell| cell.name.clone()).collect()
    }

    pub fn cells_named(&self, name: &str) -> Vec<Pos> {
        self.cells
            .iter()
            .filter(|cell| cell.walkable && cell.name == name)
            .map(|cell| cell.pos)
            .collect()
    }

    /// Cells holding permanent obstacles.
    pub fn obstacles(&self) -> BTreeSet<Pos> {
        self.cells.iter().filter(|cell| cell.occupant.is_obstacle()).map(|cell| cell.pos).collect()
    }

    pub fn doors(&self) -> impl Iterator<Item = (Pos, &Door)> {
        self.cells.iter().filter_map(|cell| cell.occupant.as_door().map(|door| (cell.pos, door)))
    }

    pub fn generators(&self) -> impl Iterator<Item = (Pos, &Generator)> {
        self.cells
            .iter()
            .filter_map(|cell| cell.occupant.as_generator().map(|generator| (cell.pos, generator)))
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        validate::validate(self)
    }

    pub(crate) fn carve(&mut self, pos: Pos, name: &str) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.walkable = true;
            cell.name = name.to_string();
        }
    }

    pub(crate) fn wire_neighbors(&mut self) {
        for idx in 0..self.cells.len() {
            let pos = self.cells[idx].pos;
            let walkable = self.cells[idx].walkable;
            let mut links = [None; 4];
            if walkable {
                for direction in Direction::ALL {
                    let adjacent = pos.step(direction);
                    if self.is_walkable(adjacent) {
                        links[direction.index()] = Some(adjacent);
                    }
                }
            }
            self.cells[idx].links = links;
        }
    }

    pub(crate) fn set_start(&mut self, pos: Pos) {
        self.start = pos;
    }

    pub(crate) fn set_exit(&mut self, pos: Pos) {
        let previous = self.exit;
        if let Some(cell) = self.cell_mut(previous) {
            cell.exit = false;
        }
        self.exit = pos;
        if let Some(cell) = self.cell_mut(pos) {
            cell.exit = true;
        }
    }

    pub(crate) fn place_occupant(&mut self, pos: Pos, occupant: Occupant) {
        if let Some(cell) = self.cell_mut(pos) {
            if let Occupant::Door(door) = &occupant {
                cell.locked = door.locked;
            }
            cell.occupant = occupant;
        }
    }

    pub(crate) fn drop_item(&mut self, pos: Pos, item: Item) -> Option<ItemId> {
        if !self.is_walkable(pos) {
            return None;
        }
        let id = self.items.insert(item);
        let idx = self.index(pos);
        self.cells[idx].items.push(id);
        Some(id)
    }

    /// Positions of every floor item carrying `name`.
    pub fn items_named(&self, name: &str) -> Vec<Pos> {
        self.cells
            .iter()
            .filter(|cell| {
                cell.items
                    .iter()
                    .any(|id| self.items.get(*id).is_some_and(|item| item.name == name))
            })
            .map(|cell| cell.pos)
            .collect()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for cell in &self.cells {
            bytes.push(u8::from(cell.walkable));
            bytes.push(u8::from(cell.locked) | (u8::from(cell.exit) << 1));
            bytes.push(cell.occupant.code());
            bytes.extend((cell.name.len() as u16).to_le_bytes());
            bytes.extend(cell.name.as_bytes());
            bytes.push(cell.items.len() as u8);
            for id in &cell.items {
                if let Some(item) = self.items.get(*id) {
                    bytes.extend(item.name.as_bytes());
                    bytes.push(0);
                }
            }
        }
        bytes.extend(self.start.y.to_le_bytes());
        bytes.extend(self.start.x.to_le_bytes());
        bytes.extend(self.exit.y.to_le_bytes());
        bytes.extend(self.exit.x.to_le_bytes());
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
