use glam::Vec3;
use log::info;
use winit::keyboard::KeyCode;

use crate::input::{InputState, PushMode};

pub const DEFAULT_SPACE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub icon: Option<String>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Inventory {
    items: Vec<Item>,
    space: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_SPACE)
    }
}

impl Inventory {
    pub fn new(space: usize) -> Self {
        Self {
            items: Vec::new(),
            space,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.space
    }

    pub fn add(&mut self, item: Item) -> bool {
        if self.is_full() {
            info!("inventory full, {} not added", item.name);
            return false;
        }
        info!("{} added to inventory", item.name);
        self.items.push(item);
        true
    }

    /// Entfernt das erste gleiche Item.
    pub fn remove(&mut self, item: &Item) -> bool {
        let Some(idx) = self.items.iter().position(|i| i == item) else {
            return false;
        };
        let removed = self.items.remove(idx);
        info!("{} removed from inventory", removed.name);
        true
    }
}

/// Feste Anzahl Slots, Slot i zeigt Item i oder ist leer.
#[derive(Debug, Clone)]
pub struct InventoryView {
    slots: Vec<Option<Item>>,
}

impl InventoryView {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    pub fn update(&mut self, inventory: &Inventory) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = inventory.items().get(i).cloned();
        }
    }

    pub fn slots(&self) -> &[Option<Item>] {
        &self.slots
    }
}

/// Panel auf/zu per Tastendruck.
#[derive(Debug, Clone, Copy)]
pub struct InventoryToggle {
    key: KeyCode,
    open: bool,
}

impl Default for InventoryToggle {
    fn default() -> Self {
        Self {
            key: KeyCode::KeyE,
            open: false,
        }
    }
}

impl InventoryToggle {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn update(&mut self, input: &InputState) -> bool {
        if input.is_button(self.key, PushMode::Press) {
            self.open = !self.open;
            return true;
        }
        false
    }
}

/// Trigger-Volumen mit Items. Wird verbraucht, wenn das erste Item reinpasst.
#[derive(Debug, Clone)]
pub struct ItemPickup {
    pub center: Vec3,
    pub radius: f32,
    items: Vec<Item>,
    consumed: bool,
    // Körper war im letzten Aufruf schon drin
    inside: bool,
}

impl ItemPickup {
    pub fn new(center: Vec3, radius: f32, items: Vec<Item>) -> Self {
        Self {
            center,
            radius,
            items,
            consumed: false,
            inside: false,
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Nur beim Betreten (draußen → drinnen) werden alle Items angeboten;
    /// ob der Pickup verschwindet, entscheidet das erste.
    pub fn try_collect(&mut self, body: Vec3, inventory: &mut Inventory) -> bool {
        let inside = body.distance(self.center) <= self.radius;
        let entered = inside && !self.inside;
        self.inside = inside;

        if self.consumed || !entered {
            return false;
        }

        let mut first = None;
        for item in &self.items {
            let added = inventory.add(item.clone());
            first.get_or_insert(added);
        }
        let first_added = first.unwrap_or(false);

        self.consumed = first_added;
        first_added
    }
}
