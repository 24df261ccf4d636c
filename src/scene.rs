// Scene controller - icon slots, active explosions and their deferred lifecycle
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::constants::*;
use crate::explosion::{Explosion, ExplosionId};
use crate::icons::IconKind;
use crate::scheduler::DeferredQueue;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneController>()
            .init_resource::<SceneRng>()
            .add_systems(Update, advance_scene_system.in_set(SceneSet::Advance));
    }
}

/// Ordering anchor so view systems can run after deferred actions are applied
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneSet {
    Advance,
}

/// Entropy source for new bursts
#[derive(Resource)]
pub struct SceneRng(pub StdRng);

impl Default for SceneRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IconSlot {
    pub icon: IconKind,
    pub visible: bool,
    pub center: Vec2, // Last known world-space center, zero until first layout
}

/// Work scheduled by a tap, applied later by `SceneController::advance`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneAction {
    Arm(ExplosionId),
    Expire { id: ExplosionId, slot: usize },
}

/// What a deferred action actually did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    Armed(ExplosionId),
    Removed(ExplosionId),
    SlotRestored(usize),
    /// The target explosion was already gone; nothing changed
    Stale(ExplosionId),
}

#[derive(Resource)]
pub struct SceneController {
    slots: Vec<IconSlot>,
    explosions: BTreeMap<ExplosionId, Explosion>, // Ids grow monotonically, so this iterates in creation order
    pending: DeferredQueue<SceneAction>,
    next_id: u64,
}

impl Default for SceneController {
    fn default() -> Self {
        Self::with_icons(&SLOT_ICONS)
    }
}

impl SceneController {
    pub fn with_icons(icons: &[IconKind]) -> Self {
        Self {
            slots: icons
                .iter()
                .map(|&icon| IconSlot {
                    icon,
                    visible: true,
                    center: Vec2::ZERO,
                })
                .collect(),
            explosions: BTreeMap::new(),
            pending: DeferredQueue::default(),
            next_id: 0,
        }
    }

    pub fn slots(&self) -> &[IconSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&IconSlot> {
        self.slots.get(index)
    }

    pub fn explosions(&self) -> impl Iterator<Item = &Explosion> {
        self.explosions.values()
    }

    pub fn explosion(&self, id: ExplosionId) -> Option<&Explosion> {
        self.explosions.get(&id)
    }

    pub fn active_count(&self) -> usize {
        self.explosions.len()
    }

    #[allow(dead_code)]
    pub fn pending_actions(&self) -> usize {
        self.pending.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.next_deadline()
    }

    pub fn record_icon_center(&mut self, slot: usize, center: Vec2) {
        let Some(icon_slot) = self.slots.get_mut(slot) else {
            warn!("Ignoring layout for unknown icon slot {}", slot);
            return;
        };
        icon_slot.center = center;
    }

    /// Hide the slot, spawn a burst at its center and schedule the burst's
    /// arm and expire actions relative to `now`.
    pub fn handle_tap(&mut self, slot: usize, now: Duration, rng: &mut impl Rng) -> Option<ExplosionId> {
        let Some(icon_slot) = self.slots.get_mut(slot) else {
            warn!("Ignoring tap on unknown icon slot {}", slot);
            return None;
        };
        icon_slot.visible = false;
        let (icon, center) = (icon_slot.icon, icon_slot.center);

        let id = ExplosionId(self.next_id);
        self.next_id += 1;
        self.explosions.insert(id, Explosion::new(id, icon, center, rng));

        self.pending.schedule(now, ARM_DELAY, SceneAction::Arm(id));
        self.pending.schedule(now, EXPIRE_DELAY, SceneAction::Expire { id, slot });

        info!(
            "💥 Slot {} ({}) tapped: explosion {:?} at ({:.1}, {:.1}), {} active",
            slot,
            icon.name(),
            id,
            center.x,
            center.y,
            self.explosions.len()
        );
        Some(id)
    }

    /// Apply every deferred action due at `now`
    pub fn advance(&mut self, now: Duration) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        for action in self.pending.drain_due(now) {
            match action {
                SceneAction::Arm(id) => match self.explosions.get_mut(&id) {
                    Some(explosion) => {
                        explosion.start_exploding();
                        events.push(SceneEvent::Armed(id));
                    }
                    None => events.push(SceneEvent::Stale(id)),
                },
                SceneAction::Expire { id, slot } => {
                    if self.explosions.remove(&id).is_some() {
                        events.push(SceneEvent::Removed(id));
                    } else {
                        events.push(SceneEvent::Stale(id));
                    }
                    // Restored even when the explosion was already gone
                    if let Some(icon_slot) = self.slots.get_mut(slot) {
                        icon_slot.visible = true;
                        events.push(SceneEvent::SlotRestored(slot));
                    }
                }
            }
        }
        events
    }

    #[cfg(test)]
    fn remove_explosion(&mut self, id: ExplosionId) -> Option<Explosion> {
        self.explosions.remove(&id)
    }
}

/// Runs due deferred actions against the virtual clock
pub fn advance_scene_system(time: Res<Time>, mut scene: ResMut<SceneController>) {
    let now = time.elapsed();
    // Only touch the resource mutably when something is due, so change detection stays quiet
    match scene.next_deadline() {
        Some(due) if due <= now => {}
        _ => return,
    }
    for event in scene.advance(now) {
        match event {
            SceneEvent::Armed(id) => debug!("Explosion {:?} dispersing", id),
            SceneEvent::Removed(id) => debug!("Explosion {:?} removed", id),
            SceneEvent::SlotRestored(slot) => debug!("Slot {} visible again", slot),
            SceneEvent::Stale(id) => debug!("Explosion {:?} already gone, skipping", id),
        }
    }
}
