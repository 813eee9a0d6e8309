//! Cleanup system: removes dead units and reports the kills.

use hecs::{Entity, World};

use skirmish_core::components::{Owner, UnitTag, Vitals};
use skirmish_core::enums::UnitTypeId;
use skirmish_core::events::SkirmishEvent;

/// Despawn every unit whose health reached zero.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<SkirmishEvent>) {
    despawn_buffer.clear();

    let mut killed = Vec::new();
    for (entity, (tag, unit_type, owner, vitals)) in
        world.query_mut::<(&UnitTag, &UnitTypeId, &Owner, &Vitals)>()
    {
        if vitals.health <= 0.0 {
            despawn_buffer.push(entity);
            killed.push((tag.0, *unit_type, owner.0));
        }
    }
    killed.sort_by_key(|(tag, _, _)| *tag);
    events.extend(
        killed
            .into_iter()
            .map(|(tag, unit_type, side)| SkirmishEvent::UnitKilled { tag, unit_type, side }),
    );

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
