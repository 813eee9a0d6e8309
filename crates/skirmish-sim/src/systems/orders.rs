//! Order system: applies the commands each side emitted this step.

use std::collections::HashMap;

use hecs::{Entity, World};

use skirmish_core::action::Target;
use skirmish_core::commands::UnitCommand;
use skirmish_core::components::Orders;
use skirmish_core::enums::AbilityId;

use super::abilities::{self, CastContext};

/// Apply `commands` in order. Returns how many took effect.
pub fn apply(world: &mut World, commands: &[UnitCommand], ctx: &mut CastContext<'_>) -> usize {
    let mut applied = 0;
    for command in commands {
        let ok = match command.ability {
            AbilityId::Attack | AbilityId::Move => {
                set_order(world, ctx.index, command.tag, Some((command.ability, command.target)))
            }
            AbilityId::HoldPosition | AbilityId::Stop => set_order(world, ctx.index, command.tag, None),
            ability => abilities::cast(world, ctx, command.tag, ability, command.target),
        };
        if ok {
            applied += 1;
        }
    }
    applied
}

fn set_order(
    world: &World,
    index: &HashMap<u64, Entity>,
    tag: u64,
    order: Option<(AbilityId, Target)>,
) -> bool {
    let Some(&entity) = index.get(&tag) else {
        return false;
    };
    match world.get::<&mut Orders>(entity) {
        Ok(mut orders) => {
            orders.current = order;
            true
        }
        Err(_) => false,
    }
}
