//! Archetype policies, one module per race.

pub mod protoss;
pub mod terran;
pub mod zerg;

use skirmish_core::unit::CombatUnit;

/// Best unit by `score`, lowest tag on ties. Zero or negative scores lose.
pub(crate) fn pick_best<'e>(
    units: impl IntoIterator<Item = &'e CombatUnit>,
    score: impl Fn(&CombatUnit) -> f32,
) -> Option<&'e CombatUnit> {
    let mut best: Option<(&'e CombatUnit, f32)> = None;
    for unit in units {
        let s = score(unit);
        if s <= 0.0 {
            continue;
        }
        let better = match best {
            None => true,
            Some((current, bs)) => s > bs || (s == bs && unit.tag < current.tag),
        };
        if better {
            best = Some((unit, s));
        }
    }
    best.map(|(unit, _)| unit)
}

/// Whether `target` is within `cast_range` of `caster`, edge to edge.
pub(crate) fn in_cast_range(caster: &CombatUnit, target: &CombatUnit, cast_range: f32) -> bool {
    caster.distance_to(target) <= cast_range + caster.radius + target.radius
}
