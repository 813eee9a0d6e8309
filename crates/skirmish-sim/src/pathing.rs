//! Straight-line path queries over a per-tick threat influence map.
//!
//! Influence at a point is the summed dps of every hostile whose weapon
//! reach covers it, split into ground and air layers.

use skirmish_core::error::CombatError;
use skirmish_core::services::PathService;
use skirmish_core::types::{towards, Point2};
use skirmish_core::unit::CombatUnit;
use skirmish_core::Result;

/// Extra distance added to weapon reach when spreading influence.
const INFLUENCE_BUFFER: f32 = 2.0;

/// Sample directions per ring in `weakest_influence_point`.
const RING_SAMPLES: usize = 12;

#[derive(Debug, Clone, Copy)]
struct ThreatSource {
    position: Point2,
    ground_reach: f32,
    air_reach: f32,
    ground_dps: f32,
    air_dps: f32,
}

#[derive(Debug, Default, Clone)]
pub struct InfluencePaths {
    sources: Vec<ThreatSource>,
}

impl InfluencePaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the hostiles visible this tick.
    pub fn refresh<'a>(&mut self, hostiles: impl IntoIterator<Item = &'a CombatUnit>) {
        self.sources.clear();
        for unit in hostiles {
            let stats = unit.stats();
            if !stats.can_attack() {
                continue;
            }
            let reach = |range: f32| {
                if range > 0.0 {
                    range + unit.radius + INFLUENCE_BUFFER
                } else {
                    0.0
                }
            };
            self.sources.push(ThreatSource {
                position: unit.position,
                ground_reach: reach(stats.ground_range),
                air_reach: reach(stats.air_range),
                ground_dps: stats.ground_dps,
                air_dps: stats.air_dps,
            });
        }
    }

    /// Threat dps at `point` against air or ground units.
    pub fn influence_at(&self, point: Point2, air: bool) -> f32 {
        self.sources
            .iter()
            .map(|s| {
                let (reach, dps) = if air {
                    (s.air_reach, s.air_dps)
                } else {
                    (s.ground_reach, s.ground_dps)
                };
                if reach > 0.0 && s.position.distance(point) <= reach {
                    dps
                } else {
                    0.0
                }
            })
            .sum()
    }
}

fn check_finite(point: Point2) -> Result<()> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(CombatError::PathQuery(format!("non-finite point {point}")))
    }
}

impl PathService for InfluencePaths {
    fn find_path(&self, from: Point2, to: Point2, max_distance: f32) -> Result<Point2> {
        check_finite(from)?;
        check_finite(to)?;
        let distance = from.distance(to).min(max_distance.max(0.0));
        Ok(towards(from, to, distance))
    }

    /// Center and two rings around it; ties keep the earlier sample, so
    /// the center wins when nothing is better.
    fn weakest_influence_point(&self, around: Point2, radius: f32, air: bool) -> Result<Point2> {
        check_finite(around)?;
        let mut best = (around, self.influence_at(around, air));
        for ring in [radius * 0.5, radius] {
            if ring <= 0.0 {
                continue;
            }
            for i in 0..RING_SAMPLES {
                let angle = i as f32 / RING_SAMPLES as f32 * std::f32::consts::TAU;
                let sample = around + Point2::new(angle.cos(), angle.sin()) * ring;
                let influence = self.influence_at(sample, air);
                if influence < best.1 {
                    best = (sample, influence);
                }
            }
        }
        Ok(best.0)
    }
}
