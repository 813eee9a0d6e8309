//! Static per-type unit data: weapons, movement, size and combat weight.
//!
//! Values are rounded "faster" game-speed figures. Combat weights are
//! hand-tuned, not learned, and drive every power comparison.

use bitflags::bitflags;

use crate::constants::UNKNOWN_UNIT_WEIGHT;
use crate::enums::UnitTypeId;

bitflags! {
    /// Unit attributes used by damage bonuses and target scoring.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attributes: u16 {
        const ARMORED = 1 << 0;
        const LIGHT = 1 << 1;
        const BIOLOGICAL = 1 << 2;
        const MECHANICAL = 1 << 3;
        const MASSIVE = 1 << 4;
        const PSIONIC = 1 << 5;
        const STRUCTURE = 1 << 6;
    }
}

/// Static data for one unit type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitStats {
    /// Weapon range against ground targets, 0 when it cannot hit ground.
    pub ground_range: f32,
    /// Weapon range against air targets, 0 when it cannot hit air.
    pub air_range: f32,
    pub ground_dps: f32,
    pub air_dps: f32,
    /// Seconds between weapon shots.
    pub weapon_period: f32,
    /// Movement speed (distance units per second).
    pub speed: f32,
    pub radius: f32,
    pub max_health: f32,
    pub max_shield: f32,
    pub max_energy: f32,
    pub attributes: Attributes,
    pub is_flying: bool,
    /// Hand-tuned combat value used by the power model.
    pub weight: f32,
}

impl UnitStats {
    fn base(
        max_health: f32,
        max_shield: f32,
        speed: f32,
        radius: f32,
        attributes: Attributes,
        weight: f32,
    ) -> Self {
        Self {
            ground_range: 0.0,
            air_range: 0.0,
            ground_dps: 0.0,
            air_dps: 0.0,
            weapon_period: 1.0,
            speed,
            radius,
            max_health,
            max_shield,
            max_energy: 0.0,
            attributes,
            is_flying: false,
            weight,
        }
    }

    fn ground(mut self, range: f32, dps: f32, period: f32) -> Self {
        self.ground_range = range;
        self.ground_dps = dps;
        self.weapon_period = period;
        self
    }

    fn air(mut self, range: f32, dps: f32) -> Self {
        self.air_range = range;
        self.air_dps = dps;
        self
    }

    fn air_only(mut self, range: f32, dps: f32, period: f32) -> Self {
        self.air_range = range;
        self.air_dps = dps;
        self.weapon_period = period;
        self
    }

    fn flying(mut self) -> Self {
        self.is_flying = true;
        self
    }

    fn energy(mut self, max_energy: f32) -> Self {
        self.max_energy = max_energy;
        self
    }

    pub fn can_attack_ground(&self) -> bool {
        self.ground_range > 0.0
    }

    pub fn can_attack_air(&self) -> bool {
        self.air_range > 0.0
    }

    pub fn can_attack(&self) -> bool {
        self.can_attack_ground() || self.can_attack_air()
    }

    /// Melee units have a ground weapon with (almost) no reach.
    pub fn is_melee(&self) -> bool {
        self.ground_range > 0.0 && self.ground_range <= 1.0
    }

    pub fn is_structure(&self) -> bool {
        self.attributes.contains(Attributes::STRUCTURE)
    }
}

/// Look up the static data for a unit type.
pub fn stats(unit_type: UnitTypeId) -> UnitStats {
    use Attributes as A;
    use UnitTypeId as T;

    let armored = A::ARMORED;
    let light = A::LIGHT;
    let bio = A::BIOLOGICAL;
    let mech = A::MECHANICAL;
    let massive = A::MASSIVE;
    let psi = A::PSIONIC;
    let building = A::STRUCTURE;

    match unit_type {
        // --- Terran ---
        T::Scv => UnitStats::base(45.0, 0.0, 3.94, 0.375, light | bio | mech, 0.2)
            .ground(0.1, 4.67, 1.07),
        T::Marine => UnitStats::base(45.0, 0.0, 3.15, 0.375, light | bio, 1.0)
            .ground(5.0, 9.8, 0.61)
            .air(5.0, 9.8),
        T::Marauder => UnitStats::base(125.0, 0.0, 3.15, 0.5625, armored | bio, 2.0)
            .ground(6.0, 9.3, 1.07),
        T::Reaper => UnitStats::base(60.0, 0.0, 5.25, 0.375, light | bio, 1.0)
            .ground(5.0, 10.1, 0.79),
        T::Ghost => UnitStats::base(100.0, 0.0, 3.94, 0.375, bio | psi, 2.0)
            .ground(6.0, 9.3, 1.07)
            .air(6.0, 9.3)
            .energy(200.0),
        T::Hellion => UnitStats::base(90.0, 0.0, 5.95, 0.625, light | mech, 1.5)
            .ground(5.0, 4.48, 1.79),
        T::Hellbat => UnitStats::base(135.0, 0.0, 3.15, 0.625, light | bio | mech, 2.0)
            .ground(2.0, 12.6, 1.43),
        T::SiegeTank => UnitStats::base(175.0, 0.0, 3.15, 0.875, armored | mech, 3.5)
            .ground(7.0, 20.27, 0.74),
        T::SiegeTankSieged => UnitStats::base(175.0, 0.0, 0.0, 0.875, armored | mech, 4.5)
            .ground(13.0, 18.69, 2.14),
        T::Cyclone => UnitStats::base(120.0, 0.0, 4.13, 0.75, armored | mech, 3.0)
            .ground(5.0, 25.2, 0.71)
            .air(5.0, 25.2),
        T::WidowMine => UnitStats::base(90.0, 0.0, 3.94, 0.5, light | mech, 0.5),
        T::WidowMineBurrowed => UnitStats::base(90.0, 0.0, 0.0, 0.5, light | mech, 2.0)
            .ground(5.0, 4.3, 29.0)
            .air(5.0, 4.3),
        T::Thor => UnitStats::base(400.0, 0.0, 2.62, 1.25, armored | mech | massive, 6.0)
            .ground(7.0, 65.9, 0.91)
            .air(10.0, 11.2),
        T::VikingFighter => UnitStats::base(135.0, 0.0, 3.85, 0.75, armored | mech, 2.5)
            .air_only(9.0, 14.0, 1.43)
            .flying(),
        T::VikingAssault => UnitStats::base(135.0, 0.0, 3.15, 0.75, armored | mech, 2.0)
            .ground(6.0, 16.8, 0.71),
        T::Medivac => UnitStats::base(150.0, 0.0, 3.5, 0.75, armored | mech, 1.0)
            .flying()
            .energy(200.0),
        T::Liberator => UnitStats::base(180.0, 0.0, 4.72, 0.75, armored | mech, 2.5)
            .air_only(5.0, 7.8, 1.29)
            .flying(),
        T::LiberatorAg => UnitStats::base(180.0, 0.0, 0.0, 0.75, armored | mech, 3.5)
            .ground(10.0, 65.8, 1.14)
            .flying(),
        T::Raven => UnitStats::base(140.0, 0.0, 3.85, 0.625, light | mech, 2.0)
            .flying()
            .energy(200.0),
        T::AutoTurret => UnitStats::base(150.0, 0.0, 0.0, 0.75, armored | mech | building, 1.5)
            .ground(6.0, 31.58, 0.57)
            .air(6.0, 31.58),
        T::Banshee => UnitStats::base(140.0, 0.0, 3.85, 0.75, light | mech, 3.0)
            .ground(6.0, 27.0, 0.89)
            .flying()
            .energy(200.0),
        T::Battlecruiser => UnitStats::base(550.0, 0.0, 2.62, 1.25, armored | mech | massive, 8.0)
            .ground(6.0, 50.0, 0.16)
            .air(6.0, 31.2)
            .flying(),
        T::Bunker => UnitStats::base(400.0, 0.0, 0.0, 1.5, armored | building, 4.0)
            .ground(6.0, 39.2, 0.61)
            .air(6.0, 39.2),
        T::MissileTurret => UnitStats::base(250.0, 0.0, 0.0, 1.0, armored | mech | building, 2.0)
            .air_only(7.0, 39.3, 0.61),
        T::PlanetaryFortress => {
            UnitStats::base(1500.0, 0.0, 0.0, 2.5, armored | mech | building, 8.0)
                .ground(6.0, 28.0, 1.43)
        }

        // --- Protoss ---
        T::Probe => UnitStats::base(20.0, 20.0, 3.94, 0.375, light | mech, 0.2)
            .ground(0.1, 3.7, 1.07),
        T::Zealot => UnitStats::base(100.0, 50.0, 3.15, 0.5, light | bio, 2.0)
            .ground(0.1, 18.6, 0.86),
        T::Stalker => UnitStats::base(80.0, 80.0, 4.13, 0.625, armored | mech, 2.5)
            .ground(6.0, 9.7, 1.34)
            .air(6.0, 9.7),
        T::Sentry => UnitStats::base(40.0, 40.0, 3.15, 0.5, light | mech | psi, 1.5)
            .ground(5.0, 8.4, 0.71)
            .air(5.0, 8.4)
            .energy(200.0),
        T::Adept => UnitStats::base(70.0, 70.0, 3.5, 0.5, light | bio, 2.0)
            .ground(4.0, 6.2, 1.61),
        T::AdeptPhaseShift => UnitStats::base(10.0, 0.0, 5.0, 0.5, light, 0.05),
        T::HighTemplar => UnitStats::base(40.0, 40.0, 2.62, 0.375, light | bio | psi, 2.5)
            .energy(200.0),
        T::DarkTemplar => UnitStats::base(40.0, 80.0, 3.94, 0.375, light | bio | psi, 3.0)
            .ground(0.1, 37.2, 1.21),
        T::Archon => UnitStats::base(10.0, 350.0, 3.94, 1.0, psi | massive, 5.0)
            .ground(3.0, 20.0, 1.25)
            .air(3.0, 20.0),
        T::Immortal => UnitStats::base(200.0, 100.0, 3.15, 0.75, armored | mech, 4.0)
            .ground(6.0, 19.2, 1.04),
        T::Colossus => UnitStats::base(200.0, 150.0, 3.15, 1.0, armored | mech | massive, 6.0)
            .ground(7.0, 18.7, 1.07),
        T::Disruptor => UnitStats::base(100.0, 100.0, 3.15, 0.5, armored | mech, 4.0),
        T::DisruptorPhased => UnitStats::base(1.0, 0.0, 5.95, 0.5, light, 0.05),
        T::Observer => UnitStats::base(40.0, 30.0, 2.63, 0.5, light | mech, 0.1).flying(),
        T::WarpPrism => UnitStats::base(80.0, 100.0, 4.13, 0.875, armored | mech | psi, 0.5)
            .flying(),
        T::Phoenix => UnitStats::base(120.0, 60.0, 5.95, 0.75, light | mech, 2.5)
            .air_only(5.0, 12.7, 0.79)
            .flying()
            .energy(200.0),
        T::VoidRay => UnitStats::base(150.0, 100.0, 3.85, 1.0, armored | mech, 3.5)
            .ground(6.0, 16.8, 0.36)
            .air(6.0, 16.8)
            .flying(),
        T::Oracle => UnitStats::base(100.0, 60.0, 5.6, 0.75, armored | mech | psi, 2.5)
            .ground(4.0, 24.4, 0.61)
            .flying()
            .energy(200.0),
        T::Tempest => UnitStats::base(200.0, 150.0, 3.15, 1.25, armored | mech | massive, 4.0)
            .ground(10.0, 13.8, 2.36)
            .air(14.0, 12.7)
            .flying(),
        T::Carrier => UnitStats::base(300.0, 150.0, 2.62, 1.25, armored | mech | massive, 7.0)
            .ground(8.0, 37.4, 2.14)
            .air(8.0, 37.4)
            .flying(),
        T::Mothership => {
            UnitStats::base(350.0, 350.0, 2.62, 1.375, armored | mech | psi | massive, 8.0)
                .ground(7.0, 22.8, 1.58)
                .air(7.0, 22.8)
                .flying()
                .energy(200.0)
        }
        T::PhotonCannon => UnitStats::base(150.0, 150.0, 0.0, 1.0, armored | building, 3.0)
            .ground(7.0, 22.4, 0.89)
            .air(7.0, 22.4),

        // --- Zerg ---
        T::Drone => UnitStats::base(40.0, 0.0, 3.94, 0.375, light | bio, 0.2)
            .ground(0.1, 4.67, 1.07),
        T::Queen => UnitStats::base(175.0, 0.0, 1.31, 0.875, bio | psi, 2.0)
            .ground(5.0, 11.2, 0.71)
            .air(7.0, 12.6)
            .energy(200.0),
        T::Zergling => UnitStats::base(35.0, 0.0, 4.13, 0.375, light | bio, 0.5)
            .ground(0.1, 10.0, 0.497),
        T::Baneling => UnitStats::base(30.0, 0.0, 3.5, 0.375, bio, 1.0)
            .ground(0.25, 16.0, 0.83),
        T::Roach => UnitStats::base(145.0, 0.0, 3.15, 0.625, armored | bio, 2.0)
            .ground(4.0, 11.2, 1.43),
        T::RoachBurrowed => UnitStats::base(145.0, 0.0, 2.0, 0.625, armored | bio, 1.0),
        T::Ravager => UnitStats::base(120.0, 0.0, 3.85, 0.75, bio, 3.0)
            .ground(6.0, 14.04, 1.14),
        T::Hydralisk => UnitStats::base(90.0, 0.0, 3.15, 0.625, light | bio, 2.0)
            .ground(5.0, 22.4, 0.59)
            .air(5.0, 22.4),
        T::Lurker => UnitStats::base(200.0, 0.0, 4.13, 0.9375, armored | bio, 2.0),
        T::LurkerBurrowed => UnitStats::base(200.0, 0.0, 0.0, 0.9375, armored | bio, 4.0)
            .ground(8.0, 14.0, 1.43),
        T::Infestor => UnitStats::base(90.0, 0.0, 3.15, 0.75, armored | bio | psi, 2.5)
            .energy(200.0),
        T::SwarmHost => UnitStats::base(160.0, 0.0, 3.15, 0.9375, armored | bio, 2.0),
        T::Locust => UnitStats::base(50.0, 0.0, 2.62, 0.375, light | bio, 0.6)
            .ground(3.0, 18.7, 0.61),
        T::Ultralisk => UnitStats::base(500.0, 0.0, 4.13, 1.0, armored | bio | massive, 6.0)
            .ground(0.1, 57.4, 0.61),
        T::Mutalisk => UnitStats::base(120.0, 0.0, 5.6, 0.5, light | bio, 2.0)
            .ground(3.0, 8.6, 1.09)
            .air(3.0, 8.6)
            .flying(),
        T::Corruptor => UnitStats::base(200.0, 0.0, 4.73, 0.625, armored | bio, 2.0)
            .air_only(6.0, 10.3, 0.97)
            .flying(),
        T::BroodLord => UnitStats::base(225.0, 0.0, 1.97, 1.0, armored | bio | massive, 5.0)
            .ground(10.0, 22.4, 1.34)
            .flying(),
        T::Viper => UnitStats::base(150.0, 0.0, 4.13, 0.625, armored | bio | psi, 3.0)
            .flying()
            .energy(200.0),
        T::Overseer => UnitStats::base(200.0, 0.0, 2.62, 0.75, armored | bio, 0.1)
            .flying()
            .energy(200.0),
        T::Overlord => UnitStats::base(200.0, 0.0, 0.902, 1.0, armored | bio, 0.1).flying(),
        T::SpineCrawler => UnitStats::base(300.0, 0.0, 0.0, 1.0, armored | bio | building, 3.0)
            .ground(7.0, 18.9, 1.32),
        T::SporeCrawler => UnitStats::base(400.0, 0.0, 0.0, 1.0, armored | bio | building, 2.0)
            .air_only(7.0, 24.3, 0.61),

        T::Other(_) => UnitStats::base(50.0, 0.0, 2.0, 0.5, Attributes::empty(), UNKNOWN_UNIT_WEIGHT),
    }
}
