//! Enumeration types used throughout the engine.

use serde::{Deserialize, Serialize};

/// Which side of the match a unit belongs to, relative to the bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Own,
    Enemy,
    Neutral,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Own => Side::Enemy,
            Side::Enemy => Side::Own,
            Side::Neutral => Side::Neutral,
        }
    }
}

/// Group-level engagement posture. Closed set: no other values are legal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    #[default]
    Attack,
    /// Attack while spreading out to hunt down remaining enemies.
    SearchAndDestroy,
    /// Relentless advance: units never kite.
    Push,
    /// Fall back, firing at enemies already in range when it is safe to do so.
    DefensiveRetreat,
    /// Fall back without firing.
    PanicRetreat,
    /// Raid economy, prefer workers.
    Harass,
    /// Gather on a point before committing.
    ReGroup,
}

impl Intent {
    pub fn is_retreat(self) -> bool {
        matches!(self, Intent::DefensiveRetreat | Intent::PanicRetreat)
    }

    /// Postures that advance on the target with attack-moves.
    pub fn is_attack_class(self) -> bool {
        matches!(
            self,
            Intent::Attack | Intent::SearchAndDestroy | Intent::Push | Intent::Harass
        )
    }
}

/// Unit type identifiers for all three races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitTypeId {
    // --- Terran ---
    Scv,
    Marine,
    Marauder,
    Reaper,
    Ghost,
    Hellion,
    Hellbat,
    SiegeTank,
    SiegeTankSieged,
    Cyclone,
    WidowMine,
    WidowMineBurrowed,
    Thor,
    VikingFighter,
    VikingAssault,
    Medivac,
    Liberator,
    LiberatorAg,
    Raven,
    AutoTurret,
    Banshee,
    Battlecruiser,
    Bunker,
    MissileTurret,
    PlanetaryFortress,
    // --- Protoss ---
    Probe,
    Zealot,
    Stalker,
    Sentry,
    Adept,
    AdeptPhaseShift,
    HighTemplar,
    DarkTemplar,
    Archon,
    Immortal,
    Colossus,
    Disruptor,
    DisruptorPhased,
    Observer,
    WarpPrism,
    Phoenix,
    VoidRay,
    Oracle,
    Tempest,
    Carrier,
    Mothership,
    PhotonCannon,
    // --- Zerg ---
    Drone,
    Queen,
    Zergling,
    Baneling,
    Roach,
    RoachBurrowed,
    Ravager,
    Hydralisk,
    Lurker,
    LurkerBurrowed,
    Infestor,
    SwarmHost,
    Locust,
    Ultralisk,
    Mutalisk,
    Corruptor,
    BroodLord,
    Viper,
    Overseer,
    Overlord,
    SpineCrawler,
    SporeCrawler,
    /// A type with no entry in the data tables.
    Other(u32),
}

impl UnitTypeId {
    pub fn is_worker(self) -> bool {
        matches!(self, UnitTypeId::Scv | UnitTypeId::Probe | UnitTypeId::Drone)
    }

    /// Units whose threat is large enough to justify single-target spells.
    pub fn is_high_value(self) -> bool {
        matches!(
            self,
            UnitTypeId::SiegeTankSieged
                | UnitTypeId::Thor
                | UnitTypeId::Battlecruiser
                | UnitTypeId::Colossus
                | UnitTypeId::Tempest
                | UnitTypeId::Carrier
                | UnitTypeId::Mothership
                | UnitTypeId::BroodLord
                | UnitTypeId::Ultralisk
                | UnitTypeId::LiberatorAg
                | UnitTypeId::Disruptor
        )
    }

    /// Spellcasters worth disabling or draining.
    pub fn is_caster(self) -> bool {
        matches!(
            self,
            UnitTypeId::HighTemplar
                | UnitTypeId::Sentry
                | UnitTypeId::Oracle
                | UnitTypeId::Ghost
                | UnitTypeId::Raven
                | UnitTypeId::Medivac
                | UnitTypeId::Infestor
                | UnitTypeId::Viper
                | UnitTypeId::Queen
        )
    }
}

/// Abilities the combat engine may order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbilityId {
    Attack,
    Move,
    HoldPosition,
    Stop,
    // --- Terran ---
    StimMarine,
    StimMarauder,
    SiegeMode,
    Unsiege,
    BurrowWidowMine,
    UnburrowWidowMine,
    LiberatorAgMode,
    LiberatorAaMode,
    MedivacAfterburners,
    VikingAssaultMode,
    VikingFighterMode,
    LockOn,
    InterferenceMatrix,
    BuildAutoTurret,
    YamatoCannon,
    TacticalJump,
    // --- Protoss ---
    Blink,
    AdeptPhaseShift,
    GuardianShield,
    PsiStorm,
    Feedback,
    PurificationNova,
    PrismaticAlignment,
    GravitonBeam,
    PulsarBeamOn,
    PulsarBeamOff,
    // --- Zerg ---
    BurrowDown,
    BurrowUp,
    CorrosiveBile,
    BurrowLurker,
    UnburrowLurker,
    FungalGrowth,
    ParasiticBomb,
    Abduct,
    BlindingCloud,
    Transfuse,
    SpawnLocusts,
}

impl AbilityId {
    /// Default cooldown in game seconds.
    pub fn cooldown_secs(self) -> f32 {
        match self {
            AbilityId::Attack
            | AbilityId::Move
            | AbilityId::HoldPosition
            | AbilityId::Stop
            | AbilityId::PulsarBeamOff => 0.0,
            AbilityId::StimMarine | AbilityId::StimMarauder => 1.0,
            AbilityId::SiegeMode | AbilityId::Unsiege => 2.7,
            AbilityId::BurrowWidowMine | AbilityId::UnburrowWidowMine => 1.0,
            AbilityId::LiberatorAgMode | AbilityId::LiberatorAaMode => 2.0,
            AbilityId::MedivacAfterburners => 14.0,
            AbilityId::VikingAssaultMode | AbilityId::VikingFighterMode => 2.0,
            AbilityId::LockOn => 4.0,
            AbilityId::InterferenceMatrix => 1.0,
            AbilityId::BuildAutoTurret => 1.0,
            AbilityId::YamatoCannon => 71.0,
            AbilityId::TacticalJump => 71.0,
            AbilityId::Blink => 7.0,
            AbilityId::AdeptPhaseShift => 11.0,
            AbilityId::GuardianShield => 1.0,
            AbilityId::PsiStorm => 1.43,
            AbilityId::Feedback => 1.0,
            AbilityId::PurificationNova => 21.4,
            AbilityId::PrismaticAlignment => 43.0,
            AbilityId::GravitonBeam => 1.0,
            AbilityId::PulsarBeamOn => 1.0,
            AbilityId::BurrowDown | AbilityId::BurrowUp => 1.0,
            AbilityId::CorrosiveBile => 7.0,
            AbilityId::BurrowLurker | AbilityId::UnburrowLurker => 1.0,
            AbilityId::FungalGrowth => 1.0,
            AbilityId::ParasiticBomb => 1.0,
            AbilityId::Abduct => 1.0,
            AbilityId::BlindingCloud => 1.0,
            AbilityId::Transfuse => 1.0,
            AbilityId::SpawnLocusts => 43.0,
        }
    }

    /// Energy cost; zero for cooldown-only abilities.
    pub fn energy_cost(self) -> f32 {
        match self {
            AbilityId::InterferenceMatrix => 50.0,
            AbilityId::BuildAutoTurret => 50.0,
            AbilityId::GuardianShield => 75.0,
            AbilityId::PsiStorm => 75.0,
            AbilityId::Feedback => 50.0,
            AbilityId::GravitonBeam => 50.0,
            AbilityId::PulsarBeamOn => 25.0,
            AbilityId::FungalGrowth => 75.0,
            AbilityId::ParasiticBomb => 125.0,
            AbilityId::Abduct => 75.0,
            AbilityId::BlindingCloud => 100.0,
            AbilityId::Transfuse => 50.0,
            _ => 0.0,
        }
    }

    /// Cast range for targeted abilities, zero for self-cast.
    pub fn cast_range(self) -> f32 {
        match self {
            AbilityId::LiberatorAgMode => 5.0,
            AbilityId::LockOn => 7.0,
            AbilityId::InterferenceMatrix => 9.0,
            AbilityId::BuildAutoTurret => 2.0,
            AbilityId::YamatoCannon => 10.0,
            AbilityId::Blink => 8.0,
            AbilityId::PsiStorm => 9.0,
            AbilityId::Feedback => 10.0,
            AbilityId::PurificationNova => 13.0,
            AbilityId::GravitonBeam => 4.0,
            AbilityId::CorrosiveBile => 9.0,
            AbilityId::FungalGrowth => 10.0,
            AbilityId::ParasiticBomb => 8.0,
            AbilityId::Abduct => 9.0,
            AbilityId::BlindingCloud => 11.0,
            AbilityId::Transfuse => 7.0,
            _ => 0.0,
        }
    }
}

/// Harness scenario selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Marines, marauders and medivacs against zerglings, banelings and roaches.
    #[default]
    BioVsLingBane,
    /// Siege tanks and bio holding against a roach-ravager push.
    TankLine,
    /// Stalker-sentry-templar against hydralisk-lurker-infestor.
    GatewayVsHydra,
    /// Vikings, liberators and a battlecruiser against void rays, phoenixes and tempests.
    AirBattle,
}
