use thiserror::Error;

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("Unit not found: {0}")]
    UnitNotFound(u64),

    #[error("Ability query failed: {0}")]
    AbilityQuery(String),

    #[error("Path query failed: {0}")]
    PathQuery(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CombatError>;
