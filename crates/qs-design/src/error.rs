use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesignError {
    #[error("site parameter out of range: {name} = {value}")]
    InvalidSite { name: &'static str, value: f64 },

    #[error("turbine parameter out of range: {name} = {value}")]
    InvalidTurbine { name: &'static str, value: f64 },

    #[error(
        "pile diameter residual does not change sign over [{lo} m, {hi} m]; \
         the load case is outside the sizing model's range"
    )]
    NoBracket { lo: f64, hi: f64 },
}

pub type DesignResult<T> = Result<T, DesignError>;
