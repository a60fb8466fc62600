use serde::{Deserialize, Serialize};
use crate::error::StatsError;

/// An area unit: `factor` converts square metres into this unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAreaUnit")]
pub struct AreaUnit {
    pub name: String,
    pub symbol: String,
    factor: f64,
}

#[derive(Deserialize)]
struct RawAreaUnit {
    name: String,
    symbol: String,
    factor: f64,
}

impl TryFrom<RawAreaUnit> for AreaUnit {
    type Error = StatsError;

    fn try_from(raw: RawAreaUnit) -> Result<Self, Self::Error> {
        AreaUnit::new(raw.name, raw.symbol, raw.factor)
    }
}

impl AreaUnit {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, factor: f64) -> Result<Self, StatsError> {
        if !(factor > 0.0) || !factor.is_finite() {
            return Err(StatsError::InvalidFactor(factor));
        }
        Ok(Self { name: name.into(), symbol: symbol.into(), factor })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn hectares() -> Self {
        Self { name: "Hectares".into(), symbol: "ha".into(), factor: 0.0001 }
    }

    pub fn square_kilometers() -> Self {
        Self { name: "Square Kilometers".into(), symbol: "km\u{00B2}".into(), factor: 0.000001 }
    }

    pub fn square_meters() -> Self {
        Self { name: "Square Meters".into(), symbol: "m\u{00B2}".into(), factor: 1.0 }
    }

    /// Units offered by default, first one selected.
    pub fn defaults() -> Vec<AreaUnit> {
        vec![Self::hectares(), Self::square_kilometers(), Self::square_meters()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_factor_is_rejected() {
        assert_eq!(AreaUnit::new("x", "x", 0.0), Err(StatsError::InvalidFactor(0.0)));
        assert!(AreaUnit::new("x", "x", -1.0).is_err());
        assert!(AreaUnit::new("x", "x", f64::NAN).is_err());
        assert!(AreaUnit::new("x", "x", f64::INFINITY).is_err());
    }

    #[test]
    fn deserialization_validates_factor() {
        let ok: AreaUnit = serde_json::from_str(r#"{"name":"Acres","symbol":"ac","factor":0.000247105}"#).unwrap();
        assert_eq!(ok.symbol, "ac");
        let bad = serde_json::from_str::<AreaUnit>(r#"{"name":"Bad","symbol":"b","factor":0}"#);
        assert!(bad.is_err());
    }
}
