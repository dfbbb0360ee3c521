// src/model/observation.rs

use crate::error::EnvError;
use serde::Serialize;

/// Maximum shelf life in days; one inventory bucket per age.
pub const SHELF_LIFE: usize = 7;
/// Number of in-transit slots.
pub const PIPELINE_LEN: usize = 6;
/// Flattened observation width: inventory, pipeline, forecast.
pub const OBS_LEN: usize = SHELF_LIFE + PIPELINE_LEN + 1;

/// What an agent sees each day.
///
/// The field order is the flattened order: `inventory[0..7]`,
/// `pipeline[0..6]`, `forecast`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Observation {
    pub inventory: [f32; SHELF_LIFE],
    pub pipeline: [f32; PIPELINE_LEN],
    pub forecast: f32,
}

impl Observation {
    /// Builds an observation from externally supplied values, as a serving
    /// endpoint would. Negative or non-finite entries are rejected.
    pub fn from_parts(
        inventory: [f32; SHELF_LIFE],
        pipeline: [f32; PIPELINE_LEN],
        forecast: f32,
    ) -> Result<Self, EnvError> {
        let obs = Self {
            inventory,
            pipeline,
            forecast,
        };
        if let Some((idx, v)) = obs
            .to_array()
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(EnvError::InvalidObservation(format!(
                "entry {idx} must be a non-negative number, got {v}"
            )));
        }
        Ok(obs)
    }

    pub fn to_array(&self) -> [f32; OBS_LEN] {
        let mut out = [0.0; OBS_LEN];
        out[..SHELF_LIFE].copy_from_slice(&self.inventory);
        out[SHELF_LIFE..SHELF_LIFE + PIPELINE_LEN].copy_from_slice(&self.pipeline);
        out[OBS_LEN - 1] = self.forecast;
        out
    }

    pub fn on_hand(&self) -> f32 {
        self.inventory.iter().sum()
    }

    pub fn in_transit(&self) -> f32 {
        self.pipeline.iter().sum()
    }
}

impl TryFrom<&[f32]> for Observation {
    type Error = EnvError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        if values.len() != OBS_LEN {
            return Err(EnvError::InvalidObservation(format!(
                "expected {OBS_LEN} values, got {}",
                values.len()
            )));
        }
        let mut inventory = [0.0; SHELF_LIFE];
        let mut pipeline = [0.0; PIPELINE_LEN];
        inventory.copy_from_slice(&values[..SHELF_LIFE]);
        pipeline.copy_from_slice(&values[SHELF_LIFE..SHELF_LIFE + PIPELINE_LEN]);
        Self::from_parts(inventory, pipeline, values[OBS_LEN - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_in_fixed_order() {
        let obs = Observation::from_parts(
            [10.0, 8.0, 6.0, 4.0, 2.0, 1.0, 0.0],
            [5.0, 0.0, 10.0, 0.0, 0.0, 0.0],
            15.5,
        )
        .unwrap();
        let flat = obs.to_array();
        assert_eq!(flat.len(), 14);
        assert_eq!(flat[0], 10.0);
        assert_eq!(flat[6], 0.0);
        assert_eq!(flat[7], 5.0);
        assert_eq!(flat[9], 10.0);
        assert_eq!(flat[13], 15.5);
        assert_eq!(Observation::try_from(&flat[..]).unwrap(), obs);
    }

    #[test]
    fn rejects_wrong_length() {
        let values = [1.0_f32; 13];
        assert!(matches!(
            Observation::try_from(&values[..]),
            Err(EnvError::InvalidObservation(_))
        ));
    }

    #[test]
    fn rejects_negative_and_nan_entries() {
        assert!(Observation::from_parts([0.0; SHELF_LIFE], [0.0; PIPELINE_LEN], -1.0).is_err());
        let mut inventory = [0.0; SHELF_LIFE];
        inventory[3] = f32::NAN;
        assert!(Observation::from_parts(inventory, [0.0; PIPELINE_LEN], 1.0).is_err());
    }
}
