use crate::model::{ProductSpec, ResourceLimit};

/// Everything needed to plan production and draw its feasible region.
///
/// The default is the SweetBite bakery: chocolate and cheese cakes sharing
/// flour and labor hours.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub products: Vec<ProductSpec>,
    pub resources: Vec<ResourceLimit>,
    /// Largest first-product quantity shown on the chart
    pub horizon: f64,
    /// Points sampled along the horizon
    pub samples: usize,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            products: vec![
                ProductSpec::new("Kue Cokelat", 6000.0, vec![200.0, 2.0]),
                ProductSpec::new("Kue Keju", 8000.0, vec![300.0, 1.0]),
            ],
            resources: vec![
                ResourceLimit::new("Tepung (gr)", 6000.0),
                ResourceLimit::new("Jam Kerja", 40.0),
            ],
            horizon: 50.0,
            samples: 400,
        }
    }
}

impl Scenario {
    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }
}
