mod model;
mod plan;
mod region;
mod report;
mod scenario;

pub use model::{ModelError, ProductSpec, ResourceLimit, build};
pub use plan::{Plan, PlanError, plan, plan_with};
pub use region::{BoundaryLine, FeasibleRegionSample, MAX_SAMPLES, Projector, RegionError};
pub use report::{Report, ReportError, ReportLine, aggregate};
pub use scenario::Scenario;
