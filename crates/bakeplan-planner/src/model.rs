use bakeplan_solver::LinearProgram;
use log::debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("Non-finite value in {0}")]
    NonFinite(String),
}

/// Per-unit economics of one product (one decision variable)
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSpec {
    pub name: String,
    pub profit_per_unit: f64,
    /// Usage per unit produced, one entry per resource
    pub resource_usage: Vec<f64>,
}

/// Total available amount of one constrained resource
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceLimit {
    pub name: String,
    pub capacity: f64,
}

impl ProductSpec {
    pub fn new(name: impl Into<String>, profit_per_unit: f64, resource_usage: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            profit_per_unit,
            resource_usage,
        }
    }
}

impl ResourceLimit {
    pub fn new(name: impl Into<String>, capacity: f64) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// Formulate the production LP: maximize total profit subject to
/// `usage · quantity <= capacity` for every resource.
pub fn build(products: &[ProductSpec], resources: &[ResourceLimit]) -> Result<LinearProgram, ModelError> {
    if products.is_empty() {
        return Err(ModelError::ShapeMismatch("no products to plan".to_string()));
    }

    for product in products {
        if product.resource_usage.len() != resources.len() {
            return Err(ModelError::ShapeMismatch(format!(
                "product {} lists {} resource usages but there are {} resources",
                product.name,
                product.resource_usage.len(),
                resources.len()
            )));
        }
        if !product.profit_per_unit.is_finite() {
            return Err(ModelError::NonFinite(format!("profit of {}", product.name)));
        }
        if product.resource_usage.iter().any(|u| !u.is_finite()) {
            return Err(ModelError::NonFinite(format!("resource usage of {}", product.name)));
        }
    }

    if let Some(resource) = resources.iter().find(|r| !r.capacity.is_finite()) {
        return Err(ModelError::NonFinite(format!("capacity of {}", resource.name)));
    }

    let mut lp = LinearProgram::new(products.iter().map(|p| p.name.clone()).collect());
    lp.set_objective(products.iter().map(|p| p.profit_per_unit).collect());

    // One row per resource, one column per product
    for (i, resource) in resources.iter().enumerate() {
        let coefficients = products.iter().map(|p| p.resource_usage[i]).collect();
        lp.add_constraint(resource.name.clone(), coefficients, resource.capacity);
    }

    debug!(
        "built LP with {} variables and {} constraints",
        lp.num_variables(),
        lp.num_constraints()
    );

    Ok(lp)
}
