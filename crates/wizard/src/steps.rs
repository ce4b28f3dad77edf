//! Step positions and typed step data.

use flow_store::FieldMap;
use serde::{Deserialize, Serialize};

/// Position of the service cards step (the start step, no `step` param).
pub const STEP_START: u32 = 0;

/// Position of the quote form step.
pub const STEP_QUOTE_FORM: u32 = 1;

/// Position of the packages step.
pub const STEP_PACKAGES: u32 = 2;

/// Outer dimensions of one package, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// One package line of a quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    /// Free-text description of the goods.
    pub description: String,
    /// Number of identical packages.
    pub quantity: u32,
    /// Weight per package, in kilograms.
    pub weight_kg: f64,
    /// Outer dimensions, when the sender knows them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions_cm: Option<Dimensions>,
}

impl PackageRecord {
    /// Creates a package record without dimensions.
    pub fn new(description: impl Into<String>, quantity: u32, weight_kg: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            weight_kg,
            dimensions_cm: None,
        }
    }

    /// Sets the package dimensions.
    pub fn with_dimensions(mut self, length: f64, width: f64, height: f64) -> Self {
        self.dimensions_cm = Some(Dimensions {
            length,
            width,
            height,
        });
        self
    }
}

/// Data a step renderer hands to the controller on completion.
///
/// Tagged variants keep the controller's assumptions explicit: the form
/// step produces fields, the packages step produces package records, and
/// nothing is threaded through as an untyped blob.
#[derive(Debug, Clone, PartialEq)]
pub enum StepData {
    /// The quote form step completed with these fields.
    Form(FieldMap),
    /// The packages step completed with these records.
    Packages(Vec<PackageRecord>),
}

/// Error returned when package records fail boundary validation.
#[derive(Debug, Clone)]
pub struct InvalidPackage {
    pub message: String,
}

impl std::fmt::Display for InvalidPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid package data: {}", self.message)
    }
}

impl std::error::Error for InvalidPackage {}

/// Validates package records before they reach the submission service.
pub fn validate_packages(packages: &[PackageRecord]) -> Result<(), InvalidPackage> {
    if packages.is_empty() {
        return Err(InvalidPackage {
            message: "a quote needs at least one package".to_string(),
        });
    }

    for (index, package) in packages.iter().enumerate() {
        if package.quantity == 0 {
            return Err(InvalidPackage {
                message: format!("package {}: quantity must be at least 1", index + 1),
            });
        }
        if !(package.weight_kg > 0.0) || !package.weight_kg.is_finite() {
            return Err(InvalidPackage {
                message: format!("package {}: weight must be a positive number", index + 1),
            });
        }
        if let Some(dims) = &package.dimensions_cm
            && [dims.length, dims.width, dims.height]
                .iter()
                .any(|d| !(*d > 0.0) || !d.is_finite())
        {
            return Err(InvalidPackage {
                message: format!("package {}: dimensions must be positive numbers", index + 1),
            });
        }
    }

    Ok(())
}
