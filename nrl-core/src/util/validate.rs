use std::{error, fmt};

use crate::entities::HeightUnit;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

/// Metadata entered in the second step of the submission wizard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleMetadata {
    pub name: String,
    pub description: Option<String>,
    pub height_value: Option<f64>,
    pub height_unit: HeightUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    ObstacleName,
    HeightValue,
}

impl MetadataField {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ObstacleName => "obstacle_name",
            Self::HeightValue => "height_value",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::ObstacleName => "Enter what the obstacle is.",
            Self::HeightValue => "Enter the height.",
        }
    }
}

/// All violations found in the submitted metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataInvalidation {
    pub fields: Vec<MetadataField>,
}

impl MetadataInvalidation {
    pub fn contains(&self, field: MetadataField) -> bool {
        self.fields.contains(&field)
    }
}

impl fmt::Display for MetadataInvalidation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Invalid obstacle metadata:")?;
        for field in &self.fields {
            write!(f, " {} ({})", field.message(), field.name())?;
        }
        Ok(())
    }
}

impl error::Error for MetadataInvalidation {}

impl Validate for ObstacleMetadata {
    type Error = MetadataInvalidation;

    // All checks are run to report every violation at once
    fn validate(&self) -> Result<(), Self::Error> {
        let mut fields = Vec::with_capacity(2);
        if self.name.trim().is_empty() {
            fields.push(MetadataField::ObstacleName);
        }
        if !self
            .height_value
            .is_some_and(|value| value.is_finite() && value >= 0.0)
        {
            fields.push(MetadataField::HeightValue);
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(MetadataInvalidation { fields })
        }
    }
}

impl AutoCorrect for ObstacleMetadata {
    fn auto_correct(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self.description = trimmed_non_empty(self.description.as_deref());
        self
    }
}

/// Trim the text and drop it if nothing remains.
pub fn trimmed_non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}
