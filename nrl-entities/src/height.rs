use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Unit of a height value as entered by the user.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum HeightUnit {
    #[default]
    #[strum(serialize = "m")]
    Meters,
    #[strum(serialize = "ft")]
    Feet,
}

impl HeightUnit {
    /// Length of one unit in meters.
    pub const fn meters_per_unit(self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Feet => 0.3048,
        }
    }
}
