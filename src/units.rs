//! Lengths with units, and their conversion to layout points.
//!
//! TeX's absolute units convert through fixed ratios; the relative units
//! `em`, `ex` and `mu` are resolved against the current environment at the
//! point of use.

use crate::environment::Environment;
use crate::types::{ParseError, ParseErrorKind};
use strum::{Display, EnumString};

/// A measurement unit accepted in sizes like `\kern2pt` or `\rule{1em}{2px}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Unit {
    /// Point, the engine's internal length unit.
    Pt,
    /// Millimeter.
    Mm,
    /// Centimeter.
    Cm,
    /// Inch.
    In,
    /// Big point (1/72 inch).
    Bp,
    /// Pica (12 pt).
    Pc,
    /// Didot point.
    Dd,
    /// Cicero (12 dd).
    Cc,
    /// Scaled point (1/65536 pt).
    Sp,
    /// CSS pixel (96 per inch).
    Px,
    /// Current font quad width.
    Em,
    /// Current font x-height.
    Ex,
    /// Math unit, 1/18 em.
    Mu,
}

impl Unit {
    /// Points per unit for absolute units, `None` for font-relative ones.
    fn pt_per_unit(self) -> Option<f64> {
        match self {
            Self::Pt => Some(1.0),
            Self::Mm => Some(7227.0 / 2540.0),
            Self::Cm => Some(7227.0 / 254.0),
            Self::In => Some(72.27),
            Self::Bp => Some(72.27 / 72.0),
            Self::Pc => Some(12.0),
            Self::Dd => Some(1238.0 / 1157.0),
            Self::Cc => Some(14856.0 / 1157.0),
            Self::Sp => Some(1.0 / 65536.0),
            Self::Px => Some(72.27 / 96.0),
            Self::Em | Self::Ex | Self::Mu => None,
        }
    }
}

/// A number with a unit, e.g. `1.5em`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension {
    pub number: f64,
    pub unit: Unit,
}

impl Dimension {
    pub const ZERO: Self = Self {
        number: 0.0,
        unit: Unit::Pt,
    };

    pub const fn new(number: f64, unit: Unit) -> Self {
        Self { number, unit }
    }

    /// Parse a size literal such as `2pt`, `-1.5em` or `.4mu`.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        let split = trimmed
            .rfind(|c: char| c.is_ascii_digit() || c == '.')
            .map(|i| i + 1)
            .unwrap_or(0);
        let (number_text, unit_text) = trimmed.split_at(split);
        let number: f64 = number_text.trim().parse().map_err(|_| {
            ParseError::new(ParseErrorKind::InvalidSize {
                size: trimmed.to_owned(),
            })
        })?;
        let unit: Unit = unit_text.trim().parse().map_err(|_| {
            ParseError::new(ParseErrorKind::InvalidUnit {
                unit: unit_text.trim().to_owned(),
            })
        })?;
        Ok(Self { number, unit })
    }

    /// Resolve to points in the given environment.
    ///
    /// Absolute units ignore the environment entirely; `em`/`ex`/`mu` scale
    /// with the current style and font constants.
    #[must_use]
    pub fn to_points(self, env: &Environment<'_>) -> f64 {
        match self.unit.pt_per_unit() {
            Some(ratio) => self.number * ratio,
            None => match self.unit {
                Unit::Em => env.em_to_pt(self.number),
                Unit::Ex => env.em_to_pt(self.number * env.constants().x_height),
                Unit::Mu => env.mu_to_pt(self.number),
                _ => unreachable!("absolute unit handled above"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_metrics::FixedFontBackend;
    use crate::style::Style;
    use crate::types::Color;

    #[test]
    fn parses_common_sizes() {
        assert_eq!(Dimension::parse("2pt").unwrap(), Dimension::new(2.0, Unit::Pt));
        assert_eq!(
            Dimension::parse("-1.5em").unwrap(),
            Dimension::new(-1.5, Unit::Em)
        );
        assert_eq!(Dimension::parse(".4mu").unwrap(), Dimension::new(0.4, Unit::Mu));
        assert_eq!(Dimension::parse(" 3 cm ").unwrap(), Dimension::new(3.0, Unit::Cm));
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(Dimension::parse("1.2zz").is_err());
        assert!(Dimension::parse("em").is_err());
        assert!(Dimension::parse("").is_err());
    }

    #[test]
    fn absolute_units_ignore_style() {
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::SCRIPT, 20.0, Color::BLACK);
        let inch = Dimension::new(1.0, Unit::In).to_points(&env);
        assert!((inch - 72.27).abs() < 1e-9);
    }

    #[test]
    fn relative_units_scale_with_style() {
        let backend = FixedFontBackend::default();
        let text = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        let script = text.having_style(Style::SCRIPT);
        let em_text = Dimension::new(1.0, Unit::Em).to_points(&text);
        let em_script = Dimension::new(1.0, Unit::Em).to_points(&script);
        assert!((em_text - 20.0).abs() < 1e-9);
        assert!((em_script - 14.0).abs() < 1e-9);
    }
}
