//! Runtime noise selectors.
//!
//! The engine composes noise from independent strategies at compile time.
//! [`NoiseType`] is the runtime description of one such composition; the
//! noise crate resolves it to a monomorphised evaluator.
//!
//! ```text
//! NoiseType
//!   +-- kind:       Lattice { gradient, turbulence }
//!   |               Simplex { gradient, turbulence }
//!   |               Voronoi { distance, function }
//!   +-- dimensions: One | Two | Three
//!   +-- tiling:     periodic lattice addressing
//! ```
//!
//! # Example
//!
//! ```rust
//! use grain_core::{Dimensions, NoiseType};
//!
//! let perlin: NoiseType = "perlin".parse().unwrap();
//! let tiled = perlin.with_dimensions(Dimensions::Two).with_tiling(true);
//! assert_eq!(tiled.to_string(), "perlin 2d tiling");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Per-corner contribution used by lattice and simplex noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum GradientKind {
    /// Hash-derived scalar, offsets ignored.
    Value,
    /// Directional gradients normalised for lattice interpolation.
    Perlin,
    /// Unit gradients normalised for the simplex kernel.
    Simplex,
}

/// Distance metric for cellular noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DistanceKind {
    /// Euclidean distance, root taken once after the search.
    Worley,
    /// Largest absolute axis component.
    Chebyshev,
}

/// Reduction of the two nearest feature distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum VoronoiFunction {
    /// Nearest distance.
    F1,
    /// Second-nearest distance.
    F2,
    /// Second-nearest minus nearest; highlights cell edges.
    F2MinusF1,
}

/// Number of position axes a noise family samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Dimensions {
    /// x only.
    One,
    /// The horizontal x/z plane.
    Two,
    /// x, y and z.
    #[default]
    Three,
}

impl Dimensions {
    /// Axis count as a number.
    #[inline]
    pub fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Builds from an axis count in `1..=3`.
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }
}

/// Noise family together with its family-specific strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "family", rename_all = "kebab-case"))]
pub enum NoiseKind {
    /// Multilinear interpolation of lattice corner gradients.
    Lattice {
        /// Corner contribution.
        gradient: GradientKind,
        /// Fold the result through its absolute value.
        #[cfg_attr(feature = "serde", serde(default))]
        turbulence: bool,
    },
    /// Sum of falloff kernels at simplex corners.
    Simplex {
        /// Corner contribution.
        gradient: GradientKind,
        /// Fold the result through its absolute value.
        #[cfg_attr(feature = "serde", serde(default))]
        turbulence: bool,
    },
    /// Cellular distance to jittered feature points.
    Voronoi {
        /// Distance metric.
        distance: DistanceKind,
        /// Reduction of the nearest two distances.
        function: VoronoiFunction,
    },
}

/// Full runtime description of a noise evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseType {
    /// Family and strategies.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: NoiseKind,
    /// Sampled axes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dimensions: Dimensions,
    /// Periodic lattice addressing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tiling: bool,
}

/// Names accepted by [`NoiseType::preset`], in display order.
pub const PRESET_NAMES: [&str; 14] = [
    "perlin",
    "perlin-turbulence",
    "value",
    "value-turbulence",
    "simplex",
    "simplex-turbulence",
    "simplex-value",
    "simplex-value-turbulence",
    "voronoi-worley-f1",
    "voronoi-worley-f2",
    "voronoi-worley-f2-minus-f1",
    "voronoi-chebyshev-f1",
    "voronoi-chebyshev-f2",
    "voronoi-chebyshev-f2-minus-f1",
];

impl NoiseType {
    /// Creates a 3D, non-tiling noise type of the given kind.
    #[inline]
    pub const fn new(kind: NoiseKind) -> Self {
        Self {
            kind,
            dimensions: Dimensions::Three,
            tiling: false,
        }
    }

    /// Lattice noise with the given gradient.
    #[inline]
    pub const fn lattice(gradient: GradientKind) -> Self {
        Self::new(NoiseKind::Lattice {
            gradient,
            turbulence: false,
        })
    }

    /// Simplex noise with the given gradient.
    #[inline]
    pub const fn simplex(gradient: GradientKind) -> Self {
        Self::new(NoiseKind::Simplex {
            gradient,
            turbulence: false,
        })
    }

    /// Voronoi noise with the given metric and reduction.
    #[inline]
    pub const fn voronoi(distance: DistanceKind, function: VoronoiFunction) -> Self {
        Self::new(NoiseKind::Voronoi { distance, function })
    }

    /// Sets the sampled axes.
    #[inline]
    pub const fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Sets periodic addressing.
    #[inline]
    pub const fn with_tiling(mut self, tiling: bool) -> Self {
        self.tiling = tiling;
        self
    }

    /// Turns turbulence on or off. Voronoi kinds are returned unchanged.
    pub fn with_turbulence(mut self, on: bool) -> Self {
        match &mut self.kind {
            NoiseKind::Lattice { turbulence, .. } | NoiseKind::Simplex { turbulence, .. } => {
                *turbulence = on;
            }
            NoiseKind::Voronoi { .. } => {}
        }
        self
    }

    /// Looks up one of the [`PRESET_NAMES`]. Presets are 3D and non-tiling.
    pub fn preset(name: &str) -> Option<Self> {
        use DistanceKind::{Chebyshev, Worley};
        use GradientKind::{Perlin, Simplex, Value};
        use VoronoiFunction::{F1, F2, F2MinusF1};

        let ty = match name {
            "perlin" => Self::lattice(Perlin),
            "perlin-turbulence" => Self::lattice(Perlin).with_turbulence(true),
            "value" => Self::lattice(Value),
            "value-turbulence" => Self::lattice(Value).with_turbulence(true),
            "simplex" => Self::simplex(Simplex),
            "simplex-turbulence" => Self::simplex(Simplex).with_turbulence(true),
            "simplex-value" => Self::simplex(Value),
            "simplex-value-turbulence" => Self::simplex(Value).with_turbulence(true),
            "voronoi-worley-f1" => Self::voronoi(Worley, F1),
            "voronoi-worley-f2" => Self::voronoi(Worley, F2),
            "voronoi-worley-f2-minus-f1" => Self::voronoi(Worley, F2MinusF1),
            "voronoi-chebyshev-f1" => Self::voronoi(Chebyshev, F1),
            "voronoi-chebyshev-f2" => Self::voronoi(Chebyshev, F2),
            "voronoi-chebyshev-f2-minus-f1" => Self::voronoi(Chebyshev, F2MinusF1),
            _ => return None,
        };
        Some(ty)
    }

    /// Short name of the kind, matching [`PRESET_NAMES`] where one exists.
    pub fn kind_name(&self) -> String {
        let turbulence_suffix = |on: bool| if on { "-turbulence" } else { "" };
        match self.kind {
            NoiseKind::Lattice {
                gradient,
                turbulence,
            } => {
                let base = match gradient {
                    GradientKind::Value => "value",
                    GradientKind::Perlin => "perlin",
                    GradientKind::Simplex => "lattice-simplex",
                };
                format!("{base}{}", turbulence_suffix(turbulence))
            }
            NoiseKind::Simplex {
                gradient,
                turbulence,
            } => {
                let base = match gradient {
                    GradientKind::Value => "simplex-value",
                    GradientKind::Perlin => "simplex-perlin",
                    GradientKind::Simplex => "simplex",
                };
                format!("{base}{}", turbulence_suffix(turbulence))
            }
            NoiseKind::Voronoi { distance, function } => {
                format!("voronoi-{distance}-{function}")
            }
        }
    }
}

impl fmt::Display for NoiseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind_name(), self.dimensions)?;
        if self.tiling {
            f.write_str(" tiling")?;
        }
        Ok(())
    }
}

impl FromStr for NoiseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::preset(&s.trim().to_ascii_lowercase()).ok_or_else(|| Error::parse("noise type", s))
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Value => "value",
            Self::Perlin => "perlin",
            Self::Simplex => "simplex",
        })
    }
}

impl FromStr for GradientKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "value" => Ok(Self::Value),
            "perlin" => Ok(Self::Perlin),
            "simplex" => Ok(Self::Simplex),
            _ => Err(Error::parse("gradient", s)),
        }
    }
}

impl fmt::Display for DistanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Worley => "worley",
            Self::Chebyshev => "chebyshev",
        })
    }
}

impl FromStr for DistanceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "worley" | "euclidean" => Ok(Self::Worley),
            "chebyshev" => Ok(Self::Chebyshev),
            _ => Err(Error::parse("distance", s)),
        }
    }
}

impl fmt::Display for VoronoiFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::F1 => "f1",
            Self::F2 => "f2",
            Self::F2MinusF1 => "f2-minus-f1",
        })
    }
}

impl FromStr for VoronoiFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f1" => Ok(Self::F1),
            "f2" => Ok(Self::F2),
            "f2-minus-f1" | "f2-f1" => Ok(Self::F2MinusF1),
            _ => Err(Error::parse("voronoi function", s)),
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.count())
    }
}

impl FromStr for Dimensions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        let digits = trimmed.strip_suffix('d').unwrap_or(&trimmed);
        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::from_count)
            .ok_or_else(|| Error::parse("dimensions", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_parses() {
        for name in PRESET_NAMES {
            let ty: NoiseType = name.parse().unwrap();
            assert_eq!(ty.kind_name(), name);
            assert_eq!(ty.dimensions, Dimensions::Three);
            assert!(!ty.tiling);
        }
    }

    #[test]
    fn test_unknown_preset() {
        let err = "marble".parse::<NoiseType>().unwrap_err();
        assert!(err.to_string().contains("marble"));
    }

    #[test]
    fn test_turbulence_ignored_for_voronoi() {
        let ty = NoiseType::voronoi(DistanceKind::Worley, VoronoiFunction::F1);
        assert_eq!(ty.with_turbulence(true), ty);
    }

    #[test]
    fn test_display() {
        let ty = NoiseType::lattice(GradientKind::Value)
            .with_turbulence(true)
            .with_dimensions(Dimensions::One)
            .with_tiling(true);
        assert_eq!(ty.to_string(), "value-turbulence 1d tiling");
    }

    #[test]
    fn test_dimensions_parse() {
        assert_eq!("2".parse::<Dimensions>().unwrap(), Dimensions::Two);
        assert_eq!("3D".parse::<Dimensions>().unwrap(), Dimensions::Three);
        assert!("4".parse::<Dimensions>().is_err());
        assert!("".parse::<Dimensions>().is_err());
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("Perlin".parse::<GradientKind>().unwrap(), GradientKind::Perlin);
        assert_eq!("chebyshev".parse::<DistanceKind>().unwrap(), DistanceKind::Chebyshev);
        assert_eq!(
            "f2-minus-f1".parse::<VoronoiFunction>().unwrap(),
            VoronoiFunction::F2MinusF1
        );
        assert!("f3".parse::<VoronoiFunction>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_yaml_roundtrip() {
        let yaml = "family: voronoi\ndistance: chebyshev\nfunction: f2-minus-f1\ndimensions: two\ntiling: true\n";
        let ty: NoiseType = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            ty,
            NoiseType::voronoi(DistanceKind::Chebyshev, VoronoiFunction::F2MinusF1)
                .with_dimensions(Dimensions::Two)
                .with_tiling(true)
        );
    }
}
