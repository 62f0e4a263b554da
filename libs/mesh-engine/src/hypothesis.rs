//! # Hypotheses and Algorithms
//!
//! Configuration objects the engine resolves by id. Sizing hypotheses
//! constrain element size; algorithms decide how a dimension is meshed.

use std::fmt;

use crate::error::{EngineError, EngineResult};

/// Engine-wide identifier of a hypothesis or algorithm.
///
/// The engine indexes configuration objects by this id, so ids must be
/// unique among the objects of one catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HypothesisId(u32);

impl HypothesisId {
    /// Wraps a raw id.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw id.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for HypothesisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_length(length: f64) -> EngineResult<f64> {
    if length.is_finite() && length > 0.0 {
        Ok(length)
    } else {
        Err(EngineError::InvalidParameter {
            name: "local length",
            value: length,
        })
    }
}

// =============================================================================
// SIZING HYPOTHESES
// =============================================================================

/// 1D sizing: target segment length along edges.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalLength {
    id: HypothesisId,
    length: Option<f64>,
}

impl LocalLength {
    pub fn new(id: HypothesisId) -> Self {
        Self { id, length: None }
    }

    pub fn id(&self) -> HypothesisId {
        self.id
    }

    /// Target length, `None` when the engine default applies.
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Sets the target length; must be positive and finite.
    pub fn set_length(&mut self, length: f64) -> EngineResult<()> {
        self.length = Some(validate_length(length)?);
        Ok(())
    }
}

/// 2D sizing: element length on faces and their edges, optional quads.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSizing {
    id: HypothesisId,
    local_length: Option<f64>,
    allow_quadrangles: bool,
}

impl SurfaceSizing {
    pub fn new(id: HypothesisId) -> Self {
        Self {
            id,
            local_length: None,
            allow_quadrangles: config::constants::DEFAULT_ALLOW_QUADRANGLES,
        }
    }

    pub fn id(&self) -> HypothesisId {
        self.id
    }

    pub fn local_length(&self) -> Option<f64> {
        self.local_length
    }

    pub fn set_local_length(&mut self, length: f64) -> EngineResult<()> {
        self.local_length = Some(validate_length(length)?);
        Ok(())
    }

    pub fn allow_quadrangles(&self) -> bool {
        self.allow_quadrangles
    }

    pub fn set_allow_quadrangles(&mut self, allow: bool) {
        self.allow_quadrangles = allow;
    }
}

/// 3D sizing: element length for surface and volume elements.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSizing {
    id: HypothesisId,
    local_length: Option<f64>,
}

impl VolumeSizing {
    pub fn new(id: HypothesisId) -> Self {
        Self {
            id,
            local_length: None,
        }
    }

    pub fn id(&self) -> HypothesisId {
        self.id
    }

    pub fn local_length(&self) -> Option<f64> {
        self.local_length
    }

    pub fn set_local_length(&mut self, length: f64) -> EngineResult<()> {
        self.local_length = Some(validate_length(length)?);
        Ok(())
    }
}

/// Any sizing hypothesis.
#[derive(Debug, Clone, PartialEq)]
pub enum Hypothesis {
    LocalLength(LocalLength),
    Surface(SurfaceSizing),
    Volume(VolumeSizing),
}

impl Hypothesis {
    pub fn id(&self) -> HypothesisId {
        match self {
            Hypothesis::LocalLength(h) => h.id(),
            Hypothesis::Surface(h) => h.id(),
            Hypothesis::Volume(h) => h.id(),
        }
    }

    /// Dimension of the algorithms this hypothesis parameterizes.
    pub fn dimension(&self) -> u8 {
        match self {
            Hypothesis::LocalLength(_) => 1,
            Hypothesis::Surface(_) => 2,
            Hypothesis::Volume(_) => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Hypothesis::LocalLength(_) => "LocalLength",
            Hypothesis::Surface(_) => "SurfaceSizing",
            Hypothesis::Volume(_) => "VolumeSizing",
        }
    }

    /// Target element length, `None` when the engine default applies.
    pub fn local_length(&self) -> Option<f64> {
        match self {
            Hypothesis::LocalLength(h) => h.length(),
            Hypothesis::Surface(h) => h.local_length(),
            Hypothesis::Volume(h) => h.local_length(),
        }
    }

    pub fn set_local_length(&mut self, length: f64) -> EngineResult<()> {
        match self {
            Hypothesis::LocalLength(h) => h.set_length(length),
            Hypothesis::Surface(h) => h.set_local_length(length),
            Hypothesis::Volume(h) => h.set_local_length(length),
        }
    }

    pub fn allow_quadrangles(&self) -> bool {
        match self {
            Hypothesis::Surface(h) => h.allow_quadrangles(),
            _ => false,
        }
    }

    /// Only surface sizing carries the quadrangle flag.
    pub fn set_allow_quadrangles(&mut self, allow: bool) -> EngineResult<()> {
        match self {
            Hypothesis::Surface(h) => {
                h.set_allow_quadrangles(allow);
                Ok(())
            }
            other => Err(EngineError::UnsupportedParameter {
                hypothesis: other.name(),
                parameter: "allow quadrangles",
            }),
        }
    }
}

impl From<LocalLength> for Hypothesis {
    fn from(h: LocalLength) -> Self {
        Hypothesis::LocalLength(h)
    }
}

impl From<SurfaceSizing> for Hypothesis {
    fn from(h: SurfaceSizing) -> Self {
        Hypothesis::Surface(h)
    }
}

impl From<VolumeSizing> for Hypothesis {
    fn from(h: VolumeSizing) -> Self {
        Hypothesis::Volume(h)
    }
}

// =============================================================================
// ALGORITHMS
// =============================================================================

/// Uniform division of edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Regular1D {
    id: HypothesisId,
}

impl Regular1D {
    pub fn new(id: HypothesisId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> HypothesisId {
        self.id
    }
}

/// Surface mesher; also divides the edges of the faces it meshes.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface2D {
    id: HypothesisId,
}

impl Surface2D {
    pub fn new(id: HypothesisId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> HypothesisId {
        self.id
    }
}

/// Combined surface and volume mesher.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume3D {
    id: HypothesisId,
}

impl Volume3D {
    pub fn new(id: HypothesisId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> HypothesisId {
        self.id
    }
}

/// Any meshing algorithm.
#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    Regular1D(Regular1D),
    Surface2D(Surface2D),
    Volume3D(Volume3D),
}

impl Algorithm {
    pub fn id(&self) -> HypothesisId {
        match self {
            Algorithm::Regular1D(a) => a.id(),
            Algorithm::Surface2D(a) => a.id(),
            Algorithm::Volume3D(a) => a.id(),
        }
    }

    /// Highest dimension this algorithm meshes. It also meshes every
    /// lower-dimensional sub-shape of its target.
    pub fn dimension(&self) -> u8 {
        match self {
            Algorithm::Regular1D(_) => 1,
            Algorithm::Surface2D(_) => 2,
            Algorithm::Volume3D(_) => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Regular1D(_) => "Regular1D",
            Algorithm::Surface2D(_) => "Surface2D",
            Algorithm::Volume3D(_) => "Volume3D",
        }
    }
}

impl From<Regular1D> for Algorithm {
    fn from(a: Regular1D) -> Self {
        Algorithm::Regular1D(a)
    }
}

impl From<Surface2D> for Algorithm {
    fn from(a: Surface2D) -> Self {
        Algorithm::Surface2D(a)
    }
}

impl From<Volume3D> for Algorithm {
    fn from(a: Volume3D) -> Self {
        Algorithm::Volume3D(a)
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Borrowed view of a configuration object.
#[derive(Debug, Clone, Copy)]
pub enum ConfigRef<'a> {
    Hypothesis(&'a Hypothesis),
    Algorithm(&'a Algorithm),
}

/// Owned configuration object, for callers that keep them in one list.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigObject {
    Hypothesis(Hypothesis),
    Algorithm(Algorithm),
}

impl ConfigObject {
    pub fn id(&self) -> HypothesisId {
        match self {
            ConfigObject::Hypothesis(h) => h.id(),
            ConfigObject::Algorithm(a) => a.id(),
        }
    }

    pub fn borrowed(&self) -> ConfigRef<'_> {
        match self {
            ConfigObject::Hypothesis(h) => ConfigRef::Hypothesis(h),
            ConfigObject::Algorithm(a) => ConfigRef::Algorithm(a),
        }
    }
}

/// Id-indexed source of configuration objects consulted during compute.
pub trait Catalog {
    fn lookup(&self, id: HypothesisId) -> Option<ConfigRef<'_>>;
}

impl Catalog for [ConfigObject] {
    fn lookup(&self, id: HypothesisId) -> Option<ConfigRef<'_>> {
        self.iter().find(|o| o.id() == id).map(ConfigObject::borrowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_must_be_positive() {
        let mut h = LocalLength::new(HypothesisId::new(0));
        assert!(h.set_length(0.0).is_err());
        assert!(h.set_length(-1.0).is_err());
        assert!(h.set_length(f64::NAN).is_err());
        assert_eq!(h.length(), None);
        h.set_length(0.5).unwrap();
        assert_eq!(h.length(), Some(0.5));
    }

    #[test]
    fn test_quadrangles_only_on_surface_sizing() {
        let mut surface = Hypothesis::from(SurfaceSizing::new(HypothesisId::new(1)));
        surface.set_allow_quadrangles(true).unwrap();
        assert!(surface.allow_quadrangles());

        let mut volume = Hypothesis::from(VolumeSizing::new(HypothesisId::new(2)));
        let err = volume.set_allow_quadrangles(true).unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnsupportedParameter { hypothesis: "VolumeSizing", .. }
        ));
    }

    #[test]
    fn test_dimensions() {
        let id = HypothesisId::new(0);
        assert_eq!(Hypothesis::from(LocalLength::new(id)).dimension(), 1);
        assert_eq!(Hypothesis::from(SurfaceSizing::new(id)).dimension(), 2);
        assert_eq!(Hypothesis::from(VolumeSizing::new(id)).dimension(), 3);
        assert_eq!(Algorithm::from(Regular1D::new(id)).dimension(), 1);
        assert_eq!(Algorithm::from(Surface2D::new(id)).dimension(), 2);
        assert_eq!(Algorithm::from(Volume3D::new(id)).dimension(), 3);
    }

    #[test]
    fn test_slice_catalog_lookup() {
        let objects = vec![
            ConfigObject::Hypothesis(LocalLength::new(HypothesisId::new(7)).into()),
            ConfigObject::Algorithm(Regular1D::new(HypothesisId::new(8)).into()),
        ];
        let catalog: &[ConfigObject] = &objects;
        assert!(matches!(catalog.lookup(HypothesisId::new(7)), Some(ConfigRef::Hypothesis(_))));
        assert!(matches!(catalog.lookup(HypothesisId::new(8)), Some(ConfigRef::Algorithm(_))));
        assert!(catalog.lookup(HypothesisId::new(9)).is_none());
    }
}
