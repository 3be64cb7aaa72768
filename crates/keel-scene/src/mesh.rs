// SPDX-License-Identifier: Apache-2.0
use keel_geom::{Box3, Sphere, Triangle};
use keel_math::{Vec2, Vec3};

/// Triangle-mesh geometry consumed by bounding-volume computation and
/// picking.
///
/// The kernel does not parse any file format; positions, attributes, and
/// indices are supplied by an external asset layer. Bounds are cached with
/// a version counter and recomputed lazily when the positions change.
#[derive(Debug, Clone)]
pub struct TriMesh {
    positions: Vec<Vec3>,
    normals: Option<Vec<Vec3>>,
    uvs: Option<Vec<Vec2>>,
    indices: Option<Vec<[u32; 3]>>,
    version: u64,
    cached_bounds: Option<CachedBounds>,
}

#[derive(Debug, Clone, Copy)]
struct CachedBounds {
    version: u64,
    bounding_box: Box3,
    bounding_sphere: Sphere,
}

impl TriMesh {
    /// Creates a non-indexed mesh; consecutive position triples form
    /// triangles.
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            normals: None,
            uvs: None,
            indices: None,
            version: 0,
            cached_bounds: None,
        }
    }

    /// Creates an indexed mesh.
    pub fn with_indices(positions: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Self {
        Self {
            indices: Some(indices),
            ..Self::new(positions)
        }
    }

    /// Attaches per-vertex normals (parallel to `positions`).
    #[must_use]
    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Attaches per-vertex UVs (parallel to `positions`).
    #[must_use]
    pub fn with_uvs(mut self, uvs: Vec<Vec2>) -> Self {
        self.uvs = Some(uvs);
        self
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Replaces the vertex positions and invalidates the cached bounds.
    pub fn set_positions(&mut self, positions: Vec<Vec3>) {
        self.positions = positions;
        self.version += 1;
    }

    /// Bounds-cache version; bumped whenever positions change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.positions.len() / 3,
        }
    }

    /// Vertex indices of triangle `i`.
    pub fn triangle_indices(&self, i: usize) -> Option<[u32; 3]> {
        match &self.indices {
            Some(indices) => indices.get(i).copied(),
            None => {
                let base = i * 3;
                if base + 2 >= self.positions.len() {
                    return None;
                }
                let base = u32::try_from(base).ok()?;
                Some([base, base + 1, base + 2])
            }
        }
    }

    /// Triangle `i` as geometry, or `None` past the end (or on an index
    /// referencing a missing vertex).
    pub fn triangle(&self, i: usize) -> Option<Triangle> {
        let [ia, ib, ic] = self.triangle_indices(i)?;
        Some(Triangle::new(
            *self.positions.get(ia as usize)?,
            *self.positions.get(ib as usize)?,
            *self.positions.get(ic as usize)?,
        ))
    }

    /// Per-vertex normals for triangle `i`, if normals are present.
    pub fn triangle_normals(&self, i: usize) -> Option<[Vec3; 3]> {
        let normals = self.normals.as_ref()?;
        let [ia, ib, ic] = self.triangle_indices(i)?;
        Some([
            *normals.get(ia as usize)?,
            *normals.get(ib as usize)?,
            *normals.get(ic as usize)?,
        ])
    }

    /// Per-vertex UVs for triangle `i`, if UVs are present.
    pub fn triangle_uvs(&self, i: usize) -> Option<[Vec2; 3]> {
        let uvs = self.uvs.as_ref()?;
        let [ia, ib, ic] = self.triangle_indices(i)?;
        Some([
            *uvs.get(ia as usize)?,
            *uvs.get(ib as usize)?,
            *uvs.get(ic as usize)?,
        ])
    }

    /// Axis-aligned bounds of the positions, cached per version.
    pub fn bounding_box(&mut self) -> Box3 {
        self.refresh_bounds();
        // refresh_bounds always populates the cache
        self.cached_bounds.map_or(Box3::EMPTY, |c| c.bounding_box)
    }

    /// Bounding sphere of the positions (centered on the bounding box),
    /// cached per version.
    pub fn bounding_sphere(&mut self) -> Sphere {
        self.refresh_bounds();
        self.cached_bounds
            .map_or(Sphere::EMPTY, |c| c.bounding_sphere)
    }

    fn refresh_bounds(&mut self) {
        if let Some(cached) = &self.cached_bounds {
            if cached.version == self.version {
                return;
            }
        }
        let bounding_box = Box3::from_points(&self.positions);
        let bounding_sphere = Sphere::from_points(&self.positions, Some(bounding_box.center()));
        self.cached_bounds = Some(CachedBounds {
            version: self.version,
            bounding_box,
            bounding_sphere,
        });
    }
}
