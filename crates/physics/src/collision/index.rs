//! Static spatial index over triangle geometry.
//!
//! The index is built once from the full triangle set after level loading
//! and is immutable afterwards. It exists to keep the contact resolver from
//! testing every triangle in the scene: a region query walks a
//! bounding-volume tree and returns only the triangles whose boxes touch
//! the queried region.
//!
//! # Guarantees
//!
//! - A query never misses a triangle whose bounding box overlaps the
//!   region. False positives are allowed and expected.
//! - Building is deterministic for a given triangle ordering.
//! - Every triangle in a subtree is fully contained in that subtree's
//!   bounds (node bounds are unions of member triangle boxes).

use super::aabb::Aabb;
use super::triangle::Triangle;

/// Leaves hold at most this many triangles before a split is attempted.
const MAX_LEAF_TRIANGLES: usize = 8;

/// Hard cap on tree depth; beyond this, triangles stay in one leaf.
const MAX_DEPTH: u32 = 16;

#[derive(Debug)]
enum Node {
    Leaf {
        bounds: Aabb,
        items: Vec<u32>,
    },
    Split {
        bounds: Aabb,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn bounds(&self) -> &Aabb {
        match self {
            Node::Leaf { bounds, .. } | Node::Split { bounds, .. } => bounds,
        }
    }
}

/// Immutable bounding-volume tree over a triangle set.
#[derive(Debug)]
pub struct TriangleIndex {
    triangles: Vec<Triangle>,
    root: Option<Box<Node>>,
}

impl TriangleIndex {
    /// Build an index over `triangles`.
    ///
    /// Splits recursively at the centroid median along the longest axis of
    /// the node bounds until a leaf holds at most a handful of triangles or
    /// the depth cap is reached. An empty input produces an empty index
    /// that reports no intersections.
    pub fn build(triangles: Vec<Triangle>) -> Self {
        if triangles.is_empty() {
            return Self {
                triangles,
                root: None,
            };
        }

        let tri_bounds: Vec<Aabb> = triangles.iter().map(Triangle::aabb).collect();
        let indices: Vec<u32> = (0..triangles.len() as u32).collect();

        let mut max_depth_built = 0;
        let root = build_node(indices, &triangles, &tri_bounds, 0, &mut max_depth_built);

        log::debug!(
            "triangle index built: {} triangles, depth {}",
            triangles.len(),
            max_depth_built
        );

        Self {
            triangles,
            root: Some(Box::new(root)),
        }
    }

    /// An index with no geometry; all queries come back empty.
    pub fn empty() -> Self {
        Self::build(Vec::new())
    }

    /// Number of indexed triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True when the index holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The triangle stored under `index` (as returned by `query_region`).
    pub fn triangle(&self, index: u32) -> &Triangle {
        &self.triangles[index as usize]
    }

    /// All indexed triangles, in build order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Indices of every triangle whose bounding box overlaps `region`.
    ///
    /// Over-approximation is fine; the caller runs exact tests on the
    /// candidates. Traversal order is deterministic.
    pub fn query_region(&self, region: &Aabb) -> Vec<u32> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            self.collect(root, region, &mut out);
        }
        out
    }

    fn collect(&self, node: &Node, region: &Aabb, out: &mut Vec<u32>) {
        if !node.bounds().overlaps(region) {
            return;
        }
        match node {
            Node::Leaf { items, .. } => {
                for &i in items {
                    if self.triangles[i as usize].aabb().overlaps(region) {
                        out.push(i);
                    }
                }
            }
            Node::Split { left, right, .. } => {
                self.collect(left, region, out);
                self.collect(right, region, out);
            }
        }
    }
}

fn build_node(
    mut indices: Vec<u32>,
    triangles: &[Triangle],
    tri_bounds: &[Aabb],
    depth: u32,
    max_depth_built: &mut u32,
) -> Node {
    *max_depth_built = (*max_depth_built).max(depth);

    let mut bounds = tri_bounds[indices[0] as usize];
    for &i in indices.iter().skip(1) {
        bounds = bounds.union(&tri_bounds[i as usize]);
    }

    let axis = bounds.longest_axis();
    let spread = bounds.extent()[axis];

    // A split can no longer separate anything once the node has collapsed
    // to a point on its widest axis.
    if indices.len() <= MAX_LEAF_TRIANGLES || depth >= MAX_DEPTH || spread <= f32::EPSILON {
        return Node::Leaf {
            bounds,
            items: indices,
        };
    }

    // Median split on the longest axis; centroid ties break on the
    // original triangle order so rebuilds are reproducible.
    indices.sort_by(|&i, &j| {
        let ci = triangles[i as usize].centroid()[axis];
        let cj = triangles[j as usize].centroid()[axis];
        ci.total_cmp(&cj).then(i.cmp(&j))
    });

    let right_half = indices.split_off(indices.len() / 2);
    let left = build_node(indices, triangles, tri_bounds, depth + 1, max_depth_built);
    let right = build_node(right_half, triangles, tri_bounds, depth + 1, max_depth_built);

    Node::Split {
        bounds,
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;
    use glam::Vec3;

    fn random_triangle(rng: &mut SeededRandom) -> Triangle {
        let base = Vec3::new(
            rng.next_range(-20.0, 20.0),
            rng.next_range(-20.0, 20.0),
            rng.next_range(-20.0, 20.0),
        );
        let jitter = |rng: &mut SeededRandom| {
            Vec3::new(
                rng.next_range(-2.0, 2.0),
                rng.next_range(-2.0, 2.0),
                rng.next_range(-2.0, 2.0),
            )
        };
        Triangle::new(base, base + jitter(rng), base + jitter(rng))
    }

    #[test]
    fn test_empty_index_reports_nothing() {
        let index = TriangleIndex::empty();
        assert!(index.is_empty());
        let region = Aabb::new(Vec3::splat(-100.0), Vec3::splat(100.0));
        assert!(index.query_region(&region).is_empty());
    }

    #[test]
    fn test_query_finds_single_triangle() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Z);
        let index = TriangleIndex::build(vec![tri]);

        let near = Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        assert_eq!(index.query_region(&near), vec![0]);

        let far = Aabb::new(Vec3::splat(10.0), Vec3::splat(11.0));
        assert!(index.query_region(&far).is_empty());
    }

    #[test]
    fn test_query_never_misses_overlapping_triangles() {
        // Brute-force cross-check on random triangle soup: the index may
        // return extra candidates but must never drop one whose box
        // overlaps the query region.
        let mut rng = SeededRandom::new(0xC0FFEE);
        let triangles: Vec<Triangle> = (0..400).map(|_| random_triangle(&mut rng)).collect();
        let index = TriangleIndex::build(triangles.clone());

        for _ in 0..100 {
            let corner = Vec3::new(
                rng.next_range(-25.0, 25.0),
                rng.next_range(-25.0, 25.0),
                rng.next_range(-25.0, 25.0),
            );
            let size = Vec3::new(
                rng.next_range(0.1, 10.0),
                rng.next_range(0.1, 10.0),
                rng.next_range(0.1, 10.0),
            );
            let region = Aabb::new(corner, corner + size);

            let found = index.query_region(&region);
            for (i, tri) in triangles.iter().enumerate() {
                if tri.aabb().overlaps(&region) {
                    assert!(
                        found.contains(&(i as u32)),
                        "query dropped triangle {} overlapping region {:?}",
                        i,
                        region
                    );
                }
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut rng = SeededRandom::new(42);
        let triangles: Vec<Triangle> = (0..128).map(|_| random_triangle(&mut rng)).collect();

        let a = TriangleIndex::build(triangles.clone());
        let b = TriangleIndex::build(triangles);

        let region = Aabb::new(Vec3::splat(-30.0), Vec3::splat(30.0));
        assert_eq!(a.query_region(&region), b.query_region(&region));
    }

    #[test]
    fn test_handles_identical_triangles() {
        // Coincident centroids fall back to index-order ties; the build
        // must terminate and keep every duplicate reachable.
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Z);
        let index = TriangleIndex::build(vec![tri; 64]);

        let region = Aabb::new(Vec3::splat(-1.0), Vec3::splat(2.0));
        assert_eq!(index.query_region(&region).len(), 64);
    }
}
