//! Screen-space spatial index for nearest-point hit testing.
//!
//! Records are projected into pixel space with caller-supplied x/y functions and
//! stored in an implicit 2-d tree (the point slice itself, median-partitioned
//! per level). Building is O(n log n); a nearest query visits O(log n) nodes on
//! well-spread data and degrades gracefully to a linear scan on pathological
//! inputs, which is fine at dashboard sizes.

use std::cmp::Ordering;

/// A record's projected screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialPoint {
    pub x: f64,
    pub y: f64,
    /// Index of the record in the slice the index was built from.
    pub index: usize,
}

impl SpatialPoint {
    fn axis(&self, axis: usize) -> f64 {
        if axis == 0 {
            self.x
        } else {
            self.y
        }
    }

    fn dist2(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

/// Nearest-neighbour lookup over projected points.
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    tree: Vec<SpatialPoint>,
}

impl SpatialIndex {
    /// Project `records` and build the index.
    ///
    /// Records whose projection is not finite are left out; they can never be hit.
    pub fn build<T>(
        records: &[T],
        project_x: impl Fn(&T) -> f64,
        project_y: impl Fn(&T) -> f64,
    ) -> Self {
        let tree = records
            .iter()
            .enumerate()
            .map(|(index, r)| SpatialPoint {
                x: project_x(r),
                y: project_y(r),
                index,
            })
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .collect();
        Self::from_points(tree)
    }

    /// Build from already-projected points.
    pub fn from_points(mut points: Vec<SpatialPoint>) -> Self {
        partition(&mut points, 0);
        Self { tree: points }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Projected position of the record at `index`, if it was indexed.
    pub fn position_of(&self, index: usize) -> Option<(f64, f64)> {
        self.tree
            .iter()
            .find(|p| p.index == index)
            .map(|p| (p.x, p.y))
    }

    /// Closest record within `radius` pixels of `(x, y)`.
    ///
    /// Among equidistant candidates the lowest record index wins, so coincident
    /// points resolve deterministically.
    ///
    /// ```
    /// # use capdash::data::spatial::SpatialIndex;
    /// let pts = [(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)];
    /// let idx = SpatialIndex::build(&pts, |p| p.0, |p| p.1);
    /// assert_eq!(idx.nearest_within(11.0, 1.0, 5.0), Some(1));
    /// assert_eq!(idx.nearest_within(40.0, 0.0, 5.0), None);
    /// ```
    pub fn nearest_within(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
        if !(x.is_finite() && y.is_finite()) || radius.is_nan() || radius < 0.0 {
            return None;
        }
        let mut search = Search {
            x,
            y,
            bound: radius * radius,
            best: None,
        };
        search.visit(&self.tree, 0);
        search.best.map(|(_, index)| index)
    }

    /// Closest record regardless of distance.
    pub fn nearest(&self, x: f64, y: f64) -> Option<usize> {
        self.nearest_within(x, y, f64::INFINITY)
    }
}

/// A [`SpatialIndex`] tagged with the projection it was built for.
///
/// `F` is whatever determines pixel positions for a view: scale domains and
/// ranges plus a dataset generation or length. [`ensure`](Self::ensure) rebuilds
/// whenever that fingerprint changes, so a query never sees points projected
/// for an older layout.
#[derive(Debug, Clone)]
pub struct ProjectedIndex<F> {
    fingerprint: Option<F>,
    index: SpatialIndex,
}

impl<F> Default for ProjectedIndex<F> {
    fn default() -> Self {
        Self {
            fingerprint: None,
            index: SpatialIndex::default(),
        }
    }
}

impl<F: PartialEq> ProjectedIndex<F> {
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn fingerprint(&self) -> Option<&F> {
        self.fingerprint.as_ref()
    }

    /// Rebuild with `build` unless the index was already built for `fingerprint`.
    /// Returns `true` if it was rebuilt.
    pub fn ensure(&mut self, fingerprint: F, build: impl FnOnce() -> SpatialIndex) -> bool {
        if self.fingerprint.as_ref() == Some(&fingerprint) {
            return false;
        }
        self.index = build();
        self.fingerprint = Some(fingerprint);
        true
    }
}

fn partition(points: &mut [SpatialPoint], depth: usize) {
    if points.len() <= 1 {
        return;
    }
    let axis = depth % 2;
    let mid = points.len() / 2;
    points.select_nth_unstable_by(mid, |a, b| a.axis(axis).total_cmp(&b.axis(axis)));
    let (left, rest) = points.split_at_mut(mid);
    partition(left, depth + 1);
    partition(&mut rest[1..], depth + 1);
}

struct Search {
    x: f64,
    y: f64,
    /// Squared distance a candidate must not exceed.
    bound: f64,
    best: Option<(f64, usize)>,
}

impl Search {
    fn offer(&mut self, p: &SpatialPoint) {
        let d2 = p.dist2(self.x, self.y);
        if d2 > self.bound {
            return;
        }
        let better = match self.best {
            None => true,
            Some((bd, bi)) => match d2.total_cmp(&bd) {
                Ordering::Less => true,
                Ordering::Equal => p.index < bi,
                Ordering::Greater => false,
            },
        };
        if better {
            self.best = Some((d2, p.index));
            self.bound = d2;
        }
    }

    fn visit(&mut self, node: &[SpatialPoint], depth: usize) {
        if node.is_empty() {
            return;
        }
        let mid = node.len() / 2;
        let pivot = &node[mid];
        self.offer(pivot);

        let axis = depth % 2;
        let q = if axis == 0 { self.x } else { self.y };
        let diff = q - pivot.axis(axis);
        let (near, far) = if diff < 0.0 {
            (&node[..mid], &node[mid + 1..])
        } else {
            (&node[mid + 1..], &node[..mid])
        };
        self.visit(near, depth + 1);
        // `<=` so equidistant points on the far side still get a chance at the index tie-break.
        if diff * diff <= self.bound {
            self.visit(far, depth + 1);
        }
    }
}
