//! Bezier falloff
//!
//! A cubic Bezier runs from `P0 = (d_near, 1)` to `P3 = (d_far, min)`. The
//! two inner control points sit at the plateau heights, pushed either side
//! of the interval midpoint by `offset` times the interval length:
//!
//! ```text
//!  1.0 |P0 ------ P1
//!      |             \
//!      |              \
//!  min |               P2 ------ P3
//!      +----------|----mid----|---------
//!              mid-oL       mid+oL
//! ```
//!
//! For a distance `d` the coefficient is the height of the curve where its
//! x equals `d`. Instead of implicitising the curve symbolically, `x(t) = d`
//! is solved numerically for `t` in `[0, 1]` and `y(t)` is read off.
//! Building the power-basis polynomials is cached per curve geometry in a
//! [`BezierCache`]; solving is done per query.

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use std::sync::{Arc, RwLock};

use crate::core::error::{Result, TtkError};
use crate::core::types::Meters;
use crate::falloff::FalloffCurve;
use crate::weapon::FalloffInterval;

/// Offset used by most measurements; there is no single canonical value
pub const DEFAULT_OFFSET: f64 = 0.15;

const BISECTION_STEPS: usize = 200;
const ROOT_TOLERANCE: f64 = 1e-12;
const SOLUTION_TOLERANCE: f64 = 1e-9;

/// Point on the falloff axis one `offset` away from the midpoint
fn offset_from_midpoint(start: f64, end: f64, offset: f64) -> f64 {
    start + (end - start) / 2.0 + (end - start) * offset
}

/// Cubic in power basis, `[a, b, c, d]` for `a*t^3 + b*t^2 + c*t + d`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cubic([f64; 4]);

impl Cubic {
    fn from_bernstein(p: [f64; 4]) -> Self {
        Self([
            p[3] - p[0] + 3.0 * (p[1] - p[2]),
            3.0 * (p[0] - 2.0 * p[1] + p[2]),
            3.0 * (p[1] - p[0]),
            p[0],
        ])
    }

    fn eval(&self, t: f64) -> f64 {
        let [a, b, c, d] = self.0;
        ((a * t + b) * t + c) * t + d
    }

    /// Roots of the derivative strictly inside (0, 1), ascending
    fn turning_points(&self) -> Vec<f64> {
        let [a, b, c, _] = self.0;
        // 3a t^2 + 2b t + c
        let (qa, qb, qc) = (3.0 * a, 2.0 * b, c);
        let mut roots = Vec::new();
        if qa.abs() < f64::EPSILON {
            if qb.abs() >= f64::EPSILON {
                roots.push(-qc / qb);
            }
        } else {
            let disc = qb * qb - 4.0 * qa * qc;
            if disc >= 0.0 {
                let sq = disc.sqrt();
                roots.push((-qb - sq) / (2.0 * qa));
                roots.push((-qb + sq) / (2.0 * qa));
            }
        }
        roots.retain(|t| *t > 0.0 && *t < 1.0);
        roots.sort_by(|a, b| a.total_cmp(b));
        roots
    }

    /// Every `t` in `[0, 1]` where the cubic equals `target`
    fn solve_unit(&self, target: f64) -> Vec<f64> {
        let f = |t: f64| self.eval(t) - target;

        let mut knots = vec![0.0];
        knots.extend(self.turning_points());
        knots.push(1.0);

        let mut roots: Vec<f64> = Vec::new();
        let push = |t: f64, roots: &mut Vec<f64>| {
            if !roots.iter().any(|r| (r - t).abs() < SOLUTION_TOLERANCE) {
                roots.push(t);
            }
        };

        for pair in knots.windows(2) {
            let (mut lo, mut hi) = (pair[0], pair[1]);
            let (mut f_lo, f_hi) = (f(lo), f(hi));
            if f_lo.abs() < ROOT_TOLERANCE {
                push(lo, &mut roots);
                continue;
            }
            if f_hi.abs() < ROOT_TOLERANCE {
                push(hi, &mut roots);
                continue;
            }
            if f_lo.signum() == f_hi.signum() {
                continue;
            }
            for _ in 0..BISECTION_STEPS {
                let mid = 0.5 * (lo + hi);
                let f_mid = f(mid);
                if f_mid.abs() < ROOT_TOLERANCE || hi - lo < f64::EPSILON {
                    lo = mid;
                    break;
                }
                if f_mid.signum() == f_lo.signum() {
                    lo = mid;
                    f_lo = f_mid;
                } else {
                    hi = mid;
                }
            }
            push(lo, &mut roots);
        }
        roots
    }
}

/// A falloff Bezier curve in power-basis form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierCurve {
    x: Cubic,
    y: Cubic,
}

impl BezierCurve {
    pub fn new(interval: &FalloffInterval, offset: f64) -> Self {
        let [p0, p1, p2, p3] = Self::control_points(interval, offset);
        Self {
            x: Cubic::from_bernstein([p0.0, p1.0, p2.0, p3.0]),
            y: Cubic::from_bernstein([p0.1, p1.1, p2.1, p3.1]),
        }
    }

    pub fn control_points(interval: &FalloffInterval, offset: f64) -> [(f64, f64); 4] {
        let (near, far) = (interval.near, interval.far);
        [
            (near.distance, near.coefficient),
            (
                offset_from_midpoint(near.distance, far.distance, -offset),
                near.coefficient,
            ),
            (
                offset_from_midpoint(near.distance, far.distance, offset),
                far.coefficient,
            ),
            (far.distance, far.coefficient),
        ]
    }

    /// Point on the curve at parameter `t`
    pub fn point(&self, t: f64) -> (f64, f64) {
        (self.x.eval(t), self.y.eval(t))
    }

    /// Height of the curve where it crosses `distance`, restricted to `[0, 1]`
    pub fn solve(&self, distance: Meters, offset: f64) -> Result<f64> {
        let mut heights: Vec<f64> = Vec::new();
        for t in self.x.solve_unit(distance) {
            let y = self.y.eval(t);
            if !(-SOLUTION_TOLERANCE..=1.0 + SOLUTION_TOLERANCE).contains(&y) {
                continue;
            }
            let y = y.clamp(0.0, 1.0);
            if !heights.iter().any(|h| (h - y).abs() < SOLUTION_TOLERANCE) {
                heights.push(y);
            }
        }
        match heights.as_slice() {
            [] => Err(TtkError::NoRealSolution { distance, offset }),
            [y] => Ok(*y),
            _ => Err(TtkError::AmbiguousSolution { distance, offset }),
        }
    }
}

/// Identity of a curve: both anchors plus the offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BezierKey {
    near: (OrderedFloat<f64>, OrderedFloat<f64>),
    far: (OrderedFloat<f64>, OrderedFloat<f64>),
    offset: OrderedFloat<f64>,
}

impl BezierKey {
    pub fn new(interval: &FalloffInterval, offset: f64) -> Self {
        Self {
            near: (
                OrderedFloat(interval.near.distance),
                OrderedFloat(interval.near.coefficient),
            ),
            far: (
                OrderedFloat(interval.far.distance),
                OrderedFloat(interval.far.coefficient),
            ),
            offset: OrderedFloat(offset),
        }
    }
}

/// Append-only store of built curves, shareable across threads
#[derive(Debug, Default)]
pub struct BezierCache {
    curves: RwLock<AHashMap<BezierKey, BezierCurve>>,
}

impl BezierCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the curve for this geometry, building it on first use
    pub fn curve(&self, interval: &FalloffInterval, offset: f64) -> BezierCurve {
        let key = BezierKey::new(interval, offset);
        {
            let curves = self.curves.read().unwrap_or_else(|e| e.into_inner());
            if let Some(curve) = curves.get(&key) {
                return *curve;
            }
        }
        let mut curves = self.curves.write().unwrap_or_else(|e| e.into_inner());
        *curves.entry(key).or_insert_with(|| {
            tracing::debug!(
                "Building bezier falloff for [{}, {}] -> {} (offset {})",
                interval.near.distance,
                interval.far.distance,
                interval.far.coefficient,
                offset
            );
            BezierCurve::new(interval, offset)
        })
    }

    pub fn len(&self) -> usize {
        self.curves.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct BezierFalloff {
    offset: f64,
    cache: Arc<BezierCache>,
}

impl BezierFalloff {
    /// Offsets of 0.5 and up fold the curve back past its anchors
    pub fn new(offset: f64, cache: Arc<BezierCache>) -> Result<Self> {
        if !(0.0..0.5).contains(&offset) {
            return Err(TtkError::InvalidConfig(format!(
                "bezier offset ({}) must be in [0, 0.5)",
                offset
            )));
        }
        Ok(Self { offset, cache })
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn cache(&self) -> &Arc<BezierCache> {
        &self.cache
    }
}

impl Default for BezierFalloff {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            cache: Arc::new(BezierCache::new()),
        }
    }
}

impl FalloffCurve for BezierFalloff {
    fn coefficient(&self, distance: Meters, interval: &FalloffInterval) -> Result<f64> {
        self.cache
            .curve(interval, self.offset)
            .solve(distance, self.offset)
    }
}
