//! Collision geometry for swept hit tests
//!
//! Positions are sampled once per frame, so a fast bolt can jump clean over
//! a target between samples. Testing the segment each body swept during the
//! frame against the other's closes that gap without substepping.

use glam::{DVec2, Vec2};

/// Relative threshold on `|u x v|^2 / (|u|^2 |v|^2)` below which two
/// segments are treated as parallel
pub const PARALLEL_EPSILON: f64 = 1e-8;

/// Unit vector along `v`, or `+X` when `v` has no usable direction
#[inline]
pub fn direction_or_default(v: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(Vec2::X)
}

/// Closest point to `p` on segment `a`-`b`
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// True if the point of segment `a`-`b` nearest to `center` lies within
/// `radius` of it
pub fn segment_circle_hit(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    closest_point_on_segment(a, b, center).distance_squared(center) <= radius * radius
}

fn point_segment_distance_sq(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (a + ab * t).distance_squared(p)
}

/// Squared minimum distance between segments `a`-`b` and `c`-`d`
///
/// Callers compare against `(r1 + r2)^2`. Degenerate (zero-length) segments
/// are fine: a body that did not move sweeps a point.
pub fn segment_segment_distance_sq(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> f32 {
    let (a, b, c, d) = (a.as_dvec2(), b.as_dvec2(), c.as_dvec2(), d.as_dvec2());
    let u = b - a;
    let v = d - c;
    let w = a - c;

    let uu = u.dot(u);
    let uv = u.dot(v);
    let vv = v.dot(v);
    let uw = u.dot(w);
    let vw = v.dot(w);
    let denom = uu * vv - uv * uv;

    if denom <= PARALLEL_EPSILON * uu * vv {
        // Parallel or degenerate: the minimum sits at one of the endpoints
        let best = point_segment_distance_sq(a, c, d)
            .min(point_segment_distance_sq(b, c, d))
            .min(point_segment_distance_sq(c, a, b))
            .min(point_segment_distance_sq(d, a, b));
        return best as f32;
    }

    let mut s_num = uv * vw - vv * uw;
    let mut s_den = denom;
    let mut t_num = uu * vw - uv * uw;
    let mut t_den = denom;

    if s_num < 0.0 {
        s_num = 0.0;
        t_num = vw;
        t_den = vv;
    } else if s_num > s_den {
        s_num = s_den;
        t_num = vw + uv;
        t_den = vv;
    }

    if t_num < 0.0 {
        t_num = 0.0;
        if -uw < 0.0 {
            s_num = 0.0;
        } else if -uw > uu {
            s_num = s_den;
        } else {
            s_num = -uw;
            s_den = uu;
        }
    } else if t_num > t_den {
        t_num = t_den;
        if uv - uw < 0.0 {
            s_num = 0.0;
        } else if uv - uw > uu {
            s_num = s_den;
        } else {
            s_num = uv - uw;
            s_den = uu;
        }
    }

    let sc = s_num / s_den;
    let tc = t_num / t_den;
    (w + u * sc - v * tc).length_squared() as f32
}
