//! Progressive probabilistic Hough transform over a binary edge map.
//!
//! Edge pixels are visited in raster order. Each visited pixel votes for every
//! accumulator angle; as soon as one (rho, theta) bin reaches the vote
//! threshold the corresponding line is traced through the mask in both
//! directions with fixed-point stepping. Traced pixels leave the mask, and when
//! the traced extent is long enough their votes are retracted and the segment
//! is emitted. Raster order keeps the output reproducible for a given map.
use super::{HoughOptions, LineSegment};
use crate::edges::EdgeMap;
use std::f32::consts::PI;

const SHIFT: i32 = 16;

const CLEARED: u8 = 0;
const PENDING: u8 = 1;
const VOTED: u8 = 2;

struct Accumulator {
    trig: Vec<(f32, f32)>,
    num_rho: usize,
    rho_offset: i32,
    votes: Vec<i32>,
}

impl Accumulator {
    fn new(width: i32, height: i32, opts: &HoughOptions) -> Self {
        let irho = 1.0 / opts.rho_resolution_px;
        let theta = opts.theta_resolution_deg.to_radians();
        let num_angle = ((PI / theta).round() as usize).max(1);
        let num_rho = (((width + height) * 2 + 1) as f32 * irho).round().max(1.0) as usize;
        let trig = (0..num_angle)
            .map(|n| {
                let angle = n as f32 * theta;
                (angle.cos() * irho, angle.sin() * irho)
            })
            .collect();
        Self {
            trig,
            num_rho,
            rho_offset: (num_rho as i32 - 1) / 2,
            votes: vec![0; num_angle * num_rho],
        }
    }

    #[inline]
    fn bin(&self, n: usize, x: i32, y: i32) -> Option<usize> {
        let (c, s) = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round() as i32 + self.rho_offset;
        (r >= 0 && (r as usize) < self.num_rho).then(|| n * self.num_rho + r as usize)
    }

    /// Adds one vote per angle and returns the highest resulting count.
    fn vote(&mut self, x: i32, y: i32) -> i32 {
        let mut best = i32::MIN;
        for n in 0..self.trig.len() {
            if let Some(i) = self.bin(n, x, y) {
                self.votes[i] += 1;
                best = best.max(self.votes[i]);
            }
        }
        best
    }

    /// Angles whose bin through (x, y) holds at least `min_votes`.
    fn candidates(&self, x: i32, y: i32, min_votes: i32) -> impl Iterator<Item = usize> + '_ {
        (0..self.trig.len()).filter(move |&n| {
            self.bin(n, x, y)
                .is_some_and(|i| self.votes[i] >= min_votes)
        })
    }

    fn retract(&mut self, x: i32, y: i32) {
        for n in 0..self.trig.len() {
            if let Some(i) = self.bin(n, x, y) {
                self.votes[i] -= 1;
            }
        }
    }
}

/// Working copy of the edge map with per-pixel states.
struct Mask {
    data: Vec<u8>,
    width: i32,
    height: i32,
}

impl Mask {
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && x < self.width && y >= 0 && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Farthest non-cleared pixel in each direction before the gap limit or
    /// the frame border.
    fn trace(&self, walker: Walker, line_gap: i32) -> [(i32, i32); 2] {
        let mut ends = [(walker.seed_x, walker.seed_y); 2];
        for (k, end) in ends.iter_mut().enumerate() {
            let mut gap = 0;
            for (x, y) in walker.steps(k == 1) {
                let Some(i) = self.index(x, y) else { break };
                if self.data[i] != CLEARED {
                    gap = 0;
                    *end = (x, y);
                } else {
                    gap += 1;
                    if gap > line_gap {
                        break;
                    }
                }
            }
        }
        ends
    }
}

/// Longest axis-aligned span of a traced line.
#[inline]
fn extent(ends: &[(i32, i32); 2]) -> i32 {
    (ends[1].0 - ends[0].0)
        .abs()
        .max((ends[1].1 - ends[0].1).abs())
}

/// Fixed-point walker along one accumulator direction.
///
/// Coordinates are kept in `i64` so the 16-bit fraction cannot overflow on
/// large frames.
#[derive(Clone, Copy)]
struct Walker {
    seed_x: i32,
    seed_y: i32,
    x0: i64,
    y0: i64,
    dx: i64,
    dy: i64,
    x_major: bool,
}

impl Walker {
    fn new(px: i32, py: i32, cos_t: f32, sin_t: f32) -> Self {
        // direction along the line is the normal rotated by 90°
        let a = -sin_t;
        let b = cos_t;
        let one = (1i64 << SHIFT) as f32;
        let half = 1i64 << (SHIFT - 1);
        let (x, y) = (i64::from(px), i64::from(py));
        if a.abs() > b.abs() {
            Self {
                seed_x: px,
                seed_y: py,
                x0: x,
                y0: (y << SHIFT) + half,
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * one / a.abs()).round() as i64,
                x_major: true,
            }
        } else {
            Self {
                seed_x: px,
                seed_y: py,
                x0: (x << SHIFT) + half,
                y0: y,
                dx: (a * one / b.abs()).round() as i64,
                dy: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    /// Pixel positions from the seed outwards; `reverse` walks the other way.
    fn steps(self, reverse: bool) -> impl Iterator<Item = (i32, i32)> {
        let (dx, dy) = if reverse {
            (-self.dx, -self.dy)
        } else {
            (self.dx, self.dy)
        };
        let x_major = self.x_major;
        (0i64..).map(move |k| {
            let x = self.x0 + k * dx;
            let y = self.y0 + k * dy;
            let (x, y) = if x_major { (x, y >> SHIFT) } else { (x >> SHIFT, y) };
            (x as i32, y as i32)
        })
    }
}

/// Detect line segments in `edges`. The map is consumed and reused as the
/// working mask.
///
/// Neighbouring angle bins fill at almost the same rate along a straight run,
/// so every angle within one vote of the winner is traced and the longest
/// walk is kept.
pub fn probabilistic_hough(edges: EdgeMap, opts: &HoughOptions) -> Vec<LineSegment> {
    let width = edges.w as i32;
    let height = edges.h as i32;
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut acc = Accumulator::new(width, height, opts);
    let mut mask = Mask {
        data: edges.into_raw(),
        width,
        height,
    };

    let points: Vec<(i32, i32)> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&(x, y)| mask.index(x, y).is_some_and(|i| mask.data[i] == PENDING))
        .collect();

    let threshold = opts.vote_threshold as i32;
    let line_gap = opts.max_line_gap_px as i32;
    let line_length = opts.min_line_length_px as i32;
    let mut lines = Vec::new();

    for &(px, py) in &points {
        let Some(seed) = mask.index(px, py) else {
            continue;
        };
        if mask.data[seed] == CLEARED {
            continue;
        }
        mask.data[seed] = VOTED;
        let best_votes = acc.vote(px, py);
        if best_votes < threshold {
            continue;
        }

        let min_votes = threshold.max(best_votes - 1);
        let traced = acc
            .candidates(px, py, min_votes)
            .map(|n| {
                let (cos_t, sin_t) = acc.trig[n];
                let walker = Walker::new(px, py, cos_t, sin_t);
                (walker, mask.trace(walker, line_gap))
            })
            .reduce(|best, cand| {
                if extent(&cand.1) > extent(&best.1) {
                    cand
                } else {
                    best
                }
            });
        let Some((walker, line_end)) = traced else {
            continue;
        };

        let good_line = extent(&line_end) >= line_length;

        for (k, &end) in line_end.iter().enumerate() {
            for (x, y) in walker.steps(k == 1) {
                let Some(i) = mask.index(x, y) else { break };
                if mask.data[i] != CLEARED {
                    if good_line && mask.data[i] == VOTED {
                        acc.retract(x, y);
                    }
                    mask.data[i] = CLEARED;
                }
                if (x, y) == end {
                    break;
                }
            }
        }

        if good_line {
            lines.push(LineSegment::from([
                line_end[0].0,
                line_end[0].1,
                line_end[1].0,
                line_end[1].1,
            ]));
            if opts.max_lines.is_some_and(|max| lines.len() >= max) {
                break;
            }
        }
    }

    lines
}
