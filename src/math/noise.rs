//! Lattice noise shared by the smoke material.
//!
//! Both functions hash integer lattice coordinates instead of indexing a permutation
//! table, so the lattice has no period to wrap and `src/shaders/smoke.wgsl` can carry
//! an exact copy of the arithmetic. Keep the two in sync.

use glam::{Vec2, Vec3};

/// Cube-edge gradient set for 3D gradient noise
const GRADIENTS: [Vec3; 12] = [
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(-1.0, 1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(-1.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, -1.0),
    Vec3::new(-1.0, 0.0, -1.0),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(0.0, -1.0, 1.0),
    Vec3::new(0.0, 1.0, -1.0),
    Vec3::new(0.0, -1.0, -1.0),
];

/// Integer avalanche hash
#[inline]
pub fn hash_u32(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

#[inline]
fn hash2(ix: i32, iy: i32) -> u32 {
    hash_u32(ix as u32 ^ hash_u32(iy as u32))
}

#[inline]
fn hash3(ix: i32, iy: i32, iz: i32) -> u32 {
    hash_u32(ix as u32 ^ hash_u32(iy as u32 ^ hash_u32(iz as u32)))
}

/// Quintic fade 6t^5 - 15t^4 + 10t^3
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Cubic smoothstep 3t^2 - 2t^3
#[inline]
fn smooth(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn corner(cell: [i32; 3], offset: [i32; 3], local: Vec3) -> f32 {
    let h = hash3(cell[0] + offset[0], cell[1] + offset[1], cell[2] + offset[2]);
    let gradient = GRADIENTS[(h % 12) as usize];
    let d = local - Vec3::new(offset[0] as f32, offset[1] as f32, offset[2] as f32);
    gradient.dot(d)
}

/// 3D gradient noise in [-1, 1]
///
/// Zero at every integer lattice point; continuous everywhere.
pub fn gradient_noise3(p: Vec3) -> f32 {
    let floor = p.floor();
    let cell = [floor.x as i32, floor.y as i32, floor.z as i32];
    let local = p - floor;

    let n000 = corner(cell, [0, 0, 0], local);
    let n100 = corner(cell, [1, 0, 0], local);
    let n010 = corner(cell, [0, 1, 0], local);
    let n110 = corner(cell, [1, 1, 0], local);
    let n001 = corner(cell, [0, 0, 1], local);
    let n101 = corner(cell, [1, 0, 1], local);
    let n011 = corner(cell, [0, 1, 1], local);
    let n111 = corner(cell, [1, 1, 1], local);

    let u = fade(local.x);
    let v = fade(local.y);
    let w = fade(local.z);

    let x00 = lerp(n000, n100, u);
    let x10 = lerp(n010, n110, u);
    let x01 = lerp(n001, n101, u);
    let x11 = lerp(n011, n111, u);

    let y0 = lerp(x00, x10, v);
    let y1 = lerp(x01, x11, v);

    lerp(y0, y1, w).clamp(-1.0, 1.0)
}

/// 2D value noise in [0, 1] with smoothstep interpolation
pub fn value_noise2(p: Vec2) -> f32 {
    let floor = p.floor();
    let ix = floor.x as i32;
    let iy = floor.y as i32;
    let local = p - floor;

    let value = |dx: i32, dy: i32| hash2(ix + dx, iy + dy) as f32 / u32::MAX as f32;

    let a = value(0, 0);
    let b = value(1, 0);
    let c = value(0, 1);
    let d = value(1, 1);

    let u = smooth(local.x);
    let v = smooth(local.y);

    lerp(lerp(a, b, u), lerp(c, d, u), v).clamp(0.0, 1.0)
}
