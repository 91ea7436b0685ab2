//! Improved Perlin gradient noise over a fixed permutation table.

use lux_math::Point3;

/// Ken Perlin's reference permutation, repeated once so lookups of
/// `PERM[i + 1]` never wrap.
const PERM: [u8; 512] = {
    const BASE: [u8; 256] = [
        151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30,
        69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94,
        252, 219, 203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171,
        168, 68, 175, 74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
        60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161,
        1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159,
        86, 164, 100, 109, 198, 173, 186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147,
        118, 126, 255, 82, 85, 212, 207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183,
        170, 213, 119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, 129,
        22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104, 218, 246, 97, 228,
        251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241, 81, 51, 145, 235, 249, 14, 239,
        107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204, 176, 115, 121, 50, 45, 127, 4,
        150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215,
        61, 156, 180,
    ];
    let mut table = [0u8; 512];
    let mut i = 0;
    while i < 512 {
        table[i] = BASE[i % 256];
        i += 1;
    }
    table
};

/// Stateless noise source; all state is the compile-time permutation table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Perlin;

impl Perlin {
    pub fn new() -> Self {
        Self
    }

    /// Single-octave noise in roughly `[-1, 1]`.
    pub fn raw_noise(&self, p: Point3) -> f32 {
        let (fx, fy, fz) = (p.x.floor(), p.y.floor(), p.z.floor());
        let xi = (fx as i32 & 255) as usize;
        let yi = (fy as i32 & 255) as usize;
        let zi = (fz as i32 & 255) as usize;
        let (x, y, z) = (p.x - fx, p.y - fy, p.z - fz);

        let hash = |dx: usize, dy: usize, dz: usize| -> u8 {
            let a = PERM[xi + dx] as usize;
            let b = PERM[a + yi + dy] as usize;
            PERM[b + zi + dz]
        };

        let c000 = grad(hash(0, 0, 0), x, y, z);
        let c100 = grad(hash(1, 0, 0), x - 1.0, y, z);
        let c010 = grad(hash(0, 1, 0), x, y - 1.0, z);
        let c110 = grad(hash(1, 1, 0), x - 1.0, y - 1.0, z);
        let c001 = grad(hash(0, 0, 1), x, y, z - 1.0);
        let c101 = grad(hash(1, 0, 1), x - 1.0, y, z - 1.0);
        let c011 = grad(hash(0, 1, 1), x, y - 1.0, z - 1.0);
        let c111 = grad(hash(1, 1, 1), x - 1.0, y - 1.0, z - 1.0);

        let (u, v, w) = (fade(x), fade(y), fade(z));

        let x0 = lerp(c000, c100, u);
        let x1 = lerp(c010, c110, u);
        let x2 = lerp(c001, c101, u);
        let x3 = lerp(c011, c111, u);

        lerp(lerp(x0, x1, v), lerp(x2, x3, v), w)
    }

    /// Fractal sum of `octave_count` octaves, each at double the frequency
    /// and `persistence` times the amplitude of the previous, normalized by
    /// the total amplitude.
    pub fn octave_noise(&self, p: Point3, frequency: f32, octave_count: u32, persistence: f32) -> f32 {
        let mut sum = 0.0;
        let mut max_value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = frequency;

        for _ in 0..octave_count {
            sum += self.raw_noise(p * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_value > 0.0 {
            sum / max_value
        } else {
            0.0
        }
    }
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, weight: f32) -> f32 {
    a + weight * (b - a)
}

/// Dot product of the offset with one of the twelve cube-edge gradients
/// (four repeated to fill sixteen slots).
#[inline]
fn grad(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    match hash & 0xF {
        0x0 => x + y,
        0x1 => -x + y,
        0x2 => x - y,
        0x3 => -x - y,
        0x4 => x + z,
        0x5 => -x + z,
        0x6 => x - z,
        0x7 => -x - z,
        0x8 => y + z,
        0x9 => -y + z,
        0xA => y - z,
        0xB => -y - z,
        0xC => y + x,
        0xD => -y + z,
        0xE => y - x,
        _ => -y - z,
    }
}
