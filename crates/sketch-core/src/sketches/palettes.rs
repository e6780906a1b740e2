use glam::Vec3;

/// A handful of five-color palettes, as 0xRRGGBB.
pub const PALETTES: [[u32; 5]; 8] = [
    [0x69d2e7, 0xa7dbd8, 0xe0e4cc, 0xf38630, 0xfa6900],
    [0xfe4365, 0xfc9d9a, 0xf9cdad, 0xc8c8a9, 0x83af9b],
    [0xecd078, 0xd95b43, 0xc02942, 0x542437, 0x53777a],
    [0x556270, 0x4ecdc4, 0xc7f464, 0xff6b6b, 0xc44d58],
    [0x774f38, 0xe08e79, 0xf1d4af, 0xece5ce, 0xc5e0dc],
    [0xe8ddcb, 0xcdb380, 0x036564, 0x033649, 0x031634],
    [0x490a3d, 0xbd1550, 0xe97f02, 0xf8ca00, 0x8a9b0f],
    [0x594f4f, 0x547980, 0x45ada8, 0x9de0ad, 0xe5fcc2],
];

#[inline]
pub fn palette_color(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}
