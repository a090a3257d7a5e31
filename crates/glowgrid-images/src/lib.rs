//! Built-in pictures for the glowgrid LED hat.

use glowgrid_core::{GRID_HEIGHT, GRID_WIDTH, Rgb};

/// An 8×8 picture, indexed `[row][column]`.
pub type Picture = [[Rgb; GRID_WIDTH]; GRID_HEIGHT];

const K: Rgb = Rgb::BLACK;

// Pudding palette
const LEAF: Rgb = Rgb(0, 255, 0);
const STEM: Rgb = Rgb(0, 132, 0);
const BERRY: Rgb = Rgb(255, 0, 0);
const SAUCE: Rgb = Rgb(132, 132, 132);
const CRUMB: Rgb = Rgb(145, 120, 83);
const DARK: Rgb = Rgb(96, 66, 20);
const MID: Rgb = Rgb(107, 74, 25);
const SHADE: Rgb = Rgb(72, 49, 15);

/// Christmas pudding with a sprig of holly.
pub const PUDDING: Picture = [
    [K, K, K, LEAF, STEM, K, K, K],
    [K, K, K, SAUCE, LEAF, BERRY, K, K],
    [K, K, SAUCE, SAUCE, SAUCE, SAUCE, K, K],
    [K, SAUCE, CRUMB, DARK, DARK, CRUMB, SAUCE, K],
    [K, MID, MID, MID, MID, DARK, DARK, K],
    [K, DARK, MID, MID, MID, DARK, DARK, K],
    [K, SHADE, MID, MID, DARK, DARK, SHADE, K],
    [K, K, SHADE, DARK, DARK, SHADE, K, K],
];

// Angel palette
const WING: Rgb = Rgb(132, 132, 0);
const HALO: Rgb = Rgb(255, 255, 0);
const HAIR: Rgb = Rgb(132, 0, 132);
const ROBE: Rgb = Rgb(198, 198, 198);

/// Angel with halo and wings.
pub const ANGEL: Picture = [
    [K, WING, K, HALO, HALO, K, WING, K],
    [WING, WING, K, HAIR, HAIR, K, WING, WING],
    [WING, ROBE, WING, HAIR, HAIR, WING, ROBE, WING],
    [WING, WING, ROBE, ROBE, ROBE, ROBE, WING, WING],
    [K, WING, WING, ROBE, ROBE, WING, WING, K],
    [K, K, WING, ROBE, ROBE, WING, K, K],
    [K, K, K, ROBE, ROBE, K, K, K],
    [K, K, ROBE, ROBE, ROBE, ROBE, K, K],
];

/// Look up a built-in picture by name.
pub fn picture(name: &str) -> Option<&'static Picture> {
    match name {
        "pudding" => Some(&PUDDING),
        "angel" => Some(&ANGEL),
        _ => None,
    }
}

/// Rotate `picture` clockwise by `quarter_turns` × 90°.
pub fn rotate(picture: &Picture, quarter_turns: u8) -> Picture {
    let mut out = *picture;
    for _ in 0..quarter_turns % 4 {
        let src = out;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, px) in row.iter_mut().enumerate() {
                *px = src[GRID_HEIGHT - 1 - x][y];
            }
        }
    }
    out
}

/// Flatten a picture into row-major pixels.
pub fn to_pixels(picture: &Picture) -> Vec<Rgb> {
    picture.iter().flatten().copied().collect()
}
