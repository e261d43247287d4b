//! Sticker geometry of the 3x3x3 cube.
//!
//! Every sticker (facelet) is identified by the position of the cubie it sits
//! on, each axis in `-1..=1`, and by the outward normal of the face it shows
//! on. A clockwise face turn, seen from outside, rotates every sticker in that
//! layer by -90 degrees about the face normal. The move permutations and the
//! corner/edge slot tables are all derived from that single rule at compile
//! time.
//!
//! Coordinates: x points right, y points up, z points toward the viewer
//! (out of the front face).

/// An integer vector in cube space.
pub type Vec3 = (i32, i32, i32);

/// Number of stickers on the cube.
pub const FACELETS: usize = 54;

/// Sticker index of a face's center within its 3x3 grid.
pub const CENTER: usize = 4;

/// Outward normals in storage order: U, R, F, D, L, B.
pub const FACE_NORMALS: [Vec3; 6] = [
    (0, 1, 0),
    (1, 0, 0),
    (0, 0, 1),
    (0, -1, 0),
    (-1, 0, 0),
    (0, 0, -1),
];

/// Axis order used inside a slot: U/D first, then F/B, then R/L.
///
/// Putting the U/D sticker (or the F/B sticker for middle-layer edges) first
/// makes index 0 of every slot its orientation reference.
const AXIS_PRIORITY: [usize; 3] = [1, 2, 0];

/// Gather tables for every face and quarter-turn count.
///
/// `TURN_TABLES[face][turns - 1][i]` is the facelet whose sticker lands on
/// facelet `i` after `turns` clockwise quarter turns of `face`.
pub const TURN_TABLES: [[[u8; FACELETS]; 3]; 6] = build_turn_tables();

/// The eight corner slots, each listing its three facelets (U/D facelet first).
pub const CORNER_SLOTS: [[usize; 3]; 8] = build_slots::<3, 8>(3, false);

/// The twelve edge slots, each listing its two facelets (reference facelet first).
pub const EDGE_SLOTS: [[usize; 2]; 12] = build_slots::<2, 12>(2, false);

/// The four edge slots of the middle layer between U and D (FR, FL, BR, BL).
pub const SLICE_EDGE_SLOTS: [[usize; 2]; 4] = build_slots::<2, 4>(2, true);

/// Cubie position of the sticker at `row`, `col` of `face`.
///
/// Each grid is read as seen from outside the cube with U above F. U's top
/// row borders B and D's top row borders F.
pub const fn facelet_position(face: usize, row: i32, col: i32) -> Vec3 {
    match face {
        0 => (col - 1, 1, row - 1),
        1 => (1, 1 - row, 1 - col),
        2 => (col - 1, 1 - row, 1),
        3 => (col - 1, -1, 1 - row),
        4 => (-1, 1 - row, col - 1),
        _ => (1 - col, 1 - row, -1),
    }
}

/// Face that a facelet index belongs to.
#[inline(always)]
pub const fn face_of(facelet: usize) -> usize {
    facelet / 9
}

const fn same(a: Vec3, b: Vec3) -> bool {
    a.0 == b.0 && a.1 == b.1 && a.2 == b.2
}

const fn dot(a: Vec3, b: Vec3) -> i32 {
    a.0 * b.0 + a.1 * b.1 + a.2 * b.2
}

const fn cross(a: Vec3, b: Vec3) -> Vec3 {
    (
        a.1 * b.2 - a.2 * b.1,
        a.2 * b.0 - a.0 * b.2,
        a.0 * b.1 - a.1 * b.0,
    )
}

const fn component(v: Vec3, axis: usize) -> i32 {
    match axis {
        0 => v.0,
        1 => v.1,
        _ => v.2,
    }
}

const fn unit(axis: usize, sign: i32) -> Vec3 {
    match axis {
        0 => (sign, 0, 0),
        1 => (0, sign, 0),
        _ => (0, 0, sign),
    }
}

/// Rotates `v` by -90 degrees about the unit vector `normal`.
///
/// Rodrigues' formula with cos = 0 and sin = -1: `n (n . v) - n x v`.
const fn rotate_clockwise(v: Vec3, normal: Vec3) -> Vec3 {
    let c = cross(normal, v);
    let d = dot(normal, v);
    (normal.0 * d - c.0, normal.1 * d - c.1, normal.2 * d - c.2)
}

/// Finds the facelet with the given cubie position and outward normal.
const fn facelet_at(position: Vec3, normal: Vec3) -> usize {
    let mut face = 0;
    while face < 6 {
        if same(FACE_NORMALS[face], normal) {
            let mut index = 0;
            while index < 9 {
                let candidate = facelet_position(face, (index / 3) as i32, (index % 3) as i32);
                if same(candidate, position) {
                    return face * 9 + index;
                }
                index += 1;
            }
        }
        face += 1;
    }
    panic!("no facelet matches position and normal");
}

/// Gather table for a single clockwise quarter turn of `face`.
const fn build_quarter_turn(face: usize) -> [u8; FACELETS] {
    let normal = FACE_NORMALS[face];
    let mut table = [0u8; FACELETS];

    let mut src = 0;
    while src < FACELETS {
        let src_face = src / 9;
        let position = facelet_position(src_face, ((src % 9) / 3) as i32, (src % 3) as i32);

        // only stickers in the turning layer move
        let dest = if dot(position, normal) == 1 {
            facelet_at(
                rotate_clockwise(position, normal),
                rotate_clockwise(FACE_NORMALS[src_face], normal),
            )
        } else {
            src
        };

        table[dest] = src as u8;
        src += 1;
    }
    table
}

/// Builds the composed tables for 1, 2 and 3 quarter turns of each face.
const fn build_turn_tables() -> [[[u8; FACELETS]; 3]; 6] {
    let mut tables = [[[0u8; FACELETS]; 3]; 6];

    let mut face = 0;
    while face < 6 {
        let quarter = build_quarter_turn(face);
        tables[face][0] = quarter;

        let mut turns = 1;
        while turns < 3 {
            let mut i = 0;
            while i < FACELETS {
                tables[face][turns][i] = tables[face][turns - 1][quarter[i] as usize];
                i += 1;
            }
            turns += 1;
        }
        face += 1;
    }
    tables
}

/// Facelets of the cubie at `position`, in [`AXIS_PRIORITY`] order.
const fn slot_facelets<const N: usize>(position: Vec3) -> [usize; N] {
    let mut facelets = [0usize; N];
    let mut count = 0;

    let mut k = 0;
    while k < 3 {
        let axis = AXIS_PRIORITY[k];
        let sign = component(position, axis);
        if sign != 0 {
            facelets[count] = facelet_at(position, unit(axis, sign));
            count += 1;
        }
        k += 1;
    }
    facelets
}

/// Collects every cubie with `visible` stickers as a slot.
///
/// With `middle_only`, keeps only cubies in the layer between U and D.
const fn build_slots<const N: usize, const COUNT: usize>(
    visible: usize,
    middle_only: bool,
) -> [[usize; N]; COUNT] {
    let mut slots = [[0usize; N]; COUNT];
    let mut count = 0;

    let mut x = -1;
    while x <= 1 {
        let mut y = -1;
        while y <= 1 {
            let mut z = -1;
            while z <= 1 {
                let nonzero = (x != 0) as usize + (y != 0) as usize + (z != 0) as usize;
                if nonzero == visible && (!middle_only || y == 0) {
                    slots[count] = slot_facelets::<N>((x, y, z));
                    count += 1;
                }
                z += 1;
            }
            y += 1;
        }
        x += 1;
    }

    assert!(count == COUNT, "slot count mismatch");
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_tables_are_permutations() {
        for (face, tables) in TURN_TABLES.iter().enumerate() {
            for (turns, table) in tables.iter().enumerate() {
                let mut seen = [false; FACELETS];
                for &src in table {
                    assert!(
                        !seen[src as usize],
                        "face {face} turns {} reads facelet {src} twice",
                        turns + 1
                    );
                    seen[src as usize] = true;
                }
            }
        }
    }

    #[test]
    fn test_quarter_turn_moves_twenty_stickers() {
        for (face, tables) in TURN_TABLES.iter().enumerate() {
            let moved = tables[0]
                .iter()
                .enumerate()
                .filter(|&(i, &src)| i != src as usize)
                .count();
            assert_eq!(moved, 20, "face {face} should move 8 own and 12 side stickers");
        }
    }

    #[test]
    fn test_centers_never_move() {
        for tables in &TURN_TABLES {
            for table in tables {
                for face in 0..6 {
                    let center = face * 9 + CENTER;
                    assert_eq!(table[center] as usize, center);
                }
            }
        }
    }

    #[test]
    fn test_slots_cover_every_non_center_facelet_once() {
        let mut seen = [0u8; FACELETS];
        for slot in &CORNER_SLOTS {
            for &facelet in slot {
                seen[facelet] += 1;
            }
        }
        for slot in &EDGE_SLOTS {
            for &facelet in slot {
                seen[facelet] += 1;
            }
        }
        for (facelet, &count) in seen.iter().enumerate() {
            let expected = if facelet % 9 == CENTER { 0 } else { 1 };
            assert_eq!(count, expected, "facelet {facelet}");
        }
    }

    #[test]
    fn test_corner_reference_is_on_up_or_down() {
        for slot in &CORNER_SLOTS {
            let face = face_of(slot[0]);
            assert!(face == 0 || face == 3, "corner {slot:?} starts on face {face}");
        }
    }

    #[test]
    fn test_slice_edges_start_on_front_or_back() {
        for slot in &SLICE_EDGE_SLOTS {
            let face = face_of(slot[0]);
            assert!(face == 2 || face == 5, "slice edge {slot:?} starts on face {face}");
        }
    }
}
