//! Creature sprites.
//!
//! A creature is pure data: a fixed upper body plus two alternating leg
//! strides. The renderer only ever sees the lines of the current frame, so
//! adding a creature means adding a table entry here.

/// A multi-line ASCII creature.
#[derive(Debug)]
pub struct Creature {
    pub name: &'static str,
    /// Lines shared by every frame
    pub body: &'static [&'static str],
    /// Leg lines, picked by offset parity
    pub strides: [&'static [&'static str]; 2],
}

pub const CAT: Creature = Creature {
    name: "cat",
    body: &[
        r"               ________________                 ",
        r"         _|::||                |                ",
        r"      _|::|   |  I Love Cats!  |                ",
        r"     |::|     |________________|                ",
        r"                               |        /\**/\ ",
        r"                               |       _( >_> ) ",
        r"                               |  (_//   u--u)  ",
        r"                                 \==(  ___||)   ",
    ],
    strides: [
        &[
            r"                             ,dP /b/=( /P /b\  ",
            r"                             |8 || 8\=== || 8  ",
            r"                             'b,  ,P  'b,  ,P   ",
        ],
        &[
            r"                             ,dP /b/=( /P /b\  ",
            r"                             |8 == 8\=== == 8  ",
            r"                             'b,  ,P  'b,  ,P   ",
        ],
    ],
};

/// Every creature that can be selected by name
pub const CREATURES: &[Creature] = &[CAT];

impl Creature {
    /// Look up a creature, falling back to the cat.
    pub fn by_name(name: Option<&str>) -> &'static Creature {
        name.and_then(|name| {
            CREATURES
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
        })
        .unwrap_or(&CREATURES[0])
    }

    /// Which stride is shown at `offset`. Odd offsets, negative ones
    /// included, use the first stride.
    pub fn stride(offset: i32) -> usize {
        if offset.rem_euclid(2) == 1 {
            0
        } else {
            1
        }
    }

    /// Number of lines in every frame.
    pub fn height(&self) -> usize {
        self.body.len() + self.strides[0].len()
    }

    /// Lines of the frame drawn at `offset`.
    pub fn frame(&self, offset: i32) -> impl Iterator<Item = &'static str> + '_ {
        self.body
            .iter()
            .chain(self.strides[Self::stride(offset)].iter())
            .copied()
    }
}
