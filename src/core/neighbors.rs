use crate::core::alphabet::{bits_to_char, char_to_bits};
use crate::core::constants::ALPHABET;
use crate::error::GeohashError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the eight compass directions around a geohash cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Direction {
    /// All directions, cardinals first.
    pub const ALL: [Direction; 8] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
        Direction::TopLeft,
        Direction::TopRight,
        Direction::BottomLeft,
        Direction::BottomRight,
    ];

    /// Lower-case name, e.g. `"topleft"`.
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::TopLeft => "topleft",
            Direction::TopRight => "topright",
            Direction::BottomLeft => "bottomleft",
            Direction::BottomRight => "bottomright",
        }
    }

    pub fn is_cardinal(&self) -> bool {
        matches!(
            self,
            Direction::Top | Direction::Bottom | Direction::Left | Direction::Right
        )
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::TopLeft => Direction::BottomRight,
            Direction::TopRight => Direction::BottomLeft,
            Direction::BottomLeft => Direction::TopRight,
            Direction::BottomRight => Direction::TopLeft,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the (sub)hash being shifted has an even or odd number of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parity {
    Even,
    Odd,
}

impl Parity {
    fn of_len(len: usize) -> Self {
        if len % 2 == 0 { Parity::Even } else { Parity::Odd }
    }
}

/// Transition data for one cardinal direction at one parity.
struct EdgeTable {
    /// Alphabet index of a last character to the alphabet index of its replacement.
    next: [u8; 32],
    /// Bit `i` set when alphabet index `i` sits on the parent cell's edge.
    border: u32,
}

impl EdgeTable {
    fn is_border(&self, index: u8) -> bool {
        self.border & (1 << index) != 0
    }
}

const fn alphabet_index(c: u8) -> usize {
    let mut i = 0;
    while i < ALPHABET.len() {
        if ALPHABET[i] == c {
            return i;
        }
        i += 1;
    }
    panic!("character outside the geohash alphabet");
}

/// The replacement for a last character `c` is the alphabet character at the position
/// `c` occupies in `neighbors`.
const fn edge_table(neighbors: &[u8; 32], borders: &[u8]) -> EdgeTable {
    let mut next = [0u8; 32];
    let mut pos = 0;
    while pos < neighbors.len() {
        next[alphabet_index(neighbors[pos])] = pos as u8;
        pos += 1;
    }

    let mut border = 0u32;
    let mut i = 0;
    while i < borders.len() {
        border |= 1 << alphabet_index(borders[i]);
        i += 1;
    }

    EdgeTable { next, border }
}

/// Even-parity tables indexed by `cardinal_index`: top, bottom, left, right.
static EVEN_TABLES: [EdgeTable; 4] = [
    edge_table(b"p0r21436x8zb9dcf5h7kjnmqesgutwvy", b"prxz"),
    edge_table(b"14365h7k9dcfesgujnmqp0r2twvyx8zb", b"028b"),
    edge_table(b"238967debc01fg45kmstqrwxuvhjyznp", b"0145hjnp"),
    edge_table(b"bc01fg45238967deuvhjyznpkmstqrwx", b"bcfguvyz"),
];

fn cardinal_index(direction: Direction) -> usize {
    match direction {
        Direction::Top => 0,
        Direction::Bottom => 1,
        Direction::Left => 2,
        Direction::Right => 3,
        _ => unreachable!("diagonal directions are composed from cardinals"),
    }
}

/// Odd-length hashes swap the roles of latitude and longitude, so their tables are the
/// even tables under bottom/left and top/right exchange.
fn table_for(direction: Direction, parity: Parity) -> &'static EdgeTable {
    let row = match parity {
        Parity::Even => direction,
        Parity::Odd => match direction {
            Direction::Bottom => Direction::Left,
            Direction::Left => Direction::Bottom,
            Direction::Top => Direction::Right,
            Direction::Right => Direction::Top,
            diagonal => diagonal,
        },
    };
    &EVEN_TABLES[cardinal_index(row)]
}

/// Shifts a hash one cell in a cardinal direction.
///
/// Walks from the last character backward, replacing each through the transition table
/// and carrying into the preceding character only while the replaced one was a border
/// character. A carry past the first character is dropped.
fn shift(hash: &str, direction: Direction) -> Result<String, GeohashError> {
    let mut digits = hash
        .chars()
        .map(|c| char_to_bits(c.to_ascii_lowercase()))
        .collect::<Result<Vec<u8>, _>>()?;

    if digits.is_empty() {
        return Err(GeohashError::EmptyInput);
    }

    for pos in (0..digits.len()).rev() {
        let table = table_for(direction, Parity::of_len(pos + 1));
        let digit = digits[pos];
        digits[pos] = table.next[digit as usize];
        if !table.is_border(digit) {
            break;
        }
    }

    Ok(digits.into_iter().map(bits_to_char).collect())
}

/// Returns the hash of the cell adjacent to `hash` in `direction`.
///
/// Input is lower-cased first. Diagonal directions shift horizontally, then vertically.
///
/// # Example
/// ```
/// use geohash_rs::{Direction, adjacent};
///
/// assert_eq!(adjacent("9q8yyk", Direction::Top).unwrap(), "9q8yym");
/// assert_eq!(adjacent("9Q8YYK", Direction::TopLeft).unwrap(), "9q8yyj");
/// ```
///
/// # Errors
///
/// - [`GeohashError::EmptyInput`] - `hash` is empty
/// - [`GeohashError::InvalidCharacter`] - `hash` contains a character outside the alphabet
pub fn adjacent(hash: &str, direction: Direction) -> Result<String, GeohashError> {
    match direction {
        Direction::TopLeft => shift(&shift(hash, Direction::Left)?, Direction::Top),
        Direction::TopRight => shift(&shift(hash, Direction::Right)?, Direction::Top),
        Direction::BottomLeft => shift(&shift(hash, Direction::Left)?, Direction::Bottom),
        Direction::BottomRight => shift(&shift(hash, Direction::Right)?, Direction::Bottom),
        cardinal => shift(hash, cardinal),
    }
}

/// The eight hashes surrounding a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    pub top: String,
    pub bottom: String,
    pub left: String,
    pub right: String,
    pub topleft: String,
    pub topright: String,
    pub bottomleft: String,
    pub bottomright: String,
}

impl Neighbors {
    pub fn get(&self, direction: Direction) -> &str {
        match direction {
            Direction::Top => &self.top,
            Direction::Bottom => &self.bottom,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::TopLeft => &self.topleft,
            Direction::TopRight => &self.topright,
            Direction::BottomLeft => &self.bottomleft,
            Direction::BottomRight => &self.bottomright,
        }
    }

    /// Iterates `(direction, hash)` pairs in [`Direction::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &str)> + '_ {
        Direction::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Mapping keyed by lower-case direction names.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(d, hash)| (d.name().to_string(), hash.to_string()))
            .collect()
    }
}

/// Computes all eight neighbors of a geohash.
///
/// Cardinals are shifted directly; each diagonal shifts an already shifted horizontal
/// neighbor vertically.
///
/// # Example
/// ```
/// use geohash_rs::neighbors;
///
/// let n = neighbors("9q8yyk").unwrap();
/// assert_eq!(n.top, "9q8yym");
/// assert_eq!(n.bottomleft, "9q8yy5");
/// ```
///
/// # Errors
///
/// - [`GeohashError::EmptyInput`] - `hash` is empty
/// - [`GeohashError::InvalidCharacter`] - `hash` contains a character outside the alphabet
pub fn neighbors(hash: &str) -> Result<Neighbors, GeohashError> {
    let top = shift(hash, Direction::Top)?;
    let bottom = shift(hash, Direction::Bottom)?;
    let right = shift(hash, Direction::Right)?;
    let left = shift(hash, Direction::Left)?;

    Ok(Neighbors {
        topleft: shift(&left, Direction::Top)?,
        topright: shift(&right, Direction::Top)?,
        bottomright: shift(&right, Direction::Bottom)?,
        bottomleft: shift(&left, Direction::Bottom)?,
        top,
        bottom,
        left,
        right,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_neighbors_known_hash() -> Result<(), GeohashError> {
        let n = neighbors("9q8yyk")?;
        assert_eq!(n.top, "9q8yym");
        assert_eq!(n.bottom, "9q8yy7");
        assert_eq!(n.right, "9q8yys");
        assert_eq!(n.left, "9q8yyh");
        assert_eq!(n.topleft, "9q8yyj");
        assert_eq!(n.topright, "9q8yyt");
        assert_eq!(n.bottomright, "9q8yye");
        assert_eq!(n.bottomleft, "9q8yy5");

        let distinct: HashSet<&str> = n.iter().map(|(_, h)| h).collect();
        assert_eq!(distinct.len(), 8);
        assert!(n.iter().all(|(_, h)| h.len() == 6 && h.starts_with("9q8yy")));
        Ok(())
    }

    #[test]
    fn test_neighbors_with_carry() -> Result<(), GeohashError> {
        let n = neighbors("ezs42")?;
        assert_eq!(n.top, "ezs48");
        assert_eq!(n.bottom, "ezs40");
        assert_eq!(n.right, "ezs43");
        assert_eq!(n.left, "ezefr");
        assert_eq!(n.topleft, "ezefx");
        assert_eq!(n.topright, "ezs49");
        assert_eq!(n.bottomright, "ezs41");
        assert_eq!(n.bottomleft, "ezefp");
        Ok(())
    }

    #[test]
    fn test_single_character_wraps() -> Result<(), GeohashError> {
        let n = neighbors("u")?;
        assert_eq!(n.top, "h");
        assert_eq!(n.bottom, "s");
        assert_eq!(n.right, "v");
        assert_eq!(n.left, "g");
        Ok(())
    }

    #[test]
    fn test_border_character_carries_into_prefix() -> Result<(), GeohashError> {
        // 'q' is not a top border at odd length, 'r' is.
        assert_eq!(adjacent("dqcjq", Direction::Top)?, "dqcjw");
        assert_eq!(adjacent("dqcjr", Direction::Top)?, "dqcjx");
        // Multi-level carry.
        assert_eq!(adjacent("u000", Direction::Left)?, "gbpb");
        assert_eq!(adjacent("gzzz", Direction::Right)?, "upbp");
        Ok(())
    }

    #[test]
    fn test_prefix_changes_only_on_border() -> Result<(), GeohashError> {
        for &byte in ALPHABET.iter() {
            let hash = format!("9q8y{}", byte as char);
            for direction in Direction::ALL.into_iter().filter(Direction::is_cardinal) {
                let table = table_for(direction, Parity::of_len(hash.len()));
                let digit = char_to_bits(byte as char)?;
                let shifted = adjacent(&hash, direction)?;
                assert_eq!(shifted[..4] != hash[..4], table.is_border(digit));
            }
        }
        Ok(())
    }

    #[test]
    fn test_opposite_shift_returns_home() -> Result<(), GeohashError> {
        for hash in ["9q8yyk", "ezs42", "u000", "gzzz", "s", "zzzzzz", "0000000"] {
            for direction in Direction::ALL {
                let there = adjacent(hash, direction)?;
                assert_eq!(adjacent(&there, direction.opposite())?, hash);
            }
        }
        Ok(())
    }

    #[test]
    fn test_uppercase_is_accepted() -> Result<(), GeohashError> {
        assert_eq!(neighbors("EZS42")?, neighbors("ezs42")?);
        Ok(())
    }

    #[test]
    fn test_errors() {
        assert_eq!(neighbors(""), Err(GeohashError::EmptyInput));
        assert_eq!(
            adjacent("ezs4a", Direction::Top),
            Err(GeohashError::InvalidCharacter('a'))
        );
    }

    #[test]
    fn test_odd_tables_are_permuted_even_tables() {
        assert!(std::ptr::eq(
            table_for(Direction::Bottom, Parity::Odd),
            table_for(Direction::Left, Parity::Even)
        ));
        assert!(std::ptr::eq(
            table_for(Direction::Top, Parity::Odd),
            table_for(Direction::Right, Parity::Even)
        ));
    }

    #[test]
    fn test_map_and_serde_keys() -> Result<(), GeohashError> {
        let n = neighbors("9q8yyk")?;
        let map = n.to_map();
        assert_eq!(map.len(), 8);
        assert_eq!(map["topleft"], "9q8yyj");

        let json = serde_json::to_value(&n).map_err(|e| GeohashError::IoError(e.to_string()))?;
        for direction in Direction::ALL {
            assert_eq!(json[direction.name()], n.get(direction));
        }
        assert_eq!(
            serde_json::to_string(&Direction::BottomRight)
                .map_err(|e| GeohashError::IoError(e.to_string()))?,
            "\"bottomright\""
        );
        Ok(())
    }
}
