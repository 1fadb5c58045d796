//! Icons, colors and the food-chain capture rule

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A die face / piece icon.
///
/// The three icons form a food chain: the fisherman catches the fish, the
/// fish eats the fly, and the fly stings the fisherman.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Fisherman,
    Fish,
    Fly,
}

impl Icon {
    pub const ALL: [Icon; 3] = [Icon::Fisherman, Icon::Fish, Icon::Fly];

    /// The icon this one captures
    pub fn prey(self) -> Icon {
        match self {
            Icon::Fisherman => Icon::Fish,
            Icon::Fish => Icon::Fly,
            Icon::Fly => Icon::Fisherman,
        }
    }

    /// The icon that captures this one
    pub fn predator(self) -> Icon {
        match self {
            Icon::Fisherman => Icon::Fly,
            Icon::Fish => Icon::Fisherman,
            Icon::Fly => Icon::Fish,
        }
    }

    /// Whether `self` may replace a piece showing `other`.
    ///
    /// Irreflexive: an icon never beats itself.
    pub fn beats(self, other: Icon) -> bool {
        self.prey() == other
    }

    pub fn to_char(self) -> char {
        match self {
            Icon::Fisherman => 'M',
            Icon::Fish => 'F',
            Icon::Fly => 'Y',
        }
    }

    pub fn from_char(c: char) -> Option<Icon> {
        match c {
            'M' | 'm' => Some(Icon::Fisherman),
            'F' | 'f' => Some(Icon::Fish),
            'Y' | 'y' => Some(Icon::Fly),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Icon::Fisherman => 0,
            Icon::Fish => 1,
            Icon::Fly => 2,
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Icon::Fisherman => "fisherman",
            Icon::Fish => "fish",
            Icon::Fly => "fly",
        };
        f.write_str(name)
    }
}

impl FromStr for Icon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fisherman" | "pecheur" | "m" => Ok(Icon::Fisherman),
            "fish" | "poisson" | "f" => Ok(Icon::Fish),
            "fly" | "mouche" | "y" => Ok(Icon::Fly),
            _ => Err(Error::InvalidIcon {
                value: s.to_string(),
            }),
        }
    }
}

/// A player color
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Red,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Blue, Color::Red];

    pub fn to_char(self) -> char {
        match self {
            Color::Blue => 'b',
            Color::Red => 'r',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'b' | 'B' => Some(Color::Blue),
            'r' | 'R' => Some(Color::Red),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Color::Blue => 0,
            Color::Red => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Blue => f.write_str("blue"),
            Color::Red => f.write_str("red"),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" | "bleu" | "b" => Ok(Color::Blue),
            "red" | "rouge" | "r" => Ok(Color::Red),
            _ => Err(Error::InvalidColor {
                value: s.to_string(),
            }),
        }
    }
}

/// An icon played by one color
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub icon: Icon,
    pub color: Color,
}

impl Piece {
    pub const fn new(icon: Icon, color: Color) -> Self {
        Self { icon, color }
    }

    /// All six icon/color combinations, blue first
    pub fn all() -> impl Iterator<Item = Piece> {
        Color::ALL
            .into_iter()
            .flat_map(|color| Icon::ALL.into_iter().map(move |icon| Piece::new(icon, color)))
    }

    /// Position of this combination in `Piece::all()` order.
    pub(crate) fn kind_index(self) -> usize {
        self.color.index() * 3 + self.icon.index()
    }

    /// Two-character code such as `Mb` (blue fisherman)
    pub fn code(self) -> String {
        format!("{}{}", self.icon.to_char(), self.color.to_char())
    }

    pub fn from_code(code: &str) -> Option<Piece> {
        let mut chars = code.chars();
        let icon = Icon::from_char(chars.next()?)?;
        let color = Color::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Piece::new(icon, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_chain_is_cyclic() {
        assert!(Icon::Fisherman.beats(Icon::Fish));
        assert!(Icon::Fish.beats(Icon::Fly));
        assert!(Icon::Fly.beats(Icon::Fisherman));
    }

    #[test]
    fn test_food_chain_is_irreflexive_and_antisymmetric() {
        for a in Icon::ALL {
            assert!(!a.beats(a));
            for b in Icon::ALL {
                if a.beats(b) {
                    assert!(!b.beats(a), "{a} and {b} beat each other");
                }
            }
        }
    }

    #[test]
    fn test_predator_inverts_prey() {
        for icon in Icon::ALL {
            assert_eq!(icon.prey().predator(), icon);
            assert!(icon.predator().beats(icon));
        }
    }

    #[test]
    fn test_icon_and_color_parse_english_and_french_names() {
        assert_eq!("pecheur".parse::<Icon>().unwrap(), Icon::Fisherman);
        assert_eq!("Fish".parse::<Icon>().unwrap(), Icon::Fish);
        assert_eq!("mouche".parse::<Icon>().unwrap(), Icon::Fly);
        assert_eq!("rouge".parse::<Color>().unwrap(), Color::Red);
        assert_eq!("BLUE".parse::<Color>().unwrap(), Color::Blue);
        assert!("shark".parse::<Icon>().is_err());
        assert!("green".parse::<Color>().is_err());
    }

    #[test]
    fn test_piece_codes() {
        let piece = Piece::new(Icon::Fly, Color::Red);
        assert_eq!(piece.code(), "Yr");
        assert_eq!(Piece::from_code("Yr"), Some(piece));
        assert_eq!(Piece::from_code("Yrx"), None);
        assert_eq!(Piece::from_code("Q b"), None);
    }

    #[test]
    fn test_kind_index_matches_all_order() {
        for (i, piece) in Piece::all().enumerate() {
            assert_eq!(piece.kind_index(), i);
        }
        assert_eq!(Piece::all().count(), 6);
    }
}
