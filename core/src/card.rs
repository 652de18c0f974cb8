use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// The face shared by both cards of a pair: the pairing key and the image shown when flipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    pub img: String,
}

impl CardFace {
    pub fn new(name: impl Into<String>, img: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            img: img.into(),
        }
    }
}

/// Deck used by the web app, one face per programming language.
pub fn default_deck() -> Vec<CardFace> {
    [
        ("Python", "./img/Python.svg"),
        ("JavaScript", "./img/JS.svg"),
        ("Java", "./img/Java.svg"),
        ("CSharp", "./img/CSharp.svg"),
        ("Go", "./img/Go.svg"),
        ("Ruby", "./img/Ruby.svg"),
    ]
    .into_iter()
    .map(|(name, img)| CardFace::new(name, img))
    .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    face: CardFace,
    is_flipped: bool,
}

impl Card {
    pub fn new(face: CardFace) -> Self {
        Self {
            face,
            is_flipped: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.face.name
    }

    pub fn img(&self) -> &str {
        &self.face.img
    }

    pub const fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn flip(&mut self) {
        self.is_flipped = true;
    }

    pub fn unflip(&mut self) {
        self.is_flipped = false;
    }

    pub fn toggle_flip(&mut self) {
        self.is_flipped = !self.is_flipped;
    }

    /// Two cards match when they share a pairing key, the image is not considered.
    pub fn matches(&self, other: &Card) -> bool {
        self.face.name == other.face.name
    }
}

impl From<CardFace> for Card {
    fn from(face: CardFace) -> Self {
        Self::new(face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flip_alternates() {
        let mut card = Card::new(CardFace::new("Go", "./img/Go.svg"));
        assert!(!card.is_flipped());

        card.toggle_flip();
        assert!(card.is_flipped());

        card.toggle_flip();
        assert!(!card.is_flipped());
    }

    #[test]
    fn matches_only_compares_pairing_key() {
        let go = Card::new(CardFace::new("Go", "./img/Go.svg"));
        let other_go = Card::new(CardFace::new("Go", "./img/gopher.png"));
        let ruby = Card::new(CardFace::new("Ruby", "./img/Ruby.svg"));

        assert!(go.matches(&other_go));
        assert!(!go.matches(&ruby));
    }

    #[test]
    fn default_deck_has_unique_names() {
        let deck = default_deck();
        assert_eq!(deck.len(), 6);
        for (i, face) in deck.iter().enumerate() {
            assert!(deck[i + 1..].iter().all(|other| other.name != face.name));
        }
    }
}
