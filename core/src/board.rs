use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Position of a card on the board.
pub type CardIndex = usize;

/// Number of grid columns used to lay out the board.
pub type Columns = u8;

pub const MIN_COLUMNS: Columns = 2;
pub const MAX_COLUMNS: Columns = 12;

/// Derives the column count from the number of cards: half the cards, clamped to `2..=12` and made even, rounding
/// down except for 11 which goes up to 12.
pub const fn columns_for(card_count: usize) -> Columns {
    let half = card_count / 2;
    let columns = if half < MIN_COLUMNS as usize {
        MIN_COLUMNS
    } else if half > MAX_COLUMNS as usize {
        MAX_COLUMNS
    } else {
        half as Columns
    };
    match columns {
        11 => 12,
        odd if odd % 2 != 0 => odd - 1,
        even => even,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Creates two face-down cards for every face, in deck order.
    pub fn from_faces(faces: impl IntoIterator<Item = CardFace>) -> Self {
        let cards = faces
            .into_iter()
            .flat_map(|face| [Card::new(face.clone()), Card::new(face)])
            .collect();
        Self::new(cards)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn columns(&self) -> Columns {
        columns_for(self.cards.len())
    }

    pub fn validate_index(&self, index: CardIndex) -> Result<CardIndex> {
        if index < self.cards.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidCardIndex)
        }
    }

    /// Uniform shuffle, the same seed always yields the same order.
    pub fn shuffle_cards(&mut self, seed: u64) {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
        log::trace!("shuffled {} cards with seed {}", self.cards.len(), seed);
    }

    pub fn flip_down_all_cards(&mut self) {
        self.cards.iter_mut().for_each(Card::unflip);
    }

    pub fn reset(&mut self, seed: u64) {
        self.shuffle_cards(seed);
        self.flip_down_all_cards();
    }

    pub(crate) fn card_mut(&mut self, index: CardIndex) -> &mut Card {
        &mut self.cards[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn sorted_names(board: &Board) -> Vec<&str> {
        let mut names: Vec<_> = board.cards().iter().map(Card::name).collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn columns_are_even_and_bounded() {
        for card_count in 0..64 {
            let columns = columns_for(card_count);
            assert_eq!(columns % 2, 0, "{card_count} cards gave {columns} columns");
            assert!((MIN_COLUMNS..=MAX_COLUMNS).contains(&columns));
        }
    }

    #[test]
    fn columns_for_known_sizes() {
        assert_eq!(columns_for(12), 6);
        assert_eq!(columns_for(22), 12);
        assert_eq!(columns_for(10), 4);
        assert_eq!(columns_for(2), 2);
        assert_eq!(columns_for(100), 12);
    }

    #[test]
    fn from_faces_creates_pairs() {
        let board = Board::from_faces(default_deck());

        assert_eq!(board.len(), 12);
        assert_eq!(board.columns(), 6);
        assert!(board.cards().iter().all(|card| !card.is_flipped()));
        for card in board.cards() {
            let twins = board.cards().iter().filter(|other| other.matches(card));
            assert_eq!(twins.count(), 2);
        }
    }

    #[test]
    fn shuffle_keeps_pairing_keys() {
        for pairs in 1..=8 {
            let faces = default_deck()
                .into_iter()
                .cycle()
                .take(pairs)
                .collect::<Vec<_>>();
            let mut board = Board::from_faces(faces);
            let before: Vec<_> = sorted_names(&board).into_iter().map(String::from).collect();

            board.shuffle_cards(pairs as u64);

            assert_eq!(board.len(), pairs * 2);
            assert_eq!(sorted_names(&board), before);
        }
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let mut a = Board::from_faces(default_deck());
        let mut b = a.clone();

        a.shuffle_cards(42);
        b.shuffle_cards(42);

        assert_eq!(a, b);
    }

    #[test]
    fn reset_flips_everything_down() {
        let mut board = Board::from_faces(vec![CardFace::new("Go", "go.svg")]);
        board.card_mut(0).flip();
        board.card_mut(1).flip();

        board.reset(7);

        assert!(board.cards().iter().all(|card| !card.is_flipped()));
    }

    #[test]
    fn validate_index_rejects_out_of_range() {
        let board = Board::from_faces(vec![CardFace::new("Go", "go.svg")]);
        assert_eq!(board.validate_index(1), Ok(1));
        assert_eq!(board.validate_index(2), Err(GameError::InvalidCardIndex));
    }
}
