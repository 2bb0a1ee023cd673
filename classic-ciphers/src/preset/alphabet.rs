use crate::errors::CipherError;
use crate::ring::Ring;

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Lowercase `a`-`z` followed by the space, indices 0 to 26.
pub const STANDARD_SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyz ";

/// Symbol used to right-pad text to a whole number of blocks.
pub const PADDING_SYMBOL: char = ' ';

lazy_static! {
    /// The 27-symbol alphabet used by the Hill cipher unless configured otherwise.
    pub static ref STANDARD_ALPHABET: Alphabet = Alphabet::from_valid_symbols(STANDARD_SYMBOLS);
}

/// Ordered set of symbols forming the numeric universe `0..len` of the Hill cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    symbol_to_index: HashMap<char, i64>,
}

impl Alphabet {
    /// Builds an alphabet from its symbols, in index order.
    ///
    /// The symbols must be unique, lowercase (input text is lowercased before lookup),
    /// at least two of them, and include the [`PADDING_SYMBOL`].
    pub fn try_with(symbols: &str) -> Result<Self, CipherError> {
        let alphabet = Self::from_valid_symbols(symbols);

        if alphabet.symbols.len() < 2 {
            return Err(CipherError::InvalidParameters(format!(
                "Alphabet needs at least 2 symbols, got {}",
                alphabet.symbols.len()
            )));
        }
        if alphabet.symbol_to_index.len() != alphabet.symbols.len() {
            return Err(CipherError::InvalidParameters(
                "Alphabet symbols must be unique".to_string(),
            ));
        }
        if let Some(c) = alphabet.symbols.iter().find(|c| c.is_uppercase()) {
            return Err(CipherError::InvalidParameters(format!(
                "Alphabet symbol '{}' is uppercase and can never match lowercased input",
                c
            )));
        }
        if !alphabet.symbol_to_index.contains_key(&PADDING_SYMBOL) {
            return Err(CipherError::InvalidParameters(
                "Alphabet must contain the padding symbol ' '".to_string(),
            ));
        }

        Ok(alphabet)
    }

    fn from_valid_symbols(symbols: &str) -> Self {
        let symbols: Vec<char> = symbols.chars().collect();
        let symbol_to_index = symbols
            .iter()
            .enumerate()
            .map(|(index, &c)| (c, index as i64))
            .collect();

        Alphabet {
            symbols,
            symbol_to_index,
        }
    }

    /// Number of symbols, which is also the Hill modulus.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::preset::alphabet::STANDARD_ALPHABET;
    /// assert_eq!(STANDARD_ALPHABET.len(), 27);
    /// ```
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The ring Z_n where n is the alphabet size.
    pub fn ring(&self) -> Result<Ring, CipherError> {
        Ring::try_with(self.symbols.len() as u64)
    }

    /// Index of `symbol`; lookup is total, so unknown symbols are an error.
    pub fn index_of(&self, symbol: char) -> Result<i64, CipherError> {
        self.symbol_to_index.get(&symbol).copied().ok_or_else(|| {
            CipherError::MalformedInput(format!("character {:?} is not in the alphabet", symbol))
        })
    }

    /// Symbol at `index`.
    pub fn symbol_at(&self, index: i64) -> Result<char, CipherError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.symbols.get(i))
            .copied()
            .ok_or_else(|| {
                CipherError::MalformedInput(format!(
                    "index {} is outside the alphabet of {} symbols",
                    index,
                    self.symbols.len()
                ))
            })
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }
}
