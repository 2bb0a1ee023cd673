//! Arithmetic in Z_m, the ring the Hill cipher and the matrix inverse work in.

use crate::errors::CipherError;

use num_integer::Integer;

use serde::{Deserialize, Serialize};

/// Modulus of the classic 26-letter Hill cipher.
pub const CLASSIC_MODULUS: u64 = 26;

/// Z_m for a modulus `m > 1`. Every result is a representative in `[0, m)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub modulus: u64,
}

impl Default for Ring {
    fn default() -> Self {
        Ring {
            modulus: CLASSIC_MODULUS,
        }
    }
}

impl Ring {
    /// # Errors
    ///
    /// `InvalidModulus` unless `1 < modulus <= i64::MAX`.
    pub fn try_with(modulus: u64) -> Result<Self, CipherError> {
        if modulus < 2 || i64::try_from(modulus).is_err() {
            return Err(CipherError::InvalidModulus(format!(
                "modulus must lie in 2..={}, got {}",
                i64::MAX,
                modulus
            )));
        }

        Ok(Ring { modulus })
    }

    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::ring::Ring;
    /// assert_eq!(Ring::try_with(27).unwrap().modulus(), 27);
    /// ```
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    fn signed_modulus(&self) -> i64 {
        self.modulus as i64
    }

    fn reduce(&self, value: i128) -> i64 {
        value.rem_euclid(i128::from(self.modulus)) as i64
    }

    /// Least non-negative representative of `value`.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::ring::Ring;
    /// let ring = Ring::try_with(26).unwrap();
    /// assert_eq!(ring.normalize(27), 1);
    /// assert_eq!(ring.normalize(-3), 23);
    /// assert_eq!(ring.normalize(26), 0);
    /// ```
    pub fn normalize(&self, value: i64) -> i64 {
        value.mod_floor(&self.signed_modulus())
    }

    pub fn add(&self, a: i64, b: i64) -> i64 {
        self.reduce(i128::from(a) + i128::from(b))
    }

    /// Product in the ring; operands are widened to `i128`, so any `i64` inputs are safe.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::ring::Ring;
    /// let ring = Ring::try_with(26).unwrap();
    /// assert_eq!(ring.mul(7, 5), 9);
    /// assert_eq!(ring.mul(-2, 6), 14);
    /// ```
    pub fn mul(&self, a: i64, b: i64) -> i64 {
        self.reduce(i128::from(self.normalize(a)) * i128::from(self.normalize(b)))
    }

    /// Whether `a` has a multiplicative inverse, i.e. `gcd(a, m) == 1`.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::ring::Ring;
    /// let ring = Ring::try_with(26).unwrap();
    /// assert!(ring.is_unit(9));
    /// assert!(!ring.is_unit(13));
    /// assert!(!ring.is_unit(0));
    /// ```
    pub fn is_unit(&self, a: i64) -> bool {
        self.normalize(a).gcd(&self.signed_modulus()) == 1
    }

    /// The `i` in `[0, m)` with `a * i = 1 (mod m)`, via the extended Euclidean algorithm.
    ///
    /// # Errors
    ///
    /// `NoModularInverse` when `gcd(a, m) != 1`, including `a = 0`.
    ///
    /// # Example
    ///
    /// ```
    /// # use classic_ciphers::ring::Ring;
    /// let ring = Ring::try_with(27).unwrap();
    /// assert_eq!(ring.inv(16).unwrap(), 22);
    /// assert_eq!(ring.inv(-1).unwrap(), 26);
    /// assert!(ring.inv(3).is_err());
    /// assert!(ring.inv(0).is_err());
    /// ```
    pub fn inv(&self, a: i64) -> Result<i64, CipherError> {
        let value = self.normalize(a);
        let egcd = value.extended_gcd(&self.signed_modulus());

        if egcd.gcd != 1 {
            return Err(CipherError::NoModularInverse(format!(
                "{} has no inverse modulo {} (gcd {})",
                value, self.modulus, egcd.gcd
            )));
        }
        Ok(self.normalize(egcd.x))
    }
}
