#[derive(thiserror::Error, Debug)]
pub enum CipherError {
    /// Matrix supplied to the inverse machinery is empty or not square.
    #[error("InvalidMatrixShape: {0}")]
    InvalidMatrixShape(String),
    /// The product of the diagonal is zero; this is not a singularity proof.
    #[error("NotInvertible: {0}")]
    NotInvertible(String),
    /// The determinant shares a factor with the modulus (gcd(det, m) != 1).
    #[error("NoModularInverse: {0}")]
    NoModularInverse(String),
    #[error("UnknownAlgorithmOrOperation: algorithm `{algorithm}` or operation `{operation}` does not exist")]
    UnknownAlgorithmOrOperation { algorithm: String, operation: String },
    /// Non-alphabet characters, non-binary digits, mismatched operand lengths and similar.
    #[error("MalformedInput: {0}")]
    MalformedInput(String),

    /// Ring modulus outside `2..=i64::MAX`.
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    #[error("Internal error: Overflow during calculation")]
    CalculationOverflow,

    #[error("Data serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
