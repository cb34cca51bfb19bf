#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("1 + ratio / price is zero")]
    ZeroDivisor,
    #[error("float evaluation left the finite range: {0}")]
    NonFinite(String),
}
