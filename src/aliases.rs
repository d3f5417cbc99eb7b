//! Secret wrapper types from secure-gate
//!
//! Plaintext login passwords never travel as a bare `String`.

pub use secure_gate::dynamic_alias;

// Zeroized on drop
dynamic_alias!(LoginPassword, String);
