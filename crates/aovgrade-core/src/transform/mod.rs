//! Transform pipeline — parameter definitions, coefficient derivation, and
//! per-pixel evaluation.

pub mod coefficients;
pub mod evaluate;
pub mod params;
