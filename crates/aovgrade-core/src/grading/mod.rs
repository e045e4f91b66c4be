//! Grading stages — gamma curves, linear remap, premultiplication, and
//! mask/mix/composite-back.

pub mod composite;
pub mod gamma;
pub mod linear;
pub mod premult;
