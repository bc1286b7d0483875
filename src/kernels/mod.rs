//! SIMD microkernels for the inner loops of the numeric payloads.
//!
//! Feature detection happens at the call site, not here: callers pick the
//! AVX2 kernel when `is_x86_feature_detected!` says so and fall back to
//! the scalar version otherwise, so every kernel has a portable twin.

pub mod dot;
