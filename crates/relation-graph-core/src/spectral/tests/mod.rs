//! Spectral embedder test suite.

mod helpers;
