//! Miscellaneous math functions for general use

/// Free functions used in more than one module of the crate.
pub mod ancillary;

/// Small fixed size matrices: 3×3 direction cosines and 4×4 affine transforms
pub mod matrix;

/// Taylor- and Fourier series
pub mod series;
pub use series::fourier;
pub use series::taylor;
pub use series::taylor::horner;
