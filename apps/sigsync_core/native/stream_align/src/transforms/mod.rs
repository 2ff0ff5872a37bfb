//! Transform backend implementations
//!
//! `RustFftTransform` (any length) and `Radix2Transform` (power-of-two).
//! The backend is selected once at construction; the correlator only sees
//! the `Transform` trait.

mod radix2;
mod rustfft_backend;

pub use radix2::Radix2Transform;
pub use rustfft_backend::RustFftTransform;

use serde::{Deserialize, Serialize};

use crate::error::AlignResult;
use crate::traits::Transform;

/// Which transform backend to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    #[default]
    RustFft,
    Radix2,
}

impl TransformKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RustFft => RustFftTransform::NAME,
            Self::Radix2 => Radix2Transform::NAME,
        }
    }
}

/// Build the backend for `kind` - match once, construct specialized type
pub fn build_transform(kind: TransformKind, size: usize) -> AlignResult<Box<dyn Transform>> {
    let transform: Box<dyn Transform> = match kind {
        TransformKind::RustFft => Box::new(RustFftTransform::new(size)?),
        TransformKind::Radix2 => Box::new(Radix2Transform::new(size)?),
    };
    log::debug!("built {} transform, size {}", transform.name(), size);
    Ok(transform)
}
