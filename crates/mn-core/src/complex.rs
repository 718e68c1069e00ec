//! Immutable complex value with free arithmetic functions.
//!
//! Impedances and admittances are both carried as [`Complex`]; the type does not
//! distinguish them. All functions take values and return new values.

use crate::{CoreError, CoreResult, Real};

/// Squared magnitude below which a complex value is treated as zero when inverted.
pub const INVERT_EPSILON: Real = 1e-24;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex {
    pub real: Real,
    pub imag: Real,
}

/// Impedance in ohms (`real` = resistance, `imag` = reactance).
pub type Impedance = Complex;

impl Complex {
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    pub const ONE: Complex = Complex::new(1.0, 0.0);

    pub const fn new(real: Real, imag: Real) -> Self {
        Self { real, imag }
    }

    /// Purely real value.
    pub const fn re(real: Real) -> Self {
        Self { real, imag: 0.0 }
    }

    /// Purely imaginary value, e.g. `j·X` for a reactance `X`.
    pub const fn im(imag: Real) -> Self {
        Self { real: 0.0, imag }
    }

    pub fn conj(self) -> Self {
        Self::new(self.real, -self.imag)
    }

    pub fn norm_sqr(self) -> Real {
        self.real * self.real + self.imag * self.imag
    }

    pub fn is_finite(self) -> bool {
        self.real.is_finite() && self.imag.is_finite()
    }

    /// Phase angle in radians, `atan2(imag, real)`.
    pub fn arg(self) -> Real {
        self.imag.atan2(self.real)
    }
}

pub fn add(a: Complex, b: Complex) -> Complex {
    Complex::new(a.real + b.real, a.imag + b.imag)
}

pub fn sub(a: Complex, b: Complex) -> Complex {
    Complex::new(a.real - b.real, a.imag - b.imag)
}

pub fn multiply(a: Complex, b: Complex) -> Complex {
    Complex::new(
        a.real * b.real - a.imag * b.imag,
        a.real * b.imag + a.imag * b.real,
    )
}

pub fn scale(a: Complex, k: Real) -> Complex {
    Complex::new(a.real * k, a.imag * k)
}

/// Reciprocal `conj(a) / |a|²`.
///
/// Fails with [`CoreError::NumericDegeneracy`] when `|a|²` is below [`INVERT_EPSILON`].
pub fn invert(a: Complex) -> CoreResult<Complex> {
    let denom = a.norm_sqr();
    if !(denom >= INVERT_EPSILON) {
        return Err(CoreError::NumericDegeneracy {
            what: "complex inversion",
            magnitude_sq: denom,
        });
    }
    Ok(Complex::new(a.real / denom, -a.imag / denom))
}

/// `a / b`, guarded the same way as [`invert`].
pub fn divide(a: Complex, b: Complex) -> CoreResult<Complex> {
    Ok(multiply(a, invert(b)?))
}

pub fn magnitude(a: Complex) -> Real {
    (a.real * a.real + a.imag * a.imag).sqrt()
}
