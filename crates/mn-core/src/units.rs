// mn-core/src/units.rs

use uom::si::f64::{
    Capacitance as UomCapacitance, Frequency as UomFrequency, Inductance as UomInductance,
    Length as UomLength,
};

// Public canonical unit types (SI, f64)
pub type Capacitance = UomCapacitance;
pub type Frequency = UomFrequency;
pub type Inductance = UomInductance;
pub type Length = UomLength;

#[inline]
pub fn mhz(v: f64) -> Frequency {
    use uom::si::frequency::megahertz;
    Frequency::new::<megahertz>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn farad(v: f64) -> Capacitance {
    use uom::si::capacitance::farad;
    Capacitance::new::<farad>(v)
}

#[inline]
pub fn henry(v: f64) -> Inductance {
    use uom::si::inductance::henry;
    Inductance::new::<henry>(v)
}

pub mod constants {
    use super::*;

    pub const SPEED_OF_LIGHT_MPS: f64 = 299_792_458.0;

    /// Wavelength in a medium of relative permittivity `eps_r`: `λ = c / sqrt(εr) / f`.
    #[inline]
    pub fn wavelength(frequency: Frequency, eps_r: f64) -> Length {
        use uom::si::frequency::hertz;
        m(SPEED_OF_LIGHT_MPS / eps_r.sqrt() / frequency.get::<hertz>())
    }
}
