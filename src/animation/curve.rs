use std::f64::consts::TAU;

use crate::animation::ease::Ease;

/// Hard ceiling on spring overshoot, as a multiple of the target value.
pub const SPRING_OVERSHOOT_CAP: f64 = 1.2;

/// Linear remap of `t` from `[t0, t1]` to `[v0, v1]`, clamped outside.
///
/// Degenerate spans (`t1 <= t0`) step from `v0` to `v1` at `t0`.
pub fn ramp_clamped(t: f64, t0: f64, t1: f64, v0: f64, v1: f64) -> f64 {
    if t1 <= t0 {
        return if t >= t0 { v1 } else { v0 };
    }
    let u = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0);
    v0 + (v1 - v0) * u
}

/// [`ramp_clamped`] with an easing curve shaping the normalized position.
pub fn ramp_eased(t: f64, t0: f64, t1: f64, v0: f64, v1: f64, ease: Ease) -> f64 {
    if t1 <= t0 {
        return if t >= t0 { v1 } else { v0 };
    }
    let u = ease.apply((t - t0) / (t1 - t0));
    v0 + (v1 - v0) * u
}

/// Exponentially decaying sine wave, the shake/wobble workhorse.
///
/// Returns `amplitude * exp(-decay_rate * t) * sin(TAU * freq_hz * t + phase_rad)`.
/// With any positive `decay_rate` the envelope self-terminates; negative
/// decay rates are treated as zero so the output never grows without bound.
pub fn decaying_oscillation(
    t_secs: f64,
    freq_hz: f64,
    amplitude: f64,
    decay_rate: f64,
    phase_rad: f64,
) -> f64 {
    let t = t_secs.max(0.0);
    let envelope = (-decay_rate.max(0.0) * t).exp();
    amplitude * envelope * (TAU * freq_hz * t + phase_rad).sin()
}

/// Damped-spring step response from 0 toward `target`.
///
/// `stiffness` sets the natural frequency, `damping` the dissipation.
/// Underdamped configurations overshoot and ring before settling; the
/// excursion past `target` is capped at [`SPRING_OVERSHOOT_CAP`] times the
/// target so entrance bounces stay inside their safe area.
pub fn spring_approach(t_secs: f64, target: f64, damping: f64, stiffness: f64) -> f64 {
    let t = t_secs.max(0.0);
    let omega = stiffness.max(0.0).sqrt();
    if omega == 0.0 {
        return 0.0;
    }
    let zeta = damping.max(0.0) / (2.0 * omega);

    let x = if zeta < 1.0 {
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * omega * t).exp();
        target * (1.0 - e * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin()))
    } else {
        // Critically damped response, with the rate slowed for heavier damping.
        let rate = (omega / zeta).max(1e-6);
        let e = (-rate * t).exp();
        target * (1.0 - e * (1.0 + rate * t))
    };

    let cap = SPRING_OVERSHOOT_CAP * target;
    if target >= 0.0 { x.min(cap) } else { x.max(cap) }
}

/// Bounded multiplier oscillating around 1.0 for attention pulses.
///
/// Returns `1.0 + intensity * sin(TAU * speed_hz * t)`.
pub fn pulse(t_secs: f64, speed_hz: f64, intensity: f64) -> f64 {
    1.0 + intensity * (TAU * speed_hz * t_secs).sin()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
