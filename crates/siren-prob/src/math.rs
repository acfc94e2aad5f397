//! Small numerically-stable math utilities used across probability code.

/// `-ln(sqrt(2π))`.
const LOG_INV_SQRT_2PI: f64 = -0.918_938_533_204_672_7;

/// Log-density of the standard normal at `z`.
#[inline]
pub fn standard_normal_logpdf(z: f64) -> f64 {
    LOG_INV_SQRT_2PI - 0.5 * z * z
}

/// Streaming accumulator for `log(Σ exp(t_i))`.
///
/// Keeps `(m, s)` so that the running value is `m + ln(s)`; avoids buffering
/// terms when the number of kernels is large.
#[derive(Debug, Clone, Copy)]
pub struct OnlineLogSumExp {
    m: f64,
    s: f64,
}

impl Default for OnlineLogSumExp {
    fn default() -> Self {
        Self::new()
    }
}

impl OnlineLogSumExp {
    /// Empty accumulator (value `-inf`).
    pub fn new() -> Self {
        Self { m: f64::NEG_INFINITY, s: 0.0 }
    }

    /// Add one term `t` (in log space). Non-finite `-inf` terms are no-ops.
    #[inline]
    pub fn push(&mut self, t: f64) {
        if t == f64::NEG_INFINITY {
            return;
        }
        if t > self.m {
            if self.m.is_finite() {
                self.s = self.s * (self.m - t).exp() + 1.0;
            } else {
                self.s = 1.0;
            }
            self.m = t;
        } else {
            self.s += (t - self.m).exp();
        }
    }

    /// Current `log(Σ exp(t_i))`.
    #[inline]
    pub fn value(&self) -> f64 {
        if !self.m.is_finite() {
            return f64::NEG_INFINITY;
        }
        self.m + self.s.ln()
    }
}
