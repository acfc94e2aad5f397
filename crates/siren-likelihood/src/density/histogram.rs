use siren_core::{DensityFunction, Error, Result};

/// Binned distance density, flat within each bin.
///
/// Bin `i` spans `[edges[i], edges[i+1])` and holds probability mass
/// `(content[i] + pseudo_count) / total`; the last bin also includes its upper
/// edge. The density is zero outside the edges.
#[derive(Debug, Clone)]
pub struct HistogramDensity {
    bin_edges: Vec<f64>,
    density: Vec<f64>,
}

fn invalid(msg: String) -> Error {
    Error::Validation(format!("histogram density: {msg}"))
}

impl HistogramDensity {
    /// Normalize `bin_content` (one entry per pair of adjacent `bin_edges`).
    ///
    /// A positive `pseudo_count` keeps bins that received no simulated samples
    /// from scoring exactly zero.
    pub fn from_edges_and_contents(
        bin_edges: Vec<f64>,
        bin_content: Vec<f64>,
        pseudo_count: f64,
    ) -> Result<Self> {
        let n_bins = bin_edges.len().saturating_sub(1);
        if n_bins == 0 || bin_content.len() != n_bins {
            return Err(invalid(format!(
                "{} edges cannot bound {} bins",
                bin_edges.len(),
                bin_content.len()
            )));
        }
        if !(pseudo_count >= 0.0 && pseudo_count.is_finite()) {
            return Err(invalid(format!("pseudo_count must be finite and >= 0, got {pseudo_count}")));
        }
        if let Some(bad) = bin_content.iter().position(|w| !(w.is_finite() && *w >= 0.0)) {
            return Err(invalid(format!("content of bin {bad} is {}", bin_content[bad])));
        }
        if bin_edges.iter().any(|e| !e.is_finite())
            || bin_edges.windows(2).any(|pair| pair[0] >= pair[1])
        {
            return Err(invalid(format!("edges must be finite and increasing, got {bin_edges:?}")));
        }

        let total = bin_content.iter().sum::<f64>() + pseudo_count * n_bins as f64;
        if !(total.is_finite() && total > 0.0) {
            return Err(invalid(format!("total mass must be positive, got {total}")));
        }

        let density = bin_content
            .iter()
            .zip(bin_edges.windows(2))
            .map(|(w, pair)| (w + pseudo_count) / (total * (pair[1] - pair[0])))
            .collect();
        Ok(Self { bin_edges, density })
    }

    /// Number of bins.
    pub fn n_bins(&self) -> usize {
        self.density.len()
    }
}

impl DensityFunction for HistogramDensity {
    fn density(&self, d_l: f64) -> f64 {
        let (lo, hi) = (self.bin_edges[0], self.bin_edges[self.n_bins()]);
        if !(lo..=hi).contains(&d_l) {
            return 0.0;
        }
        // Edges at or below d_l, minus one; clamp so the upper edge lands in the last bin.
        let bin = self.bin_edges.partition_point(|&e| e <= d_l) - 1;
        self.density[bin.min(self.n_bins() - 1)]
    }
}
