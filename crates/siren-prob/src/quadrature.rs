//! Fixed-order Gauss-Legendre quadrature.

/// Number of nodes in the Gauss-Legendre rule.
pub const GL_NPOINTS: usize = 32;

/// 32-point Gauss-Legendre nodes and weights on [-1, 1].
///
/// Precomputed for high-accuracy numerical integration.
pub fn gauss_legendre_32() -> ([f64; GL_NPOINTS], [f64; GL_NPOINTS]) {
    let mut nodes = [0.0; GL_NPOINTS];
    let mut weights = [0.0; GL_NPOINTS];

    // Positive half-nodes (symmetric rule).
    let half_nodes: [f64; 16] = [
        0.04830766568773831,
        0.14447196158279649,
        0.23928736225213707,
        0.33186860228212767,
        0.42135127613063534,
        0.50689990893222942,
        0.58771575724076233,
        0.66304426693021520,
        0.73218211874028968,
        0.79448379596794241,
        0.84936761373256997,
        0.89632115576605212,
        0.93490607593773969,
        0.96476225558750643,
        0.98561151154526834,
        0.99726386184948156,
    ];
    let half_weights: [f64; 16] = [
        0.09654008851472780,
        0.09563872007927486,
        0.09384439908080457,
        0.09117387869576389,
        0.08765209300440381,
        0.08331192422694676,
        0.07819389578707031,
        0.07234579410884851,
        0.06582222277636185,
        0.05868409347853555,
        0.05099805926237618,
        0.04283589802222668,
        0.03427386291302143,
        0.02539206530926206,
        0.01627439473090567,
        0.00701861000947009,
    ];

    // Negative nodes first (reversed), then positive.
    for i in 0..16 {
        nodes[i] = -half_nodes[15 - i];
        weights[i] = half_weights[15 - i];
        nodes[16 + i] = half_nodes[i];
        weights[16 + i] = half_weights[i];
    }

    (nodes, weights)
}

/// Integrate `f` over `[a, b]` with the 32-point Gauss-Legendre rule.
///
/// Returns `0` for an empty interval; `a > b` flips the sign as usual.
pub fn integrate<F: Fn(f64) -> f64>(f: F, a: f64, b: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    let (nodes, weights) = gauss_legendre_32();
    let mid = 0.5 * (a + b);
    let half_len = 0.5 * (b - a);

    let mut acc = 0.0;
    for (x, w) in nodes.iter().zip(weights.iter()) {
        acc += w * f(mid + half_len * x);
    }
    acc * half_len
}
