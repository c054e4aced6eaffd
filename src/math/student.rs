//! Student-t critical values for the confidence interval at x = 0.
//!
//! We need the two-sided critical value `t` with
//! `P(|T_df| <= t) = 1 - alpha`, i.e. a tail probability of `alpha/2` per
//! side. The tail probability of the t-distribution reduces to the
//! regularized incomplete beta function:
//!
//! ```text
//! P(|T_df| > t) = I_{df/(df+t²)}(df/2, 1/2)
//! ```
//!
//! which is monotone in `t`, so the critical value is found by bisection.
//! The special functions (ln-gamma, incomplete beta continued fraction) are
//! the standard Lanczos / Lentz formulations.

/// Two-sided Student-t critical value at significance `alpha`.
///
/// Returns NaN for non-positive degrees of freedom or an `alpha` outside
/// (0, 1). A zero-df fit (as many parameters as points) therefore produces a
/// NaN interval rather than a misleading finite one.
pub fn t_two_sided(df: f64, alpha: f64) -> f64 {
    if !(df > 0.0) || !(alpha > 0.0 && alpha < 1.0) {
        return f64::NAN;
    }

    // Bracket the root: tail(0) = 1 >= alpha, tail(t) -> 0 as t grows.
    let mut hi = 1.0;
    while two_sided_tail(df, hi) > alpha {
        hi *= 2.0;
        if hi > 1e12 {
            return f64::NAN;
        }
    }
    let mut lo = 0.0;

    for _ in 0..128 {
        let mid = 0.5 * (lo + hi);
        if two_sided_tail(df, mid) > alpha {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// `P(|T_df| > t)` for `t >= 0`.
fn two_sided_tail(df: f64, t: f64) -> f64 {
    reg_inc_beta(0.5 * df, 0.5, df / (df + t * t))
}

/// Natural log of the gamma function (Lanczos approximation, |err| < 2e-10).
fn ln_gamma(x: f64) -> f64 {
    const COEF: [f64; 6] = [
        76.18009172947146,
        -86.50532032941677,
        24.01409824083091,
        -1.231739572450155,
        0.1208650973866179e-2,
        -0.5395239384953e-5,
    ];

    let mut y = x;
    let tmp = x + 5.5;
    let tmp = tmp - (x + 0.5) * tmp.ln();
    let mut ser = 1.000000000190015;
    for c in COEF {
        y += 1.0;
        ser += c / y;
    }
    -tmp + (2.5066282746310005 * ser / x).ln()
}

/// Regularized incomplete beta function `I_x(a, b)`.
fn reg_inc_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_bt = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let bt = ln_bt.exp();

    // Use the continued fraction directly where it converges fast, otherwise
    // via the symmetry relation.
    if x < (a + 1.0) / (a + b + 2.0) {
        bt * betacf(a, b, x) / a
    } else {
        1.0 - bt * betacf(b, a, 1.0 - x) / b
    }
}

/// Continued fraction for the incomplete beta function (modified Lentz).
fn betacf(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITER: usize = 200;
    const EPS: f64 = 3.0e-14;
    const FPMIN: f64 = 1.0e-300;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < FPMIN {
        d = FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;

        if (del - 1.0).abs() < EPS {
            break;
        }
    }
    h
}
