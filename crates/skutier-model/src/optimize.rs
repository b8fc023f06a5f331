//! Derivative-free minimization.

#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    pub max_iter: usize,
    /// Relative spread of objective values across the simplex at which the
    /// search stops.
    pub ftol: f64,
    /// Largest coordinate distance from the best vertex at which the search
    /// stops.
    pub xtol: f64,
    /// Offset applied to each coordinate of the start point to build the
    /// initial simplex.
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 2000,
            ftol: 1e-10,
            xtol: 1e-7,
            initial_step: 0.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    pub point: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Minimize `f` starting from `x0` with the Nelder–Mead simplex method
/// (reflection 1, expansion 2, contraction 0.5, shrink 0.5).
///
/// Non-finite objective values are treated as `+inf`, so the simplex moves
/// away from regions where `f` is undefined.
pub fn nelder_mead<F>(f: F, x0: &[f64], config: &NelderMeadConfig) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let eval = |x: &[f64]| {
        let v = f(x);
        if v.is_finite() {
            v
        } else {
            f64::INFINITY
        }
    };

    let dim = x0.len();
    if dim == 0 {
        return NelderMeadResult {
            point: Vec::new(),
            value: eval(x0),
            iterations: 0,
            converged: true,
        };
    }

    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
    simplex.push((x0.to_vec(), eval(x0)));
    for i in 0..dim {
        let mut vertex = x0.to_vec();
        vertex[i] += config.initial_step;
        let value = eval(&vertex);
        simplex.push((vertex, value));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
        if has_converged(&simplex, config) {
            converged = true;
            break;
        }
        iterations += 1;

        let worst = dim;
        let centroid = centroid(&simplex[..worst]);
        let towards = |scale: f64| -> Vec<f64> {
            centroid
                .iter()
                .zip(&simplex[worst].0)
                .map(|(c, w)| c + scale * (w - c))
                .collect()
        };

        let reflected = towards(-1.0);
        let f_reflected = eval(&reflected);

        if f_reflected < simplex[0].1 {
            let expanded = towards(-2.0);
            let f_expanded = eval(&expanded);
            simplex[worst] = if f_expanded < f_reflected {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
            continue;
        }

        if f_reflected < simplex[worst - 1].1 {
            simplex[worst] = (reflected, f_reflected);
            continue;
        }

        let (contracted, f_contracted) = if f_reflected < simplex[worst].1 {
            let outside = towards(-0.5);
            let f_outside = eval(&outside);
            (outside, f_outside)
        } else {
            let inside = towards(0.5);
            let f_inside = eval(&inside);
            (inside, f_inside)
        };

        if f_contracted < simplex[worst].1.min(f_reflected) {
            simplex[worst] = (contracted, f_contracted);
            continue;
        }

        let best = simplex[0].0.clone();
        for vertex in simplex.iter_mut().skip(1) {
            let shrunk: Vec<f64> = best
                .iter()
                .zip(&vertex.0)
                .map(|(b, v)| b + 0.5 * (v - b))
                .collect();
            let value = eval(&shrunk);
            *vertex = (shrunk, value);
        }
    }

    simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
    let (point, value) = simplex.swap_remove(0);
    NelderMeadResult {
        point,
        value,
        iterations,
        converged,
    }
}

fn centroid(vertices: &[(Vec<f64>, f64)]) -> Vec<f64> {
    let dim = vertices[0].0.len();
    #[allow(clippy::cast_precision_loss)]
    let n = vertices.len() as f64;
    let mut c = vec![0.0; dim];
    for (v, _) in vertices {
        for (ci, vi) in c.iter_mut().zip(v) {
            *ci += vi;
        }
    }
    for ci in &mut c {
        *ci /= n;
    }
    c
}

/// Simplex must be sorted best-first.
fn has_converged(simplex: &[(Vec<f64>, f64)], config: &NelderMeadConfig) -> bool {
    let best = &simplex[0];
    let worst = &simplex[simplex.len() - 1];
    if !worst.1.is_finite() {
        return false;
    }
    let f_spread = worst.1 - best.1;
    let f_scale = best.1.abs().max(worst.1.abs()).max(f64::MIN_POSITIVE);
    let x_spread = simplex[1..]
        .iter()
        .flat_map(|(v, _)| v.iter().zip(&best.0).map(|(a, b)| (a - b).abs()))
        .fold(0.0_f64, f64::max);
    f_spread <= config.ftol * f_scale && x_spread <= config.xtol
}
