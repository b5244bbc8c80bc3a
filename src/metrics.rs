/// Convergence statistics over a best-so-far fitness curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceStats {
    pub initial: f64,
    pub best: f64,
    /// First generation (0-based) at which `best` was reached
    pub best_generation: usize,
    pub improvement: f64,
    /// Generations after `best_generation` without a further gain
    pub plateau: usize,
}

/// Compute convergence statistics from a fitness history. `None` if empty.
pub fn compute_convergence(history: &[f64]) -> Option<ConvergenceStats> {
    let initial = *history.first()?;
    let (best_generation, best) = history
        .iter()
        .copied()
        .enumerate()
        .fold((0, initial), |(bi, bv), (i, v)| if v > bv { (i, v) } else { (bi, bv) });
    Some(ConvergenceStats {
        initial,
        best,
        best_generation,
        improvement: best - initial,
        plateau: history.len() - 1 - best_generation,
    })
}

/// `[min, max]` y-axis bounds with 5% headroom on each side; `[0, 1]` when empty
pub fn y_axis_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let (lo, hi) = points
        .iter()
        .map(|(_, y)| *y)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let span = (hi - lo).abs().max(1.0);
    [lo - span * 0.05, hi + span * 0.05]
}
