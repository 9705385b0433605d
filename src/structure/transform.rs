//! # g(r) ↔ S(q) Fourier-Bessel 变换
//!
//! 各向同性体系中径向分布函数与结构因子互为正弦变换：
//!
//! ```text
//! S(q) = 1 + 4πρ/q · ∫ dr · r · sin(qr) · (g(r) − 1)
//! g(r) = 1 + 1/(2π²ρr) · ∫ dq · q · sin(qr) · (S(q) − 1)
//! ```
//!
//! ## 数值方法
//! 两个方向都用同一个左 Riemann 和，步长取输入网格前两点之差（假定输入等间距），
//! 按输入顺序依次累加。精度完全取决于输入网格的疏密，粗网格或非等间距网格只能得到
//! 相应粗糙的结果。目标点 q = 0、r = 0 会除零，必须排除。
//!
//! 各目标点之间相互独立，用 rayon 并行；单个目标点内的累加保持顺序执行。
//!
//! ## 依赖关系
//! - 被 `commands/real.rs`, `commands/reciprocal.rs` 调用
//! - 使用 `structure::linspace` 生成目标网格

use crate::error::{FsmscError, Result};
use crate::models::Profile;
use crate::structure::linspace;

use rayon::prelude::*;
use std::f64::consts::PI;

/// 由 g(r) 变换得到的结构因子
#[derive(Debug, Clone)]
pub struct StructureFactor {
    /// 波数 q
    pub q: Vec<f64>,
    /// S(q)
    pub s: Vec<f64>,
}

impl Profile for StructureFactor {
    fn column_names(&self) -> (&'static str, &'static str) {
        ("q", "S_q")
    }

    fn axis_labels(&self) -> (&'static str, &'static str) {
        ("q", "S(q)")
    }

    fn x(&self) -> &[f64] {
        &self.q
    }

    fn y(&self) -> &[f64] {
        &self.s
    }
}

/// 由 S(q) 变换得到的对关联函数
#[derive(Debug, Clone)]
pub struct PairCorrelation {
    /// 半径 r
    pub r: Vec<f64>,
    /// g(r)
    pub g: Vec<f64>,
}

impl Profile for PairCorrelation {
    fn column_names(&self) -> (&'static str, &'static str) {
        ("r", "g_r")
    }

    fn axis_labels(&self) -> (&'static str, &'static str) {
        ("r", "g(r)")
    }

    fn x(&self) -> &[f64] {
        &self.r
    }

    fn y(&self) -> &[f64] {
        &self.g
    }
}

/// g(r) → S(q)，目标网格为 [q_min, q_max] 上的 `num_q` 个等分点
pub fn rdf_to_structure_factor(
    r: &[f64],
    g: &[f64],
    density: f64,
    q_min: f64,
    q_max: f64,
    num_q: usize,
) -> Result<StructureFactor> {
    validate(r, g, density, q_min, q_max, num_q, "q")?;

    let dr = r[1] - r[0];
    let h: Vec<f64> = g.iter().map(|v| v - 1.0).collect();
    let q = linspace(q_min, q_max, num_q);

    let s: Vec<f64> = q
        .par_iter()
        .map(|&qi| {
            let integral = sine_sum(r, &h, qi, dr);
            1.0 + 4.0 * PI * density * integral / qi
        })
        .collect();

    ensure_finite(&q, &s, "S(q)")?;
    Ok(StructureFactor { q, s })
}

/// S(q) → g(r)，目标网格为 [r_min, r_max] 上的 `num_r` 个等分点
pub fn structure_factor_to_rdf(
    q: &[f64],
    s: &[f64],
    density: f64,
    r_min: f64,
    r_max: f64,
    num_r: usize,
) -> Result<PairCorrelation> {
    validate(q, s, density, r_min, r_max, num_r, "r")?;

    let dq = q[1] - q[0];
    let h: Vec<f64> = s.iter().map(|v| v - 1.0).collect();
    let r = linspace(r_min, r_max, num_r);

    let g: Vec<f64> = r
        .par_iter()
        .map(|&ri| {
            let integral = sine_sum(q, &h, ri, dq);
            1.0 + 1.0 / (PI.powi(2) * density * 2.0) * integral / ri
        })
        .collect();

    ensure_finite(&r, &g, "g(r)")?;
    Ok(PairCorrelation { r, g })
}

/// Σ step · x · sin(k·x) · h(x)，按输入顺序累加
fn sine_sum(x: &[f64], h: &[f64], k: f64, step: f64) -> f64 {
    x.iter()
        .zip(h.iter())
        .fold(0.0, |acc, (&xi, &hi)| acc + step * xi * (k * xi).sin() * hi)
}

fn validate(
    x: &[f64],
    y: &[f64],
    density: f64,
    target_min: f64,
    target_max: f64,
    num: usize,
    target: &str,
) -> Result<()> {
    if x.len() != y.len() {
        return Err(FsmscError::invalid(format!(
            "input columns differ in length ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(FsmscError::invalid(
            "at least two input points are needed to define the integration step",
        ));
    }
    if !(density.is_finite() && density > 0.0) {
        return Err(FsmscError::invalid(format!(
            "number density must be positive, got {}",
            density
        )));
    }
    if num == 0 {
        return Err(FsmscError::invalid(format!(
            "number of {} points must be >= 1",
            target
        )));
    }
    if !(target_min.is_finite() && target_min > 0.0) {
        return Err(FsmscError::invalid(format!(
            "{}_min must be > 0 (the transform divides by {}), got {}",
            target, target, target_min
        )));
    }
    if !target_max.is_finite() || target_max < target_min {
        return Err(FsmscError::invalid(format!(
            "{}_max ({}) must not be smaller than {}_min ({})",
            target, target_max, target, target_min
        )));
    }
    Ok(())
}

fn ensure_finite(x: &[f64], y: &[f64], what: &str) -> Result<()> {
    match x.iter().zip(y.iter()).find(|(_, v)| !v.is_finite()) {
        Some((at, v)) => Err(FsmscError::NumericDegenerate(format!(
            "{} = {} at {}",
            what, v, at
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bump(r: f64) -> f64 {
        0.5 * (-(r - 2.0).powi(2) / (2.0 * 0.09)).exp()
    }

    #[test]
    fn test_ideal_gas_gives_unit_structure_factor() {
        let r = linspace(0.05, 5.0, 100);
        let g = vec![1.0; r.len()];
        let sq = rdf_to_structure_factor(&r, &g, 4.95, 1.0, 8.0, 50).unwrap();

        assert_eq!(sq.q.len(), 50);
        assert!(sq.s.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn test_forward_formula_small_grid() {
        // h = [1, 0]，只有第一项贡献：dr·1·sin(π/2)·1 = 1
        let sq = rdf_to_structure_factor(&[1.0, 2.0], &[2.0, 1.0], 1.0, PI / 2.0, PI / 2.0, 1)
            .unwrap();
        assert!((sq.s[0] - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_formula_small_grid() {
        let gr = structure_factor_to_rdf(&[1.0, 2.0], &[2.0, 1.0], 1.0, PI / 2.0, PI / 2.0, 1)
            .unwrap();
        let expected = 1.0 + 1.0 / PI.powi(3);
        assert!((gr.g[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_recovers_rdf() {
        let density = 0.8;
        let r = linspace(0.01, 10.0, 1000);
        let g: Vec<f64> = r.iter().map(|&x| 1.0 + bump(x)).collect();

        let sq = rdf_to_structure_factor(&r, &g, density, 0.02, 25.0, 1000).unwrap();
        let back = structure_factor_to_rdf(&sq.q, &sq.s, density, 0.5, 4.0, 50).unwrap();

        for (ri, gi) in back.r.iter().zip(back.g.iter()) {
            let expected = 1.0 + bump(*ri);
            assert!(
                (gi - expected).abs() < 0.05,
                "g({}) = {}, expected {}",
                ri,
                gi,
                expected
            );
        }
    }

    #[test]
    fn test_rejects_zero_targets() {
        let r = linspace(0.1, 5.0, 10);
        let g = vec![1.0; 10];
        assert!(matches!(
            rdf_to_structure_factor(&r, &g, 1.0, 0.0, 8.0, 10),
            Err(FsmscError::InvalidInput(_))
        ));
        assert!(matches!(
            structure_factor_to_rdf(&r, &g, 1.0, -1.0, 5.0, 10),
            Err(FsmscError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_inputs() {
        let r = linspace(0.1, 5.0, 10);
        assert!(rdf_to_structure_factor(&r, &[1.0; 9], 1.0, 1.0, 8.0, 10).is_err());
        assert!(rdf_to_structure_factor(&[1.0], &[1.0], 1.0, 1.0, 8.0, 10).is_err());
        assert!(rdf_to_structure_factor(&r, &[1.0; 10], 0.0, 1.0, 8.0, 10).is_err());
        assert!(rdf_to_structure_factor(&r, &[1.0; 10], 1.0, 1.0, 8.0, 0).is_err());
        assert!(rdf_to_structure_factor(&r, &[1.0; 10], 1.0, 8.0, 1.0, 10).is_err());
    }

    #[test]
    fn test_non_finite_input_is_degenerate() {
        let r = linspace(0.1, 5.0, 10);
        let mut g = vec![1.0; 10];
        g[3] = f64::NAN;
        assert!(matches!(
            rdf_to_structure_factor(&r, &g, 1.0, 1.0, 8.0, 10),
            Err(FsmscError::NumericDegenerate(_))
        ));
    }
}
