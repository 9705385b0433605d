//! # 自中间散射函数 F_s(q, t)
//!
//! 以第一帧为参考，计算同一组粒子随时间的单粒子密度自关联：
//!
//! ```text
//! F_R(t) = ⟨cos(−q·Δr_j(t))⟩,  F_I(t) = ⟨sin(−q·Δr_j(t))⟩
//! F_s(q, t) = sqrt(F_R² + F_I²),  Δr_j(t) = x_j(t) − x_j(0)
//! ```
//!
//! 波矢沿体对角线取 q = (2π/Lx·n, 2π/Ly·n, 2π/Lz·n)，盒长取自参考帧。
//! 位移不做周期折回，输入应为未折回（unwrapped）坐标，且各帧粒子顺序一致。
//!
//! ## 依赖关系
//! - 被 `commands/reciprocal.rs` 调用
//! - 使用 `models/frame.rs` 的 Frame, ParticleSet

use crate::error::{FsmscError, Result};
use crate::models::{Frame, ParticleSet, Profile};

use rayon::prelude::*;
use std::f64::consts::PI;

/// 自中间散射函数
#[derive(Debug, Clone)]
pub struct IntermediateScattering {
    /// 相对参考帧的时间
    pub time: Vec<f64>,
    /// F_s(q, t)
    pub fs: Vec<f64>,
    /// 使用的波矢
    pub wave_vector: [f64; 3],
}

impl Profile for IntermediateScattering {
    fn column_names(&self) -> (&'static str, &'static str) {
        ("t", "F_s")
    }

    fn axis_labels(&self) -> (&'static str, &'static str) {
        ("t", "F_s(q, t)")
    }

    fn x(&self) -> &[f64] {
        &self.time
    }

    fn y(&self) -> &[f64] {
        &self.fs
    }
}

/// 计算某类粒子的 F_s(q, t)
///
/// `time_step` 为每个模拟步对应的时间，时间轴 = (步数 − 参考步数)·time_step。
pub fn self_intermediate_scattering(
    frames: &[Frame],
    kind: i32,
    n: usize,
    time_step: f64,
) -> Result<IntermediateScattering> {
    let reference = frames
        .first()
        .ok_or_else(|| FsmscError::invalid("at least one frame is required"))?;
    if n == 0 {
        return Err(FsmscError::invalid("wave vector index n must be >= 1"));
    }
    if !time_step.is_finite() {
        return Err(FsmscError::invalid("time step must be finite"));
    }
    reference.simulation_box.validate()?;

    let x0 = reference.select(kind);
    if x0.is_empty() {
        return Err(FsmscError::invalid(format!(
            "no particles of type {} in reference frame {}",
            kind, reference.index
        )));
    }

    let q = x0.box_lengths().map(|l| 2.0 * PI / l * n as f64);

    let selections: Vec<_> = frames.iter().map(|f| f.select(kind)).collect();
    if let Some(bad) = selections.iter().find(|s| s.count() != x0.count()) {
        return Err(FsmscError::invalid(format!(
            "frame {} has {} particles of type {}, reference has {}",
            bad.frame_index,
            bad.count(),
            kind,
            x0.count()
        )));
    }

    let fs: Vec<f64> = selections
        .par_iter()
        .map(|xt| self_correlation(&q, x0.positions(), xt.positions()))
        .collect();

    let t0 = reference.timestep as f64;
    let time = frames
        .iter()
        .map(|f| (f.timestep as f64 - t0) * time_step)
        .collect();

    Ok(IntermediateScattering {
        time,
        fs,
        wave_vector: q,
    })
}

/// |⟨exp(−i q·Δr)⟩|
fn self_correlation(q: &[f64; 3], x0: &[[f64; 3]], xt: &[[f64; 3]]) -> f64 {
    let (re, im) = x0
        .iter()
        .zip(xt.iter())
        .fold((0.0, 0.0), |(re, im), (a, b)| {
            let phase = -q[0] * (b[0] - a[0]) + -q[1] * (b[1] - a[1]) + -q[2] * (b[2] - a[2]);
            (re + phase.cos(), im + phase.sin())
        });
    let count = x0.len() as f64;
    let (re, im) = (re / count, im / count);
    (re * re + im * im).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SimulationBox;

    fn frame(index: usize, timestep: u64, positions: Vec<[f64; 3]>) -> Frame {
        let n = positions.len();
        Frame::new(index, positions, vec![2; n], SimulationBox::cubic(10.0))
            .unwrap()
            .with_timestep(timestep)
    }

    #[test]
    fn test_static_trajectory_is_fully_correlated() {
        let positions = vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let frames: Vec<Frame> = (0..4)
            .map(|i| frame(i, 2 * i as u64, positions.clone()))
            .collect();

        let fsq = self_intermediate_scattering(&frames, 2, 3, 0.5).unwrap();
        assert_eq!(fsq.fs.len(), 4);
        assert!(fsq.fs.iter().all(|&f| (f - 1.0).abs() < 1e-12));
        assert_eq!(fsq.time, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_half_wavelength_displacement_decorrelates() {
        // q_x = 2π/10，两个粒子分别移动 0 和半个波长：相位 0 与 π 抵消
        let x0 = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        let x1 = vec![[0.0, 0.0, 0.0], [6.0, 1.0, 1.0]];
        let frames = vec![frame(0, 0, x0), frame(1, 10, x1)];

        let fsq = self_intermediate_scattering(&frames, 2, 1, 1.0).unwrap();
        assert!((fsq.fs[0] - 1.0).abs() < 1e-12);
        assert!(fsq.fs[1].abs() < 1e-12);
        assert!((fsq.wave_vector[0] - 2.0 * PI / 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_translation_keeps_unit_modulus() {
        let x0 = vec![[0.0, 0.0, 0.0], [3.0, 1.0, 2.0]];
        let x1 = vec![[0.7, 0.2, 0.1], [3.7, 1.2, 2.1]];
        let fsq = self_intermediate_scattering(&[frame(0, 0, x0), frame(1, 1, x1)], 2, 2, 1.0)
            .unwrap();
        assert!((fsq.fs[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_errors() {
        let f0 = frame(0, 0, vec![[0.0; 3], [1.0; 3]]);
        let f1 = frame(1, 1, vec![[0.0; 3]]);
        assert!(self_intermediate_scattering(&[], 2, 1, 1.0).is_err());
        assert!(self_intermediate_scattering(&[f0.clone()], 2, 0, 1.0).is_err());
        assert!(self_intermediate_scattering(&[f0.clone()], 1, 1, 1.0).is_err());
        assert!(matches!(
            self_intermediate_scattering(&[f0, f1], 2, 1, 1.0),
            Err(FsmscError::InvalidInput(_))
        ));
    }
}
