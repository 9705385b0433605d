//! # 周期边界几何
//!
//! 正交周期盒子中的最小镜像位移。
//!
//! ## 算法
//! 每个轴独立处理：若 d > L/2 则 d -= L；若 d <= -L/2 则 d += L（只平移一次）。
//!
//! 只有当下游使用的截断半径不超过各轴半盒长时结果才正确；
//! 截断半径大于半盒长的情况不做修正，由调用方（`rdf.rs`）提前拒绝。
//!
//! ## 依赖关系
//! - 被 `structure/rdf.rs` 调用
//! - 无外部模块依赖

/// 单个位移分量的最小镜像
#[inline]
pub fn wrap_component(d: f64, length: f64) -> f64 {
    if d > 0.5 * length {
        d - length
    } else if d <= -0.5 * length {
        d + length
    } else {
        d
    }
}

/// 位移向量的最小镜像
#[inline]
pub fn minimum_image(d: [f64; 3], lengths: [f64; 3]) -> [f64; 3] {
    [
        wrap_component(d[0], lengths[0]),
        wrap_component(d[1], lengths[1]),
        wrap_component(d[2], lengths[2]),
    ]
}

/// 向量模长
#[inline]
pub fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// 坐标折回盒内 [0, L)
///
/// 未折回（unwrapped）坐标可能相隔多个盒长，单次平移的最小镜像对它们不成立，
/// 计算距离前先折回。
#[inline]
pub fn wrap_position(x: [f64; 3], lengths: [f64; 3]) -> [f64; 3] {
    [
        x[0].rem_euclid(lengths[0]),
        x[1].rem_euclid(lengths[1]),
        x[2].rem_euclid(lengths[2]),
    ]
}

/// 参考粒子 `i` 到 `others` 中每个粒子的最小镜像位移 x_j - x_i
///
/// `others` 中等于 `i` 的索引被跳过，自身距离不计算。按 `others` 的顺序惰性产生。
pub fn neighbor_displacements<'a, I>(
    i: usize,
    positions: &'a [[f64; 3]],
    others: I,
    lengths: [f64; 3],
) -> impl Iterator<Item = [f64; 3]> + 'a
where
    I: IntoIterator<Item = usize>,
    I::IntoIter: 'a,
{
    let xi = positions[i];
    others.into_iter().filter(move |&j| j != i).map(move |j| {
        let xj = positions[j];
        minimum_image([xj[0] - xi[0], xj[1] - xi[1], xj[2] - xi[2]], lengths)
    })
}

/// 参考粒子 `i` 到 `others` 的最小镜像距离
pub fn neighbor_distances<'a, I>(
    i: usize,
    positions: &'a [[f64; 3]],
    others: I,
    lengths: [f64; 3],
) -> impl Iterator<Item = f64> + 'a
where
    I: IntoIterator<Item = usize>,
    I::IntoIter: 'a,
{
    neighbor_displacements(i, positions, others, lengths).map(norm)
}
