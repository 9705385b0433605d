//! # 一维曲线接口
//!
//! g(r)、S(q)、F_s(q,t) 都是 (x, y) 两列数据，导出和绘图只依赖这个接口。
//!
//! ## 依赖关系
//! - 被 `structure/` 的结果类型实现
//! - 被 `structure/export.rs`, `structure/plot.rs` 使用

/// 两列数据曲线
pub trait Profile {
    /// 列名 (x, y)，用作 CSV 表头
    fn column_names(&self) -> (&'static str, &'static str);

    /// 坐标轴标题 (x, y)
    fn axis_labels(&self) -> (&'static str, &'static str) {
        self.column_names()
    }

    fn x(&self) -> &[f64];

    fn y(&self) -> &[f64];

    fn len(&self) -> usize {
        self.x().len()
    }

    fn is_empty(&self) -> bool {
        self.x().is_empty()
    }

    /// 按顺序配对的数据点
    fn points(&self) -> Vec<(f64, f64)> {
        self.x()
            .iter()
            .copied()
            .zip(self.y().iter().copied())
            .collect()
    }
}
