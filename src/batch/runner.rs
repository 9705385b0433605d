//! # 批量执行器
//!
//! 并行执行逐帧计算任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，线程数可配置
//! - 进度条显示
//! - 单帧失败不影响其余帧，失败原因汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/real.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{FsmscError, Result};
use crate::utils::progress;

use rayon::prelude::*;

/// 单帧处理结果
#[derive(Debug, Clone)]
pub enum FrameOutcome<R> {
    /// 处理成功
    Done(usize, R),
    /// 处理失败 (帧序号, 错误信息)
    Failed(usize, String),
}

/// 批量处理结果统计
#[derive(Debug)]
pub struct BatchResult<R> {
    /// 成功帧的结果，按帧序号排列
    pub outputs: Vec<(usize, R)>,
    /// 失败详情
    pub failures: Vec<(usize, String)>,
}

impl<R> Default for BatchResult<R> {
    fn default() -> Self {
        BatchResult {
            outputs: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<R> BatchResult<R> {
    /// 合并单帧结果
    pub fn merge(&mut self, outcome: FrameOutcome<R>) {
        match outcome {
            FrameOutcome::Done(index, value) => self.outputs.push((index, value)),
            FrameOutcome::Failed(index, err) => self.failures.push((index, err)),
        }
    }

    pub fn success(&self) -> usize {
        self.outputs.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success() + self.failed()
    }

    /// 只保留结果值
    pub fn into_values(self) -> Vec<R> {
        self.outputs.into_iter().map(|(_, v)| v).collect()
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
    show_progress: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs = 0` 时使用全部 CPU 核心
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self {
            jobs,
            show_progress: true,
        }
    }

    /// 关闭进度条
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理帧序号列表
    pub fn run<R, F>(&self, indices: &[usize], processor: F) -> Result<BatchResult<R>>
    where
        R: Send,
        F: Fn(usize) -> Result<R> + Sync + Send,
    {
        let pb = if self.show_progress {
            progress::frame_bar(indices.len() as u64, "frames")
        } else {
            indicatif::ProgressBar::hidden()
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| FsmscError::Other(format!("failed to build thread pool: {}", e)))?;

        let outcomes: Vec<FrameOutcome<R>> = pool.install(|| {
            indices
                .par_iter()
                .map(|&index| {
                    let outcome = match processor(index) {
                        Ok(value) => FrameOutcome::Done(index, value),
                        Err(e) => FrameOutcome::Failed(index, e.to_string()),
                    };
                    pb.inc(1);
                    outcome
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut result = BatchResult::default();
        for outcome in outcomes {
            result.merge(outcome);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_are_skipped() {
        let runner = BatchRunner::new(2).quiet();
        let indices: Vec<usize> = (0..6).collect();

        let result = runner
            .run(&indices, |i| {
                if i == 3 {
                    Err(FsmscError::invalid("bad frame"))
                } else {
                    Ok(i * 10)
                }
            })
            .unwrap();

        assert_eq!(result.total(), 6);
        assert_eq!(result.failed(), 1);
        assert_eq!(result.failures[0].0, 3);
        assert!(result.failures[0].1.contains("bad frame"));
        // 保持帧顺序
        assert_eq!(result.into_values(), vec![0, 10, 20, 40, 50]);
    }

    #[test]
    fn test_auto_jobs() {
        assert_eq!(BatchRunner::new(0).jobs(), num_cpus::get());
        assert_eq!(BatchRunner::new(3).jobs(), 3);
    }
}
