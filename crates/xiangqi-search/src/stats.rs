//! 探索計測（PerformanceMonitor）
//!
//! 評価ノード数・生成手数・経過時間を記録する。リセットは呼び出し側が明示的に行う
//! （探索ごとに自動ではクリアしない）。

use std::time::{Duration, Instant};

/// 計測値のスナップショット
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct MonitorSnapshot {
    /// 静的評価を行ったノード数
    pub nodes_evaluated: u64,
    /// 生成した指し手数
    pub moves_generated: u64,
    /// 置換表によるカットオフ回数
    pub tt_cutoffs: u64,
    /// 完了した探索の回数
    pub searches: u64,
    /// 累積経過時間（秒）
    pub total_secs: f64,
    /// 秒間ノード数
    pub nps: f64,
}

/// 探索計測カウンタ
#[derive(Debug, Clone, Default)]
pub struct PerformanceMonitor {
    nodes_evaluated: u64,
    moves_generated: u64,
    tt_cutoffs: u64,
    searches: u64,
    total_time: Duration,
    started: Option<Instant>,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 計測開始
    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    /// 計測終了。経過時間を累積して返す
    ///
    /// `start_timer` を呼んでいない場合はゼロを返す。
    pub fn end_timer(&mut self) -> Duration {
        let Some(start) = self.started.take() else {
            return Duration::ZERO;
        };
        let elapsed = start.elapsed();
        self.total_time += elapsed;
        self.searches += 1;
        elapsed
    }

    #[inline]
    pub fn record_node_evaluation(&mut self, count: u64) {
        self.nodes_evaluated += count;
    }

    #[inline]
    pub fn record_move_generation(&mut self, count: u64) {
        self.moves_generated += count;
    }

    #[inline]
    pub fn record_tt_cutoff(&mut self) {
        self.tt_cutoffs += 1;
    }

    #[inline]
    pub fn nodes_evaluated(&self) -> u64 {
        self.nodes_evaluated
    }

    #[inline]
    pub fn moves_generated(&self) -> u64 {
        self.moves_generated
    }

    #[inline]
    pub fn tt_cutoffs(&self) -> u64 {
        self.tt_cutoffs
    }

    #[inline]
    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    /// 秒間ノード数（計測時間がなければ0）
    pub fn nps(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs > 0.0 {
            self.nodes_evaluated as f64 / secs
        } else {
            0.0
        }
    }

    /// 全カウンタをリセット
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            nodes_evaluated: self.nodes_evaluated,
            moves_generated: self.moves_generated,
            tt_cutoffs: self.tt_cutoffs,
            searches: self.searches,
            total_secs: self.total_time.as_secs_f64(),
            nps: self.nps(),
        }
    }

    /// 統計をフォーマットして文字列として返す
    pub fn format_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Performance Statistics ===\n");
        report.push_str(&format!("Nodes evaluated:     {:>12}\n", self.nodes_evaluated));
        report.push_str(&format!("Moves generated:     {:>12}\n", self.moves_generated));
        report.push_str(&format!("TT cutoffs:          {:>12}\n", self.tt_cutoffs));
        report.push_str(&format!("Searches:            {:>12}\n", self.searches));
        report.push_str(&format!(
            "Total time:          {:>11.2}s\n",
            self.total_time.as_secs_f64()
        ));
        report.push_str(&format!("Nodes per second:    {:>12.0}\n", self.nps()));
        report
    }
}
