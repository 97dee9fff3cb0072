//! 评分组件状态机
//!
//! 四种状态：未评分/未编辑、未评分/编辑中、已评分/未编辑、已评分/编辑中。
//! 编辑中的每次修改产生一份草稿，取消编辑回退到服务端确认值并清除草稿。
//! 纯状态逻辑，草稿落盘由调用方通过 [`super::RatingDraftStore`] 完成。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::draft::RatingDraft;

/// 分数输入形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/rating.ts")]
pub enum RatingDisplay {
    /// 离散星级
    Stars,
    /// 自由数字输入（支持超出满分的加分）
    Numeric,
}

/// 评分组件状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rating.ts")]
pub struct RatingWidget {
    /// 任务满分
    pub max_rating: i32,
    /// 服务端确认的分数（尚无评分时为 0）
    pub server_points: i32,
    /// 服务端确认的评语
    pub server_comment: String,
    /// 当前展示的分数
    pub points: i32,
    /// 当前展示的评语
    pub lecturer_comment: String,
    /// 是否处于编辑状态
    pub clicked_for_rate: bool,
    /// 讲师是否请求了特殊评分（强制数字输入，允许加分）
    pub add_bonus_points: bool,
}

impl RatingWidget {
    /// 初始化组件：草稿存在时以草稿为准，否则取服务端确认值
    pub fn seed(
        max_rating: i32,
        server_points: i32,
        server_comment: impl Into<String>,
        draft: Option<&RatingDraft>,
    ) -> Self {
        let server_comment = server_comment.into();
        let (points, lecturer_comment) = match draft {
            Some(d) => (d.points, d.lecturer_comment.clone()),
            None => (server_points, server_comment.clone()),
        };
        Self {
            max_rating,
            server_points,
            server_comment,
            points,
            lecturer_comment,
            clicked_for_rate: false,
            add_bonus_points: false,
        }
    }

    /// 分数输入形态：满分不超过 10、当前分数在范围内且未请求特殊评分时用星级
    pub fn display(&self) -> RatingDisplay {
        if self.max_rating <= 10 && self.points <= self.max_rating && !self.add_bonus_points {
            RatingDisplay::Stars
        } else {
            RatingDisplay::Numeric
        }
    }

    /// 讲师开始与评分控件交互
    pub fn begin_editing(&mut self) {
        self.clicked_for_rate = true;
    }

    /// 请求特殊评分（数字输入 + 加分）
    pub fn enable_bonus_points(&mut self) {
        self.add_bonus_points = true;
        self.clicked_for_rate = true;
    }

    /// 修改分数，返回应当落盘的草稿
    pub fn set_points(&mut self, points: i32) -> RatingDraft {
        self.clicked_for_rate = true;
        self.points = points;
        self.current_draft()
    }

    /// 修改评语，返回应当落盘的草稿
    pub fn set_comment(&mut self, comment: impl Into<String>) -> RatingDraft {
        self.clicked_for_rate = true;
        self.lecturer_comment = comment.into();
        self.current_draft()
    }

    /// 取消编辑：回退到服务端确认值。调用方须同时清除草稿。
    pub fn cancel(&mut self) {
        self.points = self.server_points;
        self.lecturer_comment = self.server_comment.clone();
        self.clicked_for_rate = false;
        self.add_bonus_points = false;
    }

    /// 提交评分：退出编辑状态，展示值成为服务端确认值。
    /// 返回提交内容 (分数, 评语)。调用方须同时清除草稿。
    pub fn submit(&mut self) -> (i32, String) {
        self.server_points = self.points;
        self.server_comment = self.lecturer_comment.clone();
        self.clicked_for_rate = false;
        self.add_bonus_points = false;
        (self.points, self.lecturer_comment.clone())
    }

    fn current_draft(&self) -> RatingDraft {
        RatingDraft {
            points: self.points,
            lecturer_comment: self.lecturer_comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_from_server_when_no_draft() {
        let widget = RatingWidget::seed(10, 7, "хорошо", None);
        assert_eq!(widget.points, 7);
        assert_eq!(widget.lecturer_comment, "хорошо");
        assert!(!widget.clicked_for_rate);
    }

    #[test]
    fn test_seed_prefers_draft_over_server() {
        let draft = RatingDraft {
            points: 9,
            lecturer_comment: "почти отлично".to_string(),
        };
        let widget = RatingWidget::seed(10, 7, "хорошо", Some(&draft));
        assert_eq!(widget.points, 9);
        assert_eq!(widget.lecturer_comment, "почти отлично");
        // 草稿只影响展示值，服务端确认值保持不变
        assert_eq!(widget.server_points, 7);
    }

    #[test]
    fn test_editing_produces_draft_per_change() {
        let mut widget = RatingWidget::seed(10, 0, "", None);
        let d1 = widget.set_points(5);
        assert_eq!(d1.points, 5);
        assert!(widget.clicked_for_rate);

        let d2 = widget.set_comment("нужно доработать");
        assert_eq!(d2.points, 5);
        assert_eq!(d2.lecturer_comment, "нужно доработать");
    }

    #[test]
    fn test_cancel_reverts_to_server_values() {
        let mut widget = RatingWidget::seed(10, 7, "хорошо", None);
        widget.set_points(2);
        widget.set_comment("черновик");
        widget.cancel();

        assert_eq!(widget.points, 7);
        assert_eq!(widget.lecturer_comment, "хорошо");
        assert!(!widget.clicked_for_rate);
    }

    #[test]
    fn test_submit_exits_editing_and_confirms_values() {
        let mut widget = RatingWidget::seed(10, 0, "", None);
        widget.set_points(8);
        widget.set_comment("зачтено");
        let (points, comment) = widget.submit();

        assert_eq!(points, 8);
        assert_eq!(comment, "зачтено");
        assert!(!widget.clicked_for_rate);
        assert_eq!(widget.server_points, 8);

        // 提交后取消不再回退
        widget.cancel();
        assert_eq!(widget.points, 8);
    }

    #[test]
    fn test_stars_for_small_max_rating_in_range() {
        let widget = RatingWidget::seed(10, 7, "", None);
        assert_eq!(widget.display(), RatingDisplay::Stars);
    }

    #[test]
    fn test_numeric_for_large_max_rating() {
        let widget = RatingWidget::seed(100, 50, "", None);
        assert_eq!(widget.display(), RatingDisplay::Numeric);
    }

    #[test]
    fn test_numeric_when_points_exceed_max() {
        let mut widget = RatingWidget::seed(10, 0, "", None);
        widget.set_points(12);
        assert_eq!(widget.display(), RatingDisplay::Numeric);
    }

    #[test]
    fn test_numeric_when_bonus_points_requested() {
        let mut widget = RatingWidget::seed(10, 5, "", None);
        widget.enable_bonus_points();
        assert_eq!(widget.display(), RatingDisplay::Numeric);
    }
}
