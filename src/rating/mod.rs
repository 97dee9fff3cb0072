//! 评分组件状态
//!
//! 讲师评分是两段式的：先在评分组件里编辑分数与评语（草稿随编辑落盘，
//! 换设备或刷新后可恢复），提交后草稿清除、解答进入已评分状态。

pub mod draft;
pub mod widget;

pub use draft::RatingDraftStore;
pub use widget::{RatingDisplay, RatingWidget};
