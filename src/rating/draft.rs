//! 评分草稿存储
//!
//! 草稿按 (讲师, 任务, 学生, 解答) 维度隔离，存放在对象缓存里，
//! 超过保留时长自动过期。尚无解答时（平台外交付评分）解答位记为 new，
//! 同一学生同一任务的不同解答互不串稿。

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cache::{self, ObjectCache};
use crate::config::AppConfig;

/// 评分草稿内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rating.ts")]
pub struct RatingDraft {
    pub points: i32,
    pub lecturer_comment: String,
}

/// 草稿存取封装
#[derive(Clone)]
pub struct RatingDraftStore {
    cache: Arc<dyn ObjectCache>,
}

impl RatingDraftStore {
    pub fn new(cache: Arc<dyn ObjectCache>) -> Self {
        Self { cache }
    }

    fn draft_key(
        lecturer_id: i64,
        task_id: i64,
        student_id: i64,
        solution_id: Option<i64>,
    ) -> String {
        match solution_id {
            Some(sid) => format!("rating-draft:{lecturer_id}:{task_id}:{student_id}:{sid}"),
            None => format!("rating-draft:{lecturer_id}:{task_id}:{student_id}:new"),
        }
    }

    /// 读取草稿，不存在或已过期返回 None
    pub async fn get(
        &self,
        lecturer_id: i64,
        task_id: i64,
        student_id: i64,
        solution_id: Option<i64>,
    ) -> Option<RatingDraft> {
        let key = Self::draft_key(lecturer_id, task_id, student_id, solution_id);
        cache::get_json::<RatingDraft>(self.cache.as_ref(), &key)
            .await
            .into_option()
    }

    /// 写入草稿，每次编辑覆盖写
    pub async fn put(
        &self,
        lecturer_id: i64,
        task_id: i64,
        student_id: i64,
        solution_id: Option<i64>,
        draft: &RatingDraft,
    ) {
        let key = Self::draft_key(lecturer_id, task_id, student_id, solution_id);
        let ttl = AppConfig::get().rating.draft_ttl;
        cache::insert_json(self.cache.as_ref(), key, draft, ttl).await;
    }

    /// 清除草稿（取消编辑或评分提交后）
    pub async fn clear(
        &self,
        lecturer_id: i64,
        task_id: i64,
        student_id: i64,
        solution_id: Option<i64>,
    ) {
        let key = Self::draft_key(lecturer_id, task_id, student_id, solution_id);
        self.cache.remove(&key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheResult;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapCache {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MapCache {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                entries: Mutex::new(HashMap::new()),
            })
        }
    }

    #[async_trait]
    impl ObjectCache for MapCache {
        async fn get_raw(&self, key: &str) -> CacheResult<String> {
            match self.entries.lock().unwrap().get(key) {
                Some(value) => CacheResult::Found(value.clone()),
                None => CacheResult::NotFound,
            }
        }

        async fn insert_raw(&self, key: String, value: String, _ttl: u64) {
            self.entries.lock().unwrap().insert(key, value);
        }

        async fn remove(&self, key: &str) {
            self.entries.lock().unwrap().remove(key);
        }

        async fn invalidate_all(&self) {
            self.entries.lock().unwrap().clear();
        }
    }

    fn draft(points: i32, comment: &str) -> RatingDraft {
        RatingDraft {
            points,
            lecturer_comment: comment.to_string(),
        }
    }

    #[tokio::test]
    async fn test_drafts_for_different_solutions_do_not_collide() {
        let store = RatingDraftStore::new(MapCache::new());
        let draft_a = draft(5, "по первому решению");
        store.put(1, 10, 100, Some(1), &draft_a).await;

        // 同一 (讲师, 任务, 学生) 的另一份解答读不到第一份的草稿
        assert_eq!(store.get(1, 10, 100, Some(2)).await, None);
        assert_eq!(store.get(1, 10, 100, Some(1)).await, Some(draft_a));
    }

    #[tokio::test]
    async fn test_no_solution_axis_is_distinct_from_solution_keys() {
        let store = RatingDraftStore::new(MapCache::new());
        let empty_draft = draft(8, "сдано вне сервиса");
        store.put(1, 10, 100, None, &empty_draft).await;

        assert_eq!(store.get(1, 10, 100, Some(1)).await, None);
        assert_eq!(store.get(1, 10, 100, None).await, Some(empty_draft));
    }

    #[tokio::test]
    async fn test_clear_removes_only_the_targeted_solution_draft() {
        let store = RatingDraftStore::new(MapCache::new());
        let draft_a = draft(5, "черновик A");
        let draft_b = draft(7, "черновик B");
        store.put(1, 10, 100, Some(1), &draft_a).await;
        store.put(1, 10, 100, Some(2), &draft_b).await;

        store.clear(1, 10, 100, Some(1)).await;

        assert_eq!(store.get(1, 10, 100, Some(1)).await, None);
        assert_eq!(store.get(1, 10, 100, Some(2)).await, Some(draft_b));
    }
}
