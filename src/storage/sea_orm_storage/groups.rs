//! 解题小组存储操作

use super::SeaOrmStorage;
use crate::entity::{group_mates, groups};
use crate::errors::{HwProjError, Result};
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 创建解题小组并登记成员，返回小组 id
    pub async fn create_course_group_impl(
        &self,
        course_id: i64,
        student_ids: &[i64],
    ) -> Result<i64> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HwProjError::database_operation(format!("开启事务失败: {e}")))?;

        let group = groups::ActiveModel {
            course_id: Set(course_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        let created = group
            .insert(&txn)
            .await
            .map_err(|e| HwProjError::database_operation(format!("创建小组失败: {e}")))?;

        for student_id in student_ids {
            let mate = group_mates::ActiveModel {
                group_id: Set(created.id),
                student_id: Set(*student_id),
                ..Default::default()
            };
            mate.insert(&txn)
                .await
                .map_err(|e| HwProjError::database_operation(format!("登记小组成员失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| HwProjError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(created.id)
    }
}
