use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{HwProjError, Result};
use crate::models::accounts::entities::{AccountData, User, UserRole};
use crate::storage::CreateUserData;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, user: CreateUserData) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            name: Set(user.name),
            surname: Set(user.surname),
            middle_name: Set(user.middle_name),
            role: Set(user.role.to_string()),
            is_external_auth: Set(user.is_external_auth),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户及密码哈希
    pub async fn get_user_credentials_impl(&self, email: &str) -> Result<Option<(User, String)>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| {
            let hash = m.password_hash.clone();
            (m.into_user(), hash)
        }))
    }

    /// 批量解析账户资料，保持入参顺序，未知 id 跳过
    pub async fn get_accounts_data_impl(&self, user_ids: &[i64]) -> Result<Vec<AccountData>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Users::find()
            .filter(Column::Id.is_in(user_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("批量查询用户失败: {e}")))?;

        let by_id: std::collections::HashMap<i64, AccountData> = models
            .into_iter()
            .map(|m| (m.id, m.into_user().to_account_data()))
            .collect();

        Ok(user_ids
            .iter()
            .filter_map(|id| by_id.get(id).cloned())
            .collect())
    }

    /// 列出全部讲师，按姓氏、名字排序
    pub async fn get_all_lecturers_impl(&self) -> Result<Vec<AccountData>> {
        let models = Users::find()
            .filter(Column::Role.eq(UserRole::LECTURER))
            .order_by_asc(Column::Surname)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询讲师列表失败: {e}")))?;

        Ok(models
            .into_iter()
            .map(|m| m.into_user().to_account_data())
            .collect())
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let Some(model) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询用户失败: {e}")))?
        else {
            return Ok(false);
        };

        let now = chrono::Utc::now().timestamp();
        let mut active: ActiveModel = model.into();
        active.last_login = Set(Some(now));
        active.updated_at = Set(now);

        active
            .update(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("更新登录时间失败: {e}")))?;

        Ok(true)
    }
}
