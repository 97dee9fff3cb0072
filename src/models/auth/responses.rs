use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::accounts::entities::AccountData;

// 登录/刷新响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AccountData,
}
