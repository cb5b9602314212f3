//! Dialog texts shown by the use cases.

use portal_core::PortalError;
use portal_core::notifier::Notice;

pub const CREDENTIALS_REQUIRED: &str = "請輸入帳號密碼";
pub const LOGIN_SUCCESS_TITLE: &str = "登入成功";
pub const LOGIN_FAILED_TITLE: &str = "登入失敗";
pub const ERROR_TITLE: &str = "錯誤";
pub const SERVER_UNREACHABLE: &str = "無法連線到伺服器";
pub const SESSION_EXPIRED: &str = "登入已過期，請重新登入";
pub const SUMMARY_BUSY_TITLE: &str = "AI 正在閱讀對話紀錄...";
pub const SUMMARY_BUSY_TEXT: &str = "請稍候，Gemini 正在分析重點";
pub const SUMMARY_FAILED_TITLE: &str = "失敗";
pub const SUMMARY_FAILED: &str = "AI 目前忙碌中";
pub const REPLY_NOT_OFFERED: &str = "此紀錄無法回覆";

/// Dialog for a failed login attempt.
pub fn login_failure(err: &PortalError) -> Notice {
    match err {
        PortalError::Validation(text) => Notice::warning(ERROR_TITLE, text.clone()),
        PortalError::Rejected { message, .. } => Notice::error(LOGIN_FAILED_TITLE, message.clone()),
        _ => Notice::error(ERROR_TITLE, SERVER_UNREACHABLE),
    }
}

/// Dialog for a failed action on the dashboard.
pub fn action_failure(err: &PortalError) -> Notice {
    match err {
        PortalError::Validation(text) => Notice::warning(ERROR_TITLE, text.clone()),
        PortalError::Rejected { message, .. } => Notice::error(ERROR_TITLE, message.clone()),
        PortalError::Unauthorized => Notice::warning(ERROR_TITLE, SESSION_EXPIRED),
        _ => Notice::error(ERROR_TITLE, SERVER_UNREACHABLE),
    }
}
