//! 회원가입/로그인/정보수정/탈퇴 입력 검증
//! 검증 메시지는 화면에 그대로 노출된다.
// region:    --- Imports
use super::model::{DeleteUserRequest, LoginRequest, RegisterRequest, UpdateUserRequest};
use crate::error::{ClientError, ClientResult};

// endregion: --- Imports

const MIN_PASSWORD_LEN: usize = 6;
const MIN_USERNAME_LEN: usize = 2;
const MAX_USERNAME_LEN: usize = 50;

fn invalid<T>(message: &str) -> ClientResult<T> {
    Err(ClientError::ValidationFailed(message.to_string()))
}

// region:    --- Register
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub username: String,
}

impl RegisterForm {
    pub fn validate(&self) -> ClientResult<RegisterRequest> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return invalid("올바른 이메일 주소를 입력해주세요.");
        }
        if self.password != self.password_confirm {
            return invalid("비밀번호가 일치하지 않습니다.");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return invalid("비밀번호는 최소 6자 이상이어야 합니다.");
        }
        let username = self.username.trim();
        if username.chars().count() < MIN_USERNAME_LEN {
            return invalid("사용자명은 최소 2자 이상이어야 합니다.");
        }

        Ok(RegisterRequest {
            email: email.to_string(),
            password: self.password.clone(),
            username: username.to_string(),
        })
    }
}

// endregion: --- Register

// region:    --- Login
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> ClientResult<LoginRequest> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return invalid("이메일과 비밀번호를 입력해주세요.");
        }
        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

// endregion: --- Login

// region:    --- Update Profile
/// 정보 수정. 비어 있는 항목은 변경하지 않는다.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileForm {
    pub username: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub new_password_confirm: Option<String>,
}

impl UpdateProfileForm {
    pub fn validate(&self) -> ClientResult<UpdateUserRequest> {
        let username = non_blank(&self.username);
        let new_password = non_blank(&self.new_password);
        let current_password = non_blank(&self.current_password);

        if let Some(username) = &username {
            let len = username.chars().count();
            if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
                return invalid("사용자명은 2자 이상 50자 이하여야 합니다.");
            }
        }

        if let Some(new_password) = &new_password {
            if new_password.chars().count() < MIN_PASSWORD_LEN {
                return invalid("비밀번호는 최소 6자 이상이어야 합니다.");
            }
            if non_blank(&self.new_password_confirm).as_deref() != Some(new_password.as_str()) {
                return invalid("새 비밀번호가 일치하지 않습니다.");
            }
            if current_password.is_none() {
                return invalid("현재 비밀번호를 입력해주세요.");
            }
        }

        if username.is_none() && new_password.is_none() {
            return invalid("변경할 항목을 입력해주세요.");
        }

        Ok(UpdateUserRequest {
            username,
            current_password: new_password.as_ref().and(current_password),
            new_password,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// endregion: --- Update Profile

// region:    --- Delete Account
#[derive(Debug, Clone, Default)]
pub struct DeleteAccountForm {
    pub password: String,
}

impl DeleteAccountForm {
    pub fn validate(&self) -> ClientResult<DeleteUserRequest> {
        if self.password.is_empty() {
            return invalid("비밀번호를 입력해주세요.");
        }
        Ok(DeleteUserRequest {
            password: self.password.clone(),
        })
    }
}

// endregion: --- Delete Account
