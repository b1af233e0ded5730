//! Wire messages for the `auth.AuthService` gRPC service.
//!
//! Field numbers follow `proto/auth.proto`. The server trait and router are
//! generated by `build.rs` and included at the bottom of this module.

use ea_core::domain::entities::user::Role as DomainRole;
use ea_core::domain::entities::verification_code::CodePurpose as DomainPurpose;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Role {
    Unspecified = 0,
    Admin = 1,
    Teacher = 2,
    Student = 3,
}

impl From<DomainRole> for Role {
    fn from(role: DomainRole) -> Self {
        match role {
            DomainRole::Unspecified => Role::Unspecified,
            DomainRole::Admin => Role::Admin,
            DomainRole::Teacher => Role::Teacher,
            DomainRole::Student => Role::Student,
        }
    }
}

/// Unknown wire values decode to the unspecified role
pub fn role_from_wire(value: i32) -> DomainRole {
    match Role::try_from(value) {
        Ok(Role::Admin) => DomainRole::Admin,
        Ok(Role::Teacher) => DomainRole::Teacher,
        Ok(Role::Student) => DomainRole::Student,
        _ => DomainRole::Unspecified,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CodePurpose {
    Unspecified = 0,
    EmailVerification = 1,
    ResetPassword = 2,
}

pub fn purpose_from_wire(value: i32) -> Option<DomainPurpose> {
    match CodePurpose::try_from(value) {
        Ok(CodePurpose::EmailVerification) => Some(DomainPurpose::EmailVerification),
        Ok(CodePurpose::ResetPassword) => Some(DomainPurpose::ResetPassword),
        _ => None,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoginRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub password: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoginResponse {
    #[prost(string, tag = "1")]
    pub access_token: String,
    /// Always empty; refresh tokens are not issued
    #[prost(string, tag = "2")]
    pub refresh_token: String,
    #[prost(int64, tag = "3")]
    pub expires_at: i64,
    #[prost(string, tag = "4")]
    pub token_type: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegisterRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub password: String,
    #[prost(enumeration = "Role", tag = "3")]
    pub role: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegisterResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    /// Always empty; clients log in after registering
    #[prost(string, tag = "3")]
    pub access_token: String,
    #[prost(string, tag = "4")]
    pub user_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValidateTokenRequest {
    #[prost(string, tag = "1")]
    pub jwt: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValidateTokenResponse {
    #[prost(bool, tag = "1")]
    pub valid: bool,
    #[prost(string, tag = "2")]
    pub user_id: String,
    #[prost(enumeration = "Role", tag = "3")]
    pub role: i32,
    #[prost(int64, tag = "4")]
    pub expires_at: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetUserByIdRequest {
    #[prost(string, tag = "1")]
    pub user_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateUserProfileRequest {
    #[prost(string, tag = "1")]
    pub user_id: String,
    #[prost(string, optional, tag = "2")]
    pub username: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub phone: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct User {
    #[prost(string, tag = "1")]
    pub user_id: String,
    #[prost(string, tag = "2")]
    pub email: String,
    #[prost(string, tag = "3")]
    pub username: String,
    #[prost(enumeration = "Role", tag = "4")]
    pub role: i32,
    #[prost(string, tag = "5")]
    pub phone: String,
    #[prost(bool, tag = "6")]
    pub verified: bool,
}

impl From<&ea_core::User> for User {
    fn from(user: &ea_core::User) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            role: Role::from(user.role) as i32,
            phone: user.phone.clone().unwrap_or_default(),
            verified: user.verified,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub user: Option<User>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChangePasswordRequest {
    #[prost(string, tag = "1")]
    pub user_id: String,
    #[prost(string, tag = "2")]
    pub old_password: String,
    #[prost(string, tag = "3")]
    pub new_password: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResetPasswordRequest {
    #[prost(string, tag = "1")]
    pub email: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConfirmResetPasswordRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub code: String,
    #[prost(string, tag = "3")]
    pub new_password: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SendVerificationCodeRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(enumeration = "CodePurpose", tag = "2")]
    pub purpose: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VerifyAccountRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub code: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StatusResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

include!(concat!(env!("OUT_DIR"), "/auth.AuthService.rs"));
