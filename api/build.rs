//! Generates the AuthService server stubs.
//!
//! Messages live in `src/proto.rs` as hand-written prost types, so only the
//! service glue is generated here and no `protoc` is needed at build time.

use tonic_build::manual::{Builder, Method, Service};

/// (rust method name, RPC route, request type, response type)
const METHODS: &[(&str, &str, &str, &str)] = &[
    ("login", "Login", "LoginRequest", "LoginResponse"),
    ("register", "Register", "RegisterRequest", "RegisterResponse"),
    ("validate_token", "ValidateToken", "ValidateTokenRequest", "ValidateTokenResponse"),
    ("get_user_by_id", "GetUserByID", "GetUserByIdRequest", "UserResponse"),
    ("update_user_profile", "UpdateUserProfile", "UpdateUserProfileRequest", "UserResponse"),
    ("change_password", "ChangePassword", "ChangePasswordRequest", "StatusResponse"),
    ("reset_password", "ResetPassword", "ResetPasswordRequest", "StatusResponse"),
    ("confirm_reset_password", "ConfirmResetPassword", "ConfirmResetPasswordRequest", "StatusResponse"),
    ("send_verification_code", "SendVerificationCode", "SendVerificationCodeRequest", "StatusResponse"),
    ("verify_account", "VerifyAccount", "VerifyAccountRequest", "StatusResponse"),
];

fn main() {
    let mut service = Service::builder().name("AuthService").package("auth");

    for (name, route, input, output) in METHODS {
        service = service.method(
            Method::builder()
                .name(*name)
                .route_name(*route)
                .input_type(format!("crate::proto::{}", input))
                .output_type(format!("crate::proto::{}", output))
                .codec_path("tonic::codec::ProstCodec")
                .build(),
        );
    }

    Builder::new()
        .build_client(false)
        .compile(&[service.build()]);

    println!("cargo:rerun-if-changed=build.rs");
}
