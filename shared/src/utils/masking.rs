//! Helpers for keeping personal data out of logs

/// Mask an email address for logging, keeping the first character of the
/// local part and the domain (`alice@school.edu` becomes `a***@school.edu`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
