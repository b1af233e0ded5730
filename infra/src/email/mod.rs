//! Email module - outbound SMTP delivery

pub mod smtp;

#[cfg(test)]
mod tests;

pub use smtp::SmtpEmailSender;
