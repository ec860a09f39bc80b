use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("base url must not be empty")]
    EmptyBaseUrl,
    #[error("base url must use http:// or https:// and include a host")]
    InvalidBaseUrl,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("OTP must not be empty")]
    EmptyOtp,
    #[error("OTP must contain exactly six digits")]
    InvalidOtp,
}

pub fn normalize_email(raw: &str) -> Result<String, InputError> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(InputError::EmptyEmail);
    }
    Ok(normalized)
}

/// Extract the six-digit OTP from noisy input ("Code: 123 456." -> "123456").
pub fn normalize_otp(raw: &str) -> Result<String, InputError> {
    let collapsed = raw.split_whitespace().collect::<String>();
    if collapsed.is_empty() {
        return Err(InputError::EmptyOtp);
    }

    let digits = collapsed
        .chars()
        .filter(|ch| ch.is_ascii_digit())
        .collect::<String>();
    if digits.len() != 6 {
        return Err(InputError::InvalidOtp);
    }
    Ok(digits)
}
