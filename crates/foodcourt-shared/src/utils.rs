//! Utility functions

/// Mask an email address for log output.
///
/// Must never panic: it runs on raw request input before any
/// validation.
pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let keep = if local.len() <= 2 { 1 } else { 2 };
        let prefix = local.get(..keep).unwrap_or("");
        format!("{}***{}", prefix, domain)
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("budi@example.com"), "bu***@example.com");
        assert_eq!(mask_email("a@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_mask_email_empty_local_part() {
        // Raw, unvalidated input must not panic the logger.
        assert_eq!(mask_email("@example.com"), "***@example.com");
    }

    #[test]
    fn test_mask_email_multibyte_local_part() {
        assert_eq!(mask_email("é@example.com"), "***@example.com");
    }
}
