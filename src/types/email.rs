use validator::ValidationError;

/// Rejects addresses whose domain has no dot, such as `user@localhost`.
///
/// The `email` validator accepts bare host names. Public addresses always carry a
/// top-level domain. Addresses without an `@` are left to the `email` validator.
pub fn email_domain_has_dot(email: &str) -> Result<(), ValidationError> {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return Ok(());
    };

    let labels_are_filled = domain.split('.').all(|label| !label.is_empty());

    match domain.contains('.') && labels_are_filled {
        true => Ok(()),
        false => Err(ValidationError::new("email")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domains_need_a_dot() {
        assert!(email_domain_has_dot("a@b").is_err());
        assert!(email_domain_has_dot("user@localhost").is_err());
        assert!(email_domain_has_dot("user@example.").is_err());
        assert!(email_domain_has_dot("user@.com").is_err());
    }

    #[test]
    fn dotted_domains_pass() {
        assert!(email_domain_has_dot("andresmaya737@gmail.com").is_ok());
        assert!(email_domain_has_dot("a@b.co").is_ok());
        assert!(email_domain_has_dot("user@mail.example.org").is_ok());
    }

    #[test]
    fn addresses_without_at_are_left_alone() {
        assert!(email_domain_has_dot("nope").is_ok());
    }
}
