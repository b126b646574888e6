/// Formats every T as `...`
pub fn mask_fmt<T>(_: &T, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    f.write_str("...")
}

/// Converts a byte count to kibibytes rounded to two decimals.
pub fn kibibytes(len: usize) -> f64 {
    (len as f64 / 1024.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::kibibytes;

    #[test]
    fn kibibytes_are_rounded_to_two_decimals() {
        assert_eq!(kibibytes(0), 0.0);
        assert_eq!(kibibytes(2048), 2.0);
        assert_eq!(kibibytes(1000), 0.98);
        assert_eq!(kibibytes(1536), 1.5);
    }
}
