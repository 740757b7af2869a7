//! Hashing utilities

/// Stable 32-bit polynomial string hash (`h = h * 31 + unit`, wrapping)
///
/// Runs over UTF-16 code units so the value matches the classic
/// `(h << 5) - h + charCode` hash used by browser-side consumers of the
/// catalog. Never depends on `HashMap` ordering or a seeded hasher.
pub fn string_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Map `input` onto `0..len` through [`string_hash`]
///
/// Returns 0 for an empty range.
pub fn hash_index(input: &str, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    string_hash(input).unsigned_abs() as usize % len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("ab"), 97 * 31 + 98);
        // matches java.lang.String#hashCode
        assert_eq!(string_hash("hello"), 99162322);
    }

    #[test]
    fn test_wraps_without_panicking() {
        let long = "lyrics ".repeat(500);
        let first = string_hash(&long);
        assert_eq!(first, string_hash(&long));
    }

    #[test]
    fn test_hash_index_in_range() {
        for title in ["Lemon", "Despacito", "Tití Me Preguntó", "강남스타일", ""] {
            let idx = hash_index(title, 8);
            assert!(idx < 8);
            assert_eq!(idx, hash_index(title, 8));
        }
        assert_eq!(hash_index("anything", 0), 0);
    }
}
