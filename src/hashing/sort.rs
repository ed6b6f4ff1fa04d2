use std::cmp::Ordering;
use std::ffi::OsStr;

/// Case-insensitive ordinal comparison: both names are upper-cased, then
/// compared code point by code point. Names that fold to the same string fall
/// back to their raw ordinal order so the result is a total order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_uppercase);
    let folded_b = b.chars().flat_map(char::to_uppercase);
    folded_a.cmp(folded_b).then_with(|| a.cmp(b))
}

/// Sorts raw file names with [`compare_names`]. Names that are not valid
/// UTF-8 are compared through their lossy form, then by their raw bytes.
pub fn sort_lexicographically<T: AsRef<OsStr>>(names: &mut [T]) {
    names.sort_by(|a, b| {
        let (a, b) = (a.as_ref(), b.as_ref());
        compare_names(&a.to_string_lossy(), &b.to_string_lossy()).then_with(|| a.cmp(b))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("a", "B", Ordering::Less)]
    #[case("B", "a", Ordering::Greater)]
    #[case("abc", "ABD", Ordering::Less)]
    #[case("file10", "file2", Ordering::Less)]
    #[case("same", "same", Ordering::Equal)]
    #[case("", "a", Ordering::Less)]
    fn compare_names_folds_case(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(compare_names(a, b), expected);
    }

    #[test]
    fn equal_folded_names_are_ordered_by_raw_value() {
        assert_eq!(compare_names("README", "readme"), Ordering::Less);
        assert_eq!(compare_names("readme", "README"), Ordering::Greater);
    }

    #[test]
    fn underscore_sorts_after_letters_once_folded() {
        // '_' (0x5F) sits above 'Z' (0x5A) but below 'a' (0x61).
        assert_eq!(compare_names("_hidden", "zeta"), Ordering::Greater);
    }

    #[test]
    fn sort_lexicographically_is_stable_across_input_orders() {
        let mut first = vec!["delta", "Alpha", "charlie", "Bravo"];
        let mut second = vec!["Bravo", "charlie", "delta", "Alpha"];
        sort_lexicographically(&mut first);
        sort_lexicographically(&mut second);
        assert_eq!(first, vec!["Alpha", "Bravo", "charlie", "delta"]);
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn sort_lexicographically_accepts_non_utf8_names() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"bad\xffname".to_vec());
        let mut names = vec![OsString::from("zeta"), raw.clone(), OsString::from("Alpha")];
        sort_lexicographically(&mut names);
        assert_eq!(names, vec![OsString::from("Alpha"), raw, OsString::from("zeta")]);
    }
}
