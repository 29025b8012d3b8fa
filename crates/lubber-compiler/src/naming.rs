//! Short output names: `a`..`z`, then `aa`, `ab`, ... (bijective base 26).

/// Short name for the module at `index` in build order.
pub fn short_name(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letters_first() {
        assert_eq!(short_name(0), "a");
        assert_eq!(short_name(1), "b");
        assert_eq!(short_name(25), "z");
    }

    #[test]
    fn thirty_modules_end_in_two_letters() {
        let names: Vec<String> = (0..30).map(short_name).collect();
        assert_eq!(&names[26..], ["aa", "ab", "ac", "ad"]);
        assert_eq!(short_name(29).len(), 2);
    }

    #[test]
    fn widths_grow_at_boundaries() {
        assert_eq!(short_name(25).len(), 1);
        assert_eq!(short_name(26).len(), 2);
        assert_eq!(short_name(26 + 26 * 26 - 1), "zz");
        assert_eq!(short_name(26 + 26 * 26), "aaa");
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<String> = (0..2000).map(short_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 2000);
    }
}
