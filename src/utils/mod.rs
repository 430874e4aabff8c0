//! Small helpers shared by the commands.

pub mod html;
pub mod mime;

/// `"s"` unless `n == 1`.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `"1 component"`, `"3 components"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "component"), "0 components");
        assert_eq!(plural_count(1, "component"), "1 component");
        assert_eq!(plural_count(7, "target"), "7 targets");
    }
}
