//! Vector relational builtins. Comparisons produce `bvec` results; `any`,
//! `all` and `not` operate on `bvec` arguments.

#[inline]
pub fn less_than<T: PartialOrd>(x: T, y: T) -> bool {
    x < y
}

#[inline]
pub fn less_than_equal<T: PartialOrd>(x: T, y: T) -> bool {
    x <= y
}

#[inline]
pub fn greater_than<T: PartialOrd>(x: T, y: T) -> bool {
    x > y
}

#[inline]
pub fn greater_than_equal<T: PartialOrd>(x: T, y: T) -> bool {
    x >= y
}

#[inline]
pub fn equal<T: PartialEq>(x: T, y: T) -> bool {
    x == y
}

#[inline]
pub fn not_equal<T: PartialEq>(x: T, y: T) -> bool {
    x != y
}

#[inline]
pub fn any(acc: bool, x: bool) -> bool {
    acc || x
}

#[inline]
pub fn all(acc: bool, x: bool) -> bool {
    acc && x
}

#[inline]
pub fn not(x: bool) -> bool {
    !x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_compares_false_except_not_equal() {
        let n = f32::NAN;
        assert!(!less_than(n, 1.0) && !greater_than_equal(n, n));
        assert!(!equal(n, n));
        assert!(not_equal(n, n));
    }

    #[test]
    fn signed_zeros_are_equal() {
        assert!(equal(0.0f32, -0.0));
        assert!(less_than_equal(-0.0f32, 0.0));
    }
}
