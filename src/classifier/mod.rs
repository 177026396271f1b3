//! Number classification module
//!
//! Pure predicates over a single `i64`: primality, perfection, Armstrong
//! membership, parity and digit sum. Nothing here allocates beyond the
//! property list or touches I/O.
//!
//! Negative inputs are decomposed into digits by absolute value, so
//! `digit_sum(-12) == 3` and no negative number is an Armstrong number.

use serde::Serialize;

/// Property tag reported in the `properties` list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberProperty {
    Odd,
    Even,
    Armstrong,
}

/// Derived properties of one integer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub number: i64,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<NumberProperty>,
    pub digit_sum: u64,
}

impl Classification {
    /// Classify `num`
    pub fn of(num: i64) -> Self {
        Self {
            number: num,
            is_prime: is_prime(num),
            is_perfect: is_perfect(num),
            properties: properties(num),
            digit_sum: digit_sum(num),
        }
    }
}

/// Trial division up to the square root.
///
/// `i <= num / i` stands in for `i * i <= num` so large inputs cannot overflow.
pub fn is_prime(num: i64) -> bool {
    if num < 2 {
        return false;
    }
    if num % 2 == 0 {
        return num == 2;
    }

    let mut i = 3;
    while i <= num / i {
        if num % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Whether `num` equals the sum of its proper divisors.
///
/// Zero, one and negative numbers are never perfect. Odd numbers are
/// rejected up front: any odd perfect number exceeds 10^1500, far past `i64`.
pub fn is_perfect(num: i64) -> bool {
    if num <= 1 || num % 2 != 0 {
        return false;
    }

    // 1 divides everything; num itself is excluded
    let target = i128::from(num);
    let mut sum: i128 = 1;
    let mut i: i64 = 2;
    while i <= num / i {
        if num % i == 0 {
            let pair = num / i;
            sum += i128::from(i);
            if pair != i {
                sum += i128::from(pair);
            }
            if sum > target {
                return false;
            }
        }
        i += 1;
    }
    sum == target
}

/// Whether `num` equals the sum of its digits each raised to the digit count
pub fn is_armstrong(num: i64) -> bool {
    if num < 0 {
        return false;
    }

    let digits = decimal_digits(num.unsigned_abs());
    let Ok(power) = u32::try_from(digits.len()) else {
        return false;
    };
    // 19 digits of 9^19 overflow u64, but never u128
    let sum: u128 = digits.iter().map(|&d| u128::from(d).pow(power)).sum();
    sum == u128::from(num.unsigned_abs())
}

/// Sum of the decimal digits of `|num|`
pub fn digit_sum(num: i64) -> u64 {
    decimal_digits(num.unsigned_abs())
        .into_iter()
        .map(u64::from)
        .sum()
}

/// `Odd` or `Even`; negative numbers follow the same rule
pub const fn parity(num: i64) -> NumberProperty {
    if num % 2 == 0 {
        NumberProperty::Even
    } else {
        NumberProperty::Odd
    }
}

/// Parity tag first, then `Armstrong` when it applies
pub fn properties(num: i64) -> Vec<NumberProperty> {
    let mut props = vec![parity(num)];
    if is_armstrong(num) {
        props.push(NumberProperty::Armstrong);
    }
    props
}

/// Most significant digit first; `0` yields `[0]`
fn decimal_digits(mut value: u64) -> Vec<u8> {
    if value == 0 {
        return vec![0];
    }

    let mut digits = Vec::with_capacity(20);
    while value > 0 {
        #[allow(clippy::cast_possible_truncation)]
        digits.push((value % 10) as u8);
        value /= 10;
    }
    digits.reverse();
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sieve(limit: usize) -> Vec<bool> {
        let mut primes = vec![true; limit + 1];
        primes[0] = false;
        primes[1] = false;
        let mut i = 2;
        while i * i <= limit {
            if primes[i] {
                let mut j = i * i;
                while j <= limit {
                    primes[j] = false;
                    j += i;
                }
            }
            i += 1;
        }
        primes
    }

    #[test]
    fn test_is_prime_matches_sieve() {
        let primes = sieve(10_000);
        for (n, &expected) in primes.iter().enumerate() {
            let n = i64::try_from(n).unwrap();
            assert_eq!(is_prime(n), expected, "is_prime({n})");
        }
    }

    #[test]
    fn test_is_prime_below_two() {
        for n in [-17, -2, -1, 0, 1] {
            assert!(!is_prime(n), "is_prime({n})");
        }
    }

    #[test]
    fn test_is_prime_large_values() {
        assert!(is_prime(2_147_483_647));
        assert!(!is_prime(2_147_483_649));
        assert!(!is_prime(i64::MAX));
    }

    #[test]
    fn test_is_perfect_known_values() {
        let perfect: Vec<i64> = (-100..10_000).filter(|&n| is_perfect(n)).collect();
        assert_eq!(perfect, vec![6, 28, 496, 8128]);
    }

    #[test]
    fn test_is_perfect_edge_cases() {
        assert!(!is_perfect(1));
        assert!(!is_perfect(0));
        assert!(!is_perfect(-6));
        assert!(is_perfect(33_550_336));
    }

    #[test]
    fn test_is_perfect_near_i64_max() {
        // Divisor sum of a multiple of 12 passes i64::MAX before exceeding num
        assert!(!is_perfect(9_223_372_036_854_775_800));
        assert!(!is_perfect(i64::MAX));
        assert!(!is_perfect(i64::MIN));
        assert!(is_perfect(8_589_869_056));
        assert!(is_perfect(137_438_691_328));
    }

    #[test]
    fn test_is_perfect_skips_odd_numbers() {
        assert!(!is_perfect(945));
        assert!(!is_perfect(9_223_372_036_854_775_783));
    }

    #[test]
    fn test_classification_of_large_value() {
        let c = Classification::of(9_223_372_036_854_775_800);
        assert!(!c.is_perfect);
        assert!(!c.is_prime);
        assert_eq!(c.properties, vec![NumberProperty::Even]);
        assert_eq!(c.digit_sum, 81);
    }

    #[test]
    fn test_is_armstrong() {
        assert!(is_armstrong(153));
        assert!(!is_armstrong(154));
        assert!(is_armstrong(9474));
        assert!(is_armstrong(0));
        assert!(is_armstrong(7));
        assert!(!is_armstrong(10));
        assert!(!is_armstrong(-153));
        assert!(!is_armstrong(i64::MAX));
    }

    #[test]
    fn test_digit_sum() {
        assert_eq!(digit_sum(12345), 15);
        assert_eq!(digit_sum(0), 0);
        assert_eq!(digit_sum(-12), 3);
        assert_eq!(digit_sum(i64::MIN), 89);
    }

    #[test]
    fn test_properties_order() {
        assert_eq!(properties(28), vec![NumberProperty::Even]);
        assert_eq!(properties(-3), vec![NumberProperty::Odd]);
        assert_eq!(
            properties(371),
            vec![NumberProperty::Odd, NumberProperty::Armstrong]
        );
        assert_eq!(
            properties(8208),
            vec![NumberProperty::Even, NumberProperty::Armstrong]
        );
    }

    #[test]
    fn test_classification_serializes_tags_lowercase() {
        let json = serde_json::to_value(Classification::of(153)).unwrap();
        assert_eq!(json["number"], 153);
        assert_eq!(json["is_prime"], false);
        assert_eq!(json["is_perfect"], false);
        assert_eq!(json["properties"], serde_json::json!(["odd", "armstrong"]));
        assert_eq!(json["digit_sum"], 9);
    }
}
