use super::Val;
use crate::error;
use crate::lang::Error;
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, Error>;

/// ## Opcode semantics over cell values
///
/// Binary operations take two values of the same numeric type
/// and return a value of that type.

pub struct Operation {}

impl Operation {
    /// Same type and not a string, checked in that order.
    fn numeric(lhs: &Val, rhs: &Val) -> Result<()> {
        if lhs.cell_type() != rhs.cell_type() {
            Err(error!(TypeMismatch))
        } else if lhs.is_string() {
            Err(error!(StringNotAllowed))
        } else {
            Ok(())
        }
    }

    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        Operation::numeric(&lhs, &rhs)?;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_add(r) {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            (Float(l), Float(r)) => Ok(Float(l + r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        Operation::numeric(&lhs, &rhs)?;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_sub(r) {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            (Float(l), Float(r)) => Ok(Float(l - r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        Operation::numeric(&lhs, &rhs)?;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_mul(r) {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            (Float(l), Float(r)) => Ok(Float(l * r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    /// Integer division truncates toward zero.
    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        Operation::numeric(&lhs, &rhs)?;
        match (lhs, rhs) {
            (Integer(_), Integer(0)) => Err(error!(DivisionByZero)),
            (Integer(l), Integer(r)) => match l.checked_div(r) {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            (Float(_), Float(r)) if r == 0.0 => Err(error!(DivisionByZero)),
            (Float(l), Float(r)) => Ok(Float(l / r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    /// Floored modulo: the result takes the sign of the divisor.
    pub fn modulo(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        Operation::numeric(&lhs, &rhs)?;
        match (lhs, rhs) {
            (Integer(_), Integer(0)) => Err(error!(DivisionByZero)),
            (Integer(l), Integer(r)) => match l.checked_rem(r) {
                Some(m) if m != 0 && (m < 0) != (r < 0) => Ok(Integer(m + r)),
                Some(m) => Ok(Integer(m)),
                None => Err(error!(Overflow)),
            },
            (Float(_), Float(r)) if r == 0.0 => Err(error!(DivisionByZero)),
            (Float(l), Float(r)) => {
                let m = l % r;
                if m != 0.0 && (m < 0.0) != (r < 0.0) {
                    Ok(Float(m + r))
                } else {
                    Ok(Float(m))
                }
            }
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::integers(lhs, rhs)?;
        Ok(Val::Integer(l & r))
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::integers(lhs, rhs)?;
        Ok(Val::Integer(l | r))
    }

    pub fn xor(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::integers(lhs, rhs)?;
        Ok(Val::Integer(l ^ r))
    }

    fn integers(lhs: Val, rhs: Val) -> Result<(i64, i64)> {
        Operation::numeric(&lhs, &rhs)?;
        match (lhs, rhs) {
            (Val::Integer(l), Val::Integer(r)) => Ok((l, r)),
            _ => Err(error!(IntegerRequired)),
        }
    }

    pub fn not(val: Val) -> Result<Val> {
        match val {
            Val::Integer(n) => Ok(Val::Integer(!n)),
            Val::Float(_) => Err(error!(IntegerRequired)),
            Val::String(_) => Err(error!(StringNotAllowed)),
        }
    }

    /// Negates numbers, reverses strings.
    pub fn invert(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => match n.checked_neg() {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            Float(n) => Ok(Float(-n)),
            String(s) => Ok(String(s.chars().rev().collect())),
        }
    }

    pub fn max(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::numeric(&lhs, &rhs)?;
        match Operation::compare(&lhs, &rhs)? {
            Some(Ordering::Less) => Ok(rhs),
            _ => Ok(lhs),
        }
    }

    pub fn min(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::numeric(&lhs, &rhs)?;
        match Operation::compare(&lhs, &rhs)? {
            Some(Ordering::Greater) => Ok(rhs),
            _ => Ok(lhs),
        }
    }

    /// Euclid on absolute values; gcd(n, 0) is |n|.
    pub fn gcd(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        Operation::numeric(&lhs, &rhs)?;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Operation::to_integer(gcd_u64(l.unsigned_abs(), r.unsigned_abs())),
            (Float(l), Float(r)) => Ok(Float(gcd_f64(l.abs(), r.abs()))),
            _ => Err(error!(TypeMismatch)),
        }
    }

    /// |a * b| / gcd(a, b), zero when both are zero.
    pub fn lcm(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        Operation::numeric(&lhs, &rhs)?;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => {
                let (l, r) = (l.unsigned_abs(), r.unsigned_abs());
                let g = gcd_u64(l, r);
                if g == 0 {
                    return Ok(Integer(0));
                }
                match (l / g).checked_mul(r) {
                    Some(n) => Operation::to_integer(n),
                    None => Err(error!(Overflow)),
                }
            }
            (Float(l), Float(r)) => {
                let g = gcd_f64(l.abs(), r.abs());
                if g == 0.0 {
                    Ok(Float(0.0))
                } else {
                    Ok(Float((l * r).abs() / g))
                }
            }
            _ => Err(error!(TypeMismatch)),
        }
    }

    fn to_integer(n: u64) -> Result<Val> {
        if n > i64::MAX as u64 {
            Err(error!(Overflow))
        } else {
            Ok(Val::Integer(n as i64))
        }
    }

    /// Numbers compare with numbers, strings with strings.
    /// `None` when a NaN is involved.
    pub fn compare(lhs: &Val, rhs: &Val) -> Result<Option<Ordering>> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(Some(l.cmp(r))),
            (Integer(l), Float(r)) => Ok((*l as f64).partial_cmp(r)),
            (Float(l), Integer(r)) => Ok(l.partial_cmp(&(*r as f64))),
            (Float(l), Float(r)) => Ok(l.partial_cmp(r)),
            (String(l), String(r)) => Ok(Some(l.cmp(r))),
            _ => Err(error!(TypeMismatch)),
        }
    }

    /// Values of incomparable types are simply not equal.
    pub fn equal(lhs: &Val, rhs: &Val) -> bool {
        matches!(Operation::compare(lhs, rhs), Ok(Some(Ordering::Equal)))
    }
}

fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn gcd_f64(mut a: f64, mut b: f64) -> f64 {
    while b != 0.0 && b.is_finite() {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;
    use Val::*;

    fn code(r: Result<Val>) -> ErrorCode {
        let e = r.unwrap_err();
        for c in &[
            ErrorCode::TypeMismatch,
            ErrorCode::StringNotAllowed,
            ErrorCode::IntegerRequired,
            ErrorCode::DivisionByZero,
            ErrorCode::Overflow,
        ] {
            if e.is(*c) {
                return *c;
            }
        }
        panic!("unexpected {}", e);
    }

    #[test]
    fn test_type_checks() {
        assert_eq!(code(Operation::sum(Integer(1), Float(1.0))), ErrorCode::TypeMismatch);
        assert_eq!(
            code(Operation::sum(String("a".into()), String("b".into()))),
            ErrorCode::StringNotAllowed
        );
        assert_eq!(code(Operation::sum(String("a".into()), Integer(1))), ErrorCode::TypeMismatch);
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(Operation::sum(Integer(2), Integer(3)).unwrap(), Integer(5));
        assert_eq!(Operation::subtract(Float(2.5), Float(1.0)).unwrap(), Float(1.5));
        assert_eq!(Operation::multiply(Integer(-4), Integer(3)).unwrap(), Integer(-12));
        assert_eq!(code(Operation::multiply(Integer(i64::MAX), Integer(2))), ErrorCode::Overflow);
    }

    #[test]
    fn test_divide() {
        assert_eq!(Operation::divide(Integer(7), Integer(2)).unwrap(), Integer(3));
        assert_eq!(Operation::divide(Integer(-7), Integer(2)).unwrap(), Integer(-3));
        assert_eq!(Operation::divide(Float(7.0), Float(2.0)).unwrap(), Float(3.5));
        assert_eq!(code(Operation::divide(Integer(1), Integer(0))), ErrorCode::DivisionByZero);
        assert_eq!(code(Operation::divide(Float(1.0), Float(0.0))), ErrorCode::DivisionByZero);
        assert_eq!(code(Operation::divide(Integer(i64::MIN), Integer(-1))), ErrorCode::Overflow);
    }

    #[test]
    fn test_modulo_is_floored() {
        assert_eq!(Operation::modulo(Integer(7), Integer(3)).unwrap(), Integer(1));
        assert_eq!(Operation::modulo(Integer(-7), Integer(2)).unwrap(), Integer(1));
        assert_eq!(Operation::modulo(Integer(7), Integer(-2)).unwrap(), Integer(-1));
        assert_eq!(Operation::modulo(Float(-1.5), Float(1.0)).unwrap(), Float(0.5));
    }

    #[test]
    fn test_bitwise() {
        assert_eq!(Operation::and(Integer(6), Integer(3)).unwrap(), Integer(2));
        assert_eq!(Operation::or(Integer(6), Integer(3)).unwrap(), Integer(7));
        assert_eq!(Operation::xor(Integer(6), Integer(3)).unwrap(), Integer(5));
        assert_eq!(Operation::not(Integer(0)).unwrap(), Integer(-1));
        assert_eq!(code(Operation::and(Float(1.0), Float(1.0))), ErrorCode::IntegerRequired);
        assert_eq!(code(Operation::not(Float(1.0))), ErrorCode::IntegerRequired);
        assert_eq!(code(Operation::not(String("".into()))), ErrorCode::StringNotAllowed);
    }

    #[test]
    fn test_invert() {
        assert_eq!(Operation::invert(Integer(5)).unwrap(), Integer(-5));
        assert_eq!(Operation::invert(Float(-0.5)).unwrap(), Float(0.5));
        assert_eq!(Operation::invert(String("abc".into())).unwrap(), String("cba".into()));
    }

    #[test]
    fn test_max_min() {
        assert_eq!(Operation::max(Integer(2), Integer(9)).unwrap(), Integer(9));
        assert_eq!(Operation::min(Float(2.0), Float(9.0)).unwrap(), Float(2.0));
        assert_eq!(
            code(Operation::max(String("a".into()), String("b".into()))),
            ErrorCode::StringNotAllowed
        );
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(Operation::gcd(Integer(4), Integer(0)).unwrap(), Integer(4));
        assert_eq!(Operation::gcd(Integer(-12), Integer(18)).unwrap(), Integer(6));
        assert_eq!(Operation::lcm(Integer(4), Integer(6)).unwrap(), Integer(12));
        assert_eq!(Operation::lcm(Integer(-4), Integer(6)).unwrap(), Integer(12));
        assert_eq!(Operation::lcm(Integer(0), Integer(0)).unwrap(), Integer(0));
        assert_eq!(Operation::gcd(Float(4.0), Float(6.0)).unwrap(), Float(2.0));
        assert_eq!(Operation::lcm(Float(4.0), Float(6.0)).unwrap(), Float(12.0));
    }

    #[test]
    fn test_compare() {
        assert_eq!(Operation::compare(&Integer(1), &Float(1.5)).unwrap(), Some(Ordering::Less));
        assert_eq!(
            Operation::compare(&String("b".into()), &String("a".into())).unwrap(),
            Some(Ordering::Greater)
        );
        assert!(Operation::compare(&String("1".into()), &Integer(1)).is_err());
        assert!(Operation::equal(&Integer(2), &Float(2.0)));
        assert!(!Operation::equal(&String("2".into()), &Integer(2)));
        assert_eq!(Operation::compare(&Float(f64::NAN), &Float(1.0)).unwrap(), None);
    }
}
