//! 数值格式化
//!
//! 文本输出中的浮点数一律按 C 区域设置的 `%g` 规则（6 位有效数字）格式化，
//! 小数点固定为 `.`，与宿主机的区域设置无关。

use std::fmt;

/// 有效数字位数
const PRECISION: i32 = 6;

/// `%g` 风格的浮点数显示包装
///
/// ```rust
/// use md2_export::export::format::Real;
///
/// assert_eq!(Real(1.0).to_string(), "1");
/// assert_eq!(Real(0.5).to_string(), "0.5");
/// assert_eq!(Real(1.0e6).to_string(), "1e+06");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Real(pub f32);

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0 as f64;

        if value.is_nan() {
            return f.write_str("nan");
        }
        if value.is_infinite() {
            return f.write_str(if value < 0.0 { "-inf" } else { "inf" });
        }
        if value == 0.0 {
            return f.write_str(if value.is_sign_negative() { "-0" } else { "0" });
        }

        // 先按科学计数法舍入，得到舍入后的指数
        let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);

        if exponent < -4 || exponent >= PRECISION {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
        } else {
            let decimals = (PRECISION - 1 - exponent) as usize;
            let fixed = format!("{:.*}", decimals, value);
            f.write_str(trim_fraction(&fixed))
        }
    }
}

/// 去掉小数部分末尾的 0 以及多余的小数点
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(v: f32) -> String {
        Real(v).to_string()
    }

    #[test]
    fn test_integers() {
        assert_eq!(g(0.0), "0");
        assert_eq!(g(1.0), "1");
        assert_eq!(g(-5.0), "-5");
        assert_eq!(g(123456.0), "123456");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(g(0.5), "0.5");
        assert_eq!(g(-2.25), "-2.25");
        assert_eq!(g(0.1), "0.1");
        assert_eq!(g(1.0 / 3.0), "0.333333");
        assert_eq!(g(0.0001), "0.0001");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(g(1.0e6), "1e+06");
        assert_eq!(g(1234567.0), "1.23457e+06");
        assert_eq!(g(0.00001), "1e-05");
        assert_eq!(g(-2.5e-7), "-2.5e-07");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(g(f32::INFINITY), "inf");
        assert_eq!(g(f32::NEG_INFINITY), "-inf");
        assert_eq!(g(f32::NAN), "nan");
    }
}
