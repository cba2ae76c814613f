/*
 * @Author       : 老董
 * @Date         : 2026-10-16
 * @Description  : 玩具级 CKKS 风格后端（单槽位、定点编码、Z/2^64 上的 LWE）。
 *                 密文 ct = (a, b = m + s·a + e)，其中 m = round(x·Δ)。
 *                 - 同缩放因子的密文可直接相加；
 *                 - 乘标量时先把标量按 Δ 编码，再把 a、b 都乘上它，缩放因子变为原来的 Δ 倍并消耗一个层级；
 *                 - 层级耗尽后再乘标量会报错（模拟乘法深度上限）；
 *                 - 密文携带编码值（含噪声）绝对值的公开上界，加法与乘标量时随之传播，
 *                   上界达到 2^62 即报溢出，与明文编码值的溢出判定一致。
 *                 仅用于测试与演示，不提供任何安全性保证。
 */

use approx::relative_eq;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use super::{ArithmeticBackend, ElementType};
use crate::errors::{BackendError, Operator};

/// 编码后数值的绝对值上限（留出乘法与累加的余量）
const MAX_ENCODED_MAGNITUDE: u64 = 1 << 62;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToyCkksParams {
    /// 缩放因子 Δ = 2^scale_bits
    pub scale_bits: u32,
    /// 新鲜密文可承受的乘标量次数
    pub max_level: usize,
    /// 加密噪声 e 的取值范围为 [-noise_bound, noise_bound]
    pub noise_bound: u64,
}

impl Default for ToyCkksParams {
    fn default() -> Self {
        Self {
            scale_bits: 20,
            max_level: 3,
            noise_bound: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToyCiphertext {
    a: u64,
    b: u64,
    scale: f64,
    level: usize,
    bound: u64,
}

impl ToyCiphertext {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// 剩余的乘法层级
    pub fn level(&self) -> usize {
        self.level
    }

    /// `b - s·a`（即编码值加噪声）绝对值的上界
    pub fn magnitude_bound(&self) -> u64 {
        self.bound
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToyPlaintext {
    value: i64,
    scale: f64,
    level: usize,
}

impl ToyPlaintext {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn level(&self) -> usize {
        self.level
    }
}

#[derive(Debug)]
pub struct ToyCkksBackend {
    params: ToyCkksParams,
    secret: u64,
    rng: Mutex<StdRng>,
}

impl ToyCkksBackend {
    pub fn new(params: ToyCkksParams) -> Self {
        Self::from_rng(params, StdRng::from_entropy())
    }

    /// 使用固定种子生成密钥与噪声（结果可复现）
    pub fn with_seed(params: ToyCkksParams, seed: u64) -> Self {
        Self::from_rng(params, StdRng::seed_from_u64(seed))
    }

    fn from_rng(params: ToyCkksParams, mut rng: StdRng) -> Self {
        let secret = rng.gen_range(1..=u64::MAX);
        debug!(
            "玩具 CKKS 后端已生成密钥：Δ=2^{}，最大层级={}，噪声界={}",
            params.scale_bits, params.max_level, params.noise_bound
        );
        Self {
            params,
            secret,
            rng: Mutex::new(rng),
        }
    }

    pub fn params(&self) -> &ToyCkksParams {
        &self.params
    }

    fn delta(&self) -> f64 {
        (1u64 << self.params.scale_bits) as f64
    }

    fn quantize(x: f64, scale: f64, operator: Operator) -> Result<i64, BackendError> {
        let scaled = (x * scale).round();
        if !scaled.is_finite() || scaled.abs() >= MAX_ENCODED_MAGNITUDE as f64 {
            return Err(BackendError::Overflow {
                operator,
                message: format!("{x}按缩放因子{scale}编码后超出范围"),
            });
        }
        Ok(scaled as i64)
    }

    /// 运算结果的绝对值（或其上界）须小于`MAX_ENCODED_MAGNITUDE`
    fn check_magnitude(
        magnitude: u128,
        operator: Operator,
        describe: impl FnOnce() -> String,
    ) -> Result<u64, BackendError> {
        if magnitude < u128::from(MAX_ENCODED_MAGNITUDE) {
            Ok(magnitude as u64)
        } else {
            Err(BackendError::Overflow {
                operator,
                message: describe(),
            })
        }
    }

    fn check_real(element_type: ElementType, operator: Operator) -> Result<(), BackendError> {
        if element_type.is_real() {
            Ok(())
        } else {
            Err(BackendError::UnsupportedElementType {
                operator,
                element_type,
            })
        }
    }

    fn check_scales(left: f64, right: f64, operator: Operator) -> Result<(), BackendError> {
        if relative_eq!(left, right) {
            Ok(())
        } else {
            Err(BackendError::ScaleMismatch {
                operator,
                left,
                right,
            })
        }
    }

    /// 把实数编码为明文（缩放因子 Δ，满层级）
    pub fn encode(&self, x: f64) -> Result<ToyPlaintext, BackendError> {
        let scale = self.delta();
        Ok(ToyPlaintext {
            value: Self::quantize(x, scale, Operator::Encode)?,
            scale,
            level: self.params.max_level,
        })
    }

    pub fn decode(&self, plaintext: &ToyPlaintext) -> f64 {
        plaintext.value as f64 / plaintext.scale
    }

    pub fn encrypt_plaintext(&self, plaintext: &ToyPlaintext) -> Result<ToyCiphertext, BackendError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| BackendError::Internal("随机数生成器的锁已中毒".to_string()))?;
        let bound = self.params.noise_bound as i64;
        let noise = rng.gen_range(-bound..=bound);
        let a = rng.gen_range(0..=u64::MAX);
        let b = (plaintext.value as u64)
            .wrapping_add(self.secret.wrapping_mul(a))
            .wrapping_add(noise as u64);
        Ok(ToyCiphertext {
            a,
            b,
            scale: plaintext.scale,
            level: plaintext.level,
            bound: plaintext.value.unsigned_abs() + self.params.noise_bound,
        })
    }

    pub fn encrypt(&self, x: f64) -> Result<ToyCiphertext, BackendError> {
        self.encrypt_plaintext(&self.encode(x)?)
    }

    pub fn decrypt(&self, ciphertext: &ToyCiphertext) -> f64 {
        let message = ciphertext
            .b
            .wrapping_sub(self.secret.wrapping_mul(ciphertext.a)) as i64;
        message as f64 / ciphertext.scale
    }
}

impl ArithmeticBackend for ToyCkksBackend {
    type Ciphertext = ToyCiphertext;
    type Plaintext = ToyPlaintext;

    fn add(&self, lhs: &ToyCiphertext, rhs: &ToyCiphertext) -> Result<ToyCiphertext, BackendError> {
        Self::check_scales(lhs.scale, rhs.scale, Operator::Add)?;
        let bound = Self::check_magnitude(
            u128::from(lhs.bound) + u128::from(rhs.bound),
            Operator::Add,
            || format!("幅度上界 {} + {}", lhs.bound, rhs.bound),
        )?;
        Ok(ToyCiphertext {
            a: lhs.a.wrapping_add(rhs.a),
            b: lhs.b.wrapping_add(rhs.b),
            scale: lhs.scale,
            level: lhs.level.min(rhs.level),
            bound,
        })
    }

    fn add_plain(&self, lhs: &ToyPlaintext, rhs: &ToyPlaintext) -> Result<ToyPlaintext, BackendError> {
        Self::check_scales(lhs.scale, rhs.scale, Operator::AddPlain)?;
        let sum = i128::from(lhs.value) + i128::from(rhs.value);
        Self::check_magnitude(sum.unsigned_abs(), Operator::AddPlain, || {
            format!("{} + {}", lhs.value, rhs.value)
        })?;
        Ok(ToyPlaintext {
            value: sum as i64,
            scale: lhs.scale,
            level: lhs.level.min(rhs.level),
        })
    }

    fn multiply_scalar(
        &self,
        value: &ToyCiphertext,
        scalar: f64,
        element_type: ElementType,
    ) -> Result<ToyCiphertext, BackendError> {
        let operator = Operator::MultiplyScalar;
        Self::check_real(element_type, operator)?;
        if value.level == 0 {
            return Err(BackendError::DepthExhausted { operator, level: 0 });
        }
        let delta = self.delta();
        let factor = Self::quantize(scalar, delta, operator)?;
        let bound = Self::check_magnitude(
            u128::from(value.bound) * u128::from(factor.unsigned_abs()),
            operator,
            || format!("幅度上界 {} × {}", value.bound, factor),
        )?;
        Ok(ToyCiphertext {
            a: value.a.wrapping_mul(factor as u64),
            b: value.b.wrapping_mul(factor as u64),
            scale: value.scale * delta,
            level: value.level - 1,
            bound,
        })
    }

    fn multiply_plain_scalar(
        &self,
        value: &ToyPlaintext,
        scalar: f64,
        element_type: ElementType,
    ) -> Result<ToyPlaintext, BackendError> {
        let operator = Operator::MultiplyPlainScalar;
        Self::check_real(element_type, operator)?;
        if value.level == 0 {
            return Err(BackendError::DepthExhausted { operator, level: 0 });
        }
        let delta = self.delta();
        let factor = Self::quantize(scalar, delta, operator)?;
        let product = i128::from(value.value) * i128::from(factor);
        Self::check_magnitude(product.unsigned_abs(), operator, || {
            format!("{} × {}", value.value, factor)
        })?;
        Ok(ToyPlaintext {
            value: product as i64,
            scale: value.scale * delta,
            level: value.level - 1,
        })
    }

    /// 平凡加密的零：(0, 0)
    fn create_zero_ciphertext(&self, element_type: ElementType) -> Result<ToyCiphertext, BackendError> {
        Self::check_real(element_type, Operator::CreateZero)?;
        Ok(ToyCiphertext {
            a: 0,
            b: 0,
            scale: self.delta(),
            level: self.params.max_level,
            bound: 0,
        })
    }

    fn create_zero_plaintext(&self, element_type: ElementType) -> Result<ToyPlaintext, BackendError> {
        Self::check_real(element_type, Operator::CreateZero)?;
        Ok(ToyPlaintext {
            value: 0,
            scale: self.delta(),
            level: self.params.max_level,
        })
    }
}
