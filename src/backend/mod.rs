/*
 * @Author       : 老董
 * @Date         : 2026-10-16
 * @Description  : 算术后端（同态加密引擎）的接口。
 *                 池化内核只通过这里的接口做加法、乘标量与构造零值，从不加密、解密或接触密钥，
 *                 因此内核本身与具体的加密方案无关。
 */

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::errors::BackendError;

pub mod clear;
pub mod toy_ckks;
mod value_ops;

pub use self::clear::ClearBackend;
pub use self::toy_ckks::{ToyCiphertext, ToyCkksBackend, ToyCkksParams, ToyPlaintext};
pub use self::value_ops::{CipherOps, PlainOps, ValueOps};


/// 张量的元素类型，由调用方传入并原样交给后端（用于构造零值、编码标量）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    F32,
    F64,
    I32,
    I64,
}

impl ElementType {
    /// 是否为实数（浮点）类型。平均池化需要乘以`1/n`，整数类型无法精确表示该倒数
    pub const fn is_real(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::I32 => "i32",
            Self::I64 => "i64",
        };
        write!(f, "{name}")
    }
}

/// 同态加密算术后端
///
/// 密文（`Ciphertext`）与明文编码值（`Plaintext`）对内核而言都是不透明句柄：
/// 内核只借用输入、把它们交给后端运算，并为每个输出坐标取得一个新句柄。
///
/// 内核会在多个线程上并行调用这些方法，因此实现必须可重入或在内部自行同步。
pub trait ArithmeticBackend: Sync {
    type Ciphertext: Clone + Send + Sync;
    type Plaintext: Clone + Send + Sync;

    /// 密文 + 密文
    fn add(
        &self,
        lhs: &Self::Ciphertext,
        rhs: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, BackendError>;

    /// 明文 + 明文
    fn add_plain(
        &self,
        lhs: &Self::Plaintext,
        rhs: &Self::Plaintext,
    ) -> Result<Self::Plaintext, BackendError>;

    /// 密文 × 未加密的标量
    fn multiply_scalar(
        &self,
        value: &Self::Ciphertext,
        scalar: f64,
        element_type: ElementType,
    ) -> Result<Self::Ciphertext, BackendError>;

    /// 明文 × 标量
    fn multiply_plain_scalar(
        &self,
        value: &Self::Plaintext,
        scalar: f64,
        element_type: ElementType,
    ) -> Result<Self::Plaintext, BackendError>;

    /// 与`element_type`兼容的密文零值（加法单位元）
    fn create_zero_ciphertext(
        &self,
        element_type: ElementType,
    ) -> Result<Self::Ciphertext, BackendError>;

    /// 与`element_type`兼容的明文零值
    fn create_zero_plaintext(
        &self,
        element_type: ElementType,
    ) -> Result<Self::Plaintext, BackendError>;
}
