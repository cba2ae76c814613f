use super::{ArithmeticBackend, ElementType};
use crate::errors::BackendError;

/// 池化算法所需的最小数值能力：加法、乘标量、零值。
///
/// 不提供比较、分支或除法：加密值上做不到这些。
/// 加密版与明文编码版内核都是同一个泛型算法在此 trait 上的实例化。
pub trait ValueOps: Sync {
    type Value: Clone + Send + Sync;

    fn add(&self, lhs: &Self::Value, rhs: &Self::Value) -> Result<Self::Value, BackendError>;

    fn scalar_multiply(
        &self,
        value: &Self::Value,
        scalar: f64,
        element_type: ElementType,
    ) -> Result<Self::Value, BackendError>;

    fn zero(&self, element_type: ElementType) -> Result<Self::Value, BackendError>;
}

/// 以密文为值类型的`ValueOps`
#[derive(Debug)]
pub struct CipherOps<'a, B>(pub &'a B);

/// 以明文编码值为值类型的`ValueOps`
#[derive(Debug)]
pub struct PlainOps<'a, B>(pub &'a B);

impl<B: ArithmeticBackend> ValueOps for CipherOps<'_, B> {
    type Value = B::Ciphertext;

    fn add(&self, lhs: &Self::Value, rhs: &Self::Value) -> Result<Self::Value, BackendError> {
        self.0.add(lhs, rhs)
    }

    fn scalar_multiply(
        &self,
        value: &Self::Value,
        scalar: f64,
        element_type: ElementType,
    ) -> Result<Self::Value, BackendError> {
        self.0.multiply_scalar(value, scalar, element_type)
    }

    fn zero(&self, element_type: ElementType) -> Result<Self::Value, BackendError> {
        self.0.create_zero_ciphertext(element_type)
    }
}

impl<B: ArithmeticBackend> ValueOps for PlainOps<'_, B> {
    type Value = B::Plaintext;

    fn add(&self, lhs: &Self::Value, rhs: &Self::Value) -> Result<Self::Value, BackendError> {
        self.0.add_plain(lhs, rhs)
    }

    fn scalar_multiply(
        &self,
        value: &Self::Value,
        scalar: f64,
        element_type: ElementType,
    ) -> Result<Self::Value, BackendError> {
        self.0.multiply_plain_scalar(value, scalar, element_type)
    }

    fn zero(&self, element_type: ElementType) -> Result<Self::Value, BackendError> {
        self.0.create_zero_plaintext(element_type)
    }
}
