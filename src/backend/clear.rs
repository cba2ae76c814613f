//! 不加密的参考后端：密文与明文都直接是`f64`，运算精确。
//! 附带原子计数器，便于检验内核调用后端的次数。

use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ArithmeticBackend, ElementType};
use crate::errors::BackendError;

#[derive(Debug, Default)]
pub struct ClearBackend {
    additions: AtomicUsize,
    multiplications: AtomicUsize,
    zeros: AtomicUsize,
}

impl ClearBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已执行的加法次数（密文与明文合计）
    pub fn additions(&self) -> usize {
        self.additions.load(Ordering::Relaxed)
    }

    /// 已执行的乘标量次数（密文与明文合计）
    pub fn multiplications(&self) -> usize {
        self.multiplications.load(Ordering::Relaxed)
    }

    /// 已构造的零值个数
    pub fn zeros(&self) -> usize {
        self.zeros.load(Ordering::Relaxed)
    }

    pub fn reset_counters(&self) {
        self.additions.store(0, Ordering::Relaxed);
        self.multiplications.store(0, Ordering::Relaxed);
        self.zeros.store(0, Ordering::Relaxed);
    }
}

impl ArithmeticBackend for ClearBackend {
    type Ciphertext = f64;
    type Plaintext = f64;

    fn add(&self, lhs: &f64, rhs: &f64) -> Result<f64, BackendError> {
        self.additions.fetch_add(1, Ordering::Relaxed);
        Ok(lhs + rhs)
    }

    fn add_plain(&self, lhs: &f64, rhs: &f64) -> Result<f64, BackendError> {
        self.add(lhs, rhs)
    }

    fn multiply_scalar(
        &self,
        value: &f64,
        scalar: f64,
        _element_type: ElementType,
    ) -> Result<f64, BackendError> {
        self.multiplications.fetch_add(1, Ordering::Relaxed);
        Ok(value * scalar)
    }

    fn multiply_plain_scalar(
        &self,
        value: &f64,
        scalar: f64,
        element_type: ElementType,
    ) -> Result<f64, BackendError> {
        self.multiply_scalar(value, scalar, element_type)
    }

    fn create_zero_ciphertext(&self, _element_type: ElementType) -> Result<f64, BackendError> {
        self.zeros.fetch_add(1, Ordering::Relaxed);
        Ok(0.)
    }

    fn create_zero_plaintext(&self, element_type: ElementType) -> Result<f64, BackendError> {
        self.create_zero_ciphertext(element_type)
    }
}
