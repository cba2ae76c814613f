/*
 * @Author       : 老董
 * @Date         : 2026-10-16
 * @Description  : 平均池化内核单元测试
 *
 * 测试策略：
 * 1. 语义用例对密文版与明文编码版各跑一遍（`for_both_variants!`），保证两者不分叉
 * 2. 用计数后端检验除数、乘法次数与错误时机
 * 3. 配置解析与输出形状推断
 */

use crate::backend::{
    ArithmeticBackend, ElementType, ToyCiphertext, ToyCkksBackend, ToyCkksParams, ToyPlaintext,
};
use crate::coordinate::shape_size;
use crate::errors::KernelError;
use crate::kernel::{AvgPoolConfig, avg_pool, avg_pool_plain};

/// 为每个泛型用例生成`_encrypted`与`_encoded`两个测试
macro_rules! for_both_variants {
    ($($case:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[test]
                fn [<test_ $case _encrypted>]() -> Result<(), KernelError> {
                    $case::<Encrypted>()
                }

                #[test]
                fn [<test_ $case _encoded>]() -> Result<(), KernelError> {
                    $case::<Encoded>()
                }
            )*
        }
    };
}

mod policy;

/// 被测的值类型：密文或明文编码值
trait Variant {
    type Value: Clone + Send + Sync;

    fn encode(backend: &ToyCkksBackend, x: f64) -> Result<Self::Value, KernelError>;
    fn decode(backend: &ToyCkksBackend, value: &Self::Value) -> f64;
    fn zero(backend: &ToyCkksBackend) -> Result<Self::Value, KernelError>;
    fn pool(
        arg: &[Self::Value],
        out: &mut [Self::Value],
        arg_shape: &[usize],
        out_shape: &[usize],
        config: &AvgPoolConfig,
        backend: &ToyCkksBackend,
    ) -> Result<(), KernelError>;
}

struct Encrypted;
struct Encoded;

impl Variant for Encrypted {
    type Value = ToyCiphertext;

    fn encode(backend: &ToyCkksBackend, x: f64) -> Result<ToyCiphertext, KernelError> {
        Ok(backend.encrypt(x)?)
    }

    fn decode(backend: &ToyCkksBackend, value: &ToyCiphertext) -> f64 {
        backend.decrypt(value)
    }

    fn zero(backend: &ToyCkksBackend) -> Result<ToyCiphertext, KernelError> {
        Ok(backend.create_zero_ciphertext(ElementType::F32)?)
    }

    fn pool(
        arg: &[ToyCiphertext],
        out: &mut [ToyCiphertext],
        arg_shape: &[usize],
        out_shape: &[usize],
        config: &AvgPoolConfig,
        backend: &ToyCkksBackend,
    ) -> Result<(), KernelError> {
        avg_pool(arg, out, arg_shape, out_shape, config, ElementType::F32, backend)
    }
}

impl Variant for Encoded {
    type Value = ToyPlaintext;

    fn encode(backend: &ToyCkksBackend, x: f64) -> Result<ToyPlaintext, KernelError> {
        Ok(backend.encode(x)?)
    }

    fn decode(backend: &ToyCkksBackend, value: &ToyPlaintext) -> f64 {
        backend.decode(value)
    }

    fn zero(backend: &ToyCkksBackend) -> Result<ToyPlaintext, KernelError> {
        Ok(backend.create_zero_plaintext(ElementType::F32)?)
    }

    fn pool(
        arg: &[ToyPlaintext],
        out: &mut [ToyPlaintext],
        arg_shape: &[usize],
        out_shape: &[usize],
        config: &AvgPoolConfig,
        backend: &ToyCkksBackend,
    ) -> Result<(), KernelError> {
        avg_pool_plain(arg, out, arg_shape, out_shape, config, ElementType::F32, backend)
    }
}

fn toy_backend() -> ToyCkksBackend {
    ToyCkksBackend::with_seed(ToyCkksParams::default(), 20261016)
}

/// 编码 -> 池化 -> 解码，`out_shape`显式给出
fn run_with_out_shape<V: Variant>(
    backend: &ToyCkksBackend,
    values: &[f64],
    arg_shape: &[usize],
    out_shape: &[usize],
    config: &AvgPoolConfig,
) -> Result<Vec<f64>, KernelError> {
    let arg = values
        .iter()
        .map(|&x| V::encode(backend, x))
        .collect::<Result<Vec<_>, _>>()?;
    let mut out = vec![V::zero(backend)?; shape_size(out_shape)];
    V::pool(&arg, &mut out, arg_shape, out_shape, config, backend)?;
    Ok(out.iter().map(|v| V::decode(backend, v)).collect())
}

/// 编码 -> 池化 -> 解码，`out_shape`由配置推断
fn run<V: Variant>(
    values: &[f64],
    arg_shape: &[usize],
    config: &AvgPoolConfig,
) -> Result<Vec<f64>, KernelError> {
    let out_shape = config.output_shape(arg_shape)?;
    run_with_out_shape::<V>(&toy_backend(), values, arg_shape, &out_shape, config)
}

fn assert_all_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "输出长度不符");
    for (a, e) in actual.iter().zip(expected) {
        approx::assert_abs_diff_eq!(*a, *e, epsilon = 1e-4);
    }
}
