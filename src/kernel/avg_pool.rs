use log::{debug, trace};
use rayon::prelude::*;

use super::{AvgPoolConfig, PaddingPolicy};
use crate::backend::{ArithmeticBackend, CipherOps, ElementType, PlainOps, ValueOps};
use crate::coordinate::{CellKind, WindowTransform, shape_size, unflatten_index};
use crate::errors::KernelError;

/// 密文上的平均池化。
///
/// `arg`为按行优先排列的输入密文（形状`arg_shape`），只读；
/// `out`须预先分配为`product(out_shape)`个元素，每个输出坐标写入一个新的密文。
/// 后端的任何错误都原样返回，内核不做任何补救。
pub fn avg_pool<B: ArithmeticBackend>(
    arg: &[B::Ciphertext],
    out: &mut [B::Ciphertext],
    arg_shape: &[usize],
    out_shape: &[usize],
    config: &AvgPoolConfig,
    element_type: ElementType,
    backend: &B,
) -> Result<(), KernelError> {
    avg_pool_with(
        &CipherOps(backend),
        arg,
        out,
        arg_shape,
        out_shape,
        config,
        element_type,
    )
}

/// 明文编码值上的平均池化，契约与[`avg_pool`]完全相同
pub fn avg_pool_plain<B: ArithmeticBackend>(
    arg: &[B::Plaintext],
    out: &mut [B::Plaintext],
    arg_shape: &[usize],
    out_shape: &[usize],
    config: &AvgPoolConfig,
    element_type: ElementType,
    backend: &B,
) -> Result<(), KernelError> {
    avg_pool_with(
        &PlainOps(backend),
        arg,
        out,
        arg_shape,
        out_shape,
        config,
        element_type,
    )
}

/// 基于`ValueOps`的通用平均池化算法
pub fn avg_pool_with<O: ValueOps>(
    ops: &O,
    arg: &[O::Value],
    out: &mut [O::Value],
    arg_shape: &[usize],
    out_shape: &[usize],
    config: &AvgPoolConfig,
    element_type: ElementType,
) -> Result<(), KernelError> {
    let transform = config.transform(arg_shape, out_shape)?;
    check_len(arg.len(), arg_shape, "输入值的个数与arg_shape不符")?;
    check_len(out.len(), out_shape, "输出容器的大小与out_shape不符")?;

    let policy = config.padding_policy();
    debug!(
        "平均池化：arg_shape={:?}，out_shape={:?}，window_shape={:?}，strides={:?}，padding={:?}/{:?}，{:?}，{}",
        arg_shape,
        out_shape,
        config.window_shape(),
        config.window_movement_strides(),
        config.padding_below(),
        config.padding_above(),
        policy,
        element_type
    );

    out.par_iter_mut()
        .enumerate()
        .try_for_each(|(flat_index, slot)| {
            *slot = pool_window(ops, arg, &transform, flat_index, policy, element_type)?;
            Ok(())
        })
}

fn check_len(len: usize, shape: &[usize], message: &str) -> Result<(), KernelError> {
    let expected = shape_size(shape);
    if len == expected {
        Ok(())
    } else {
        Err(KernelError::ShapeMismatch {
            expected: vec![expected],
            got: vec![len],
            message: format!("{message}：形状{shape:?}"),
        })
    }
}

/// 计算单个输出坐标：累加窗口内的输入，再乘以 1/n
fn pool_window<O: ValueOps>(
    ops: &O,
    arg: &[O::Value],
    transform: &WindowTransform,
    flat_index: usize,
    policy: PaddingPolicy,
    element_type: ElementType,
) -> Result<O::Value, KernelError> {
    let mut sum: Option<O::Value> = None;
    let mut divisor = 0usize;

    for cell in transform.window_at(flat_index) {
        if !policy.counts(cell.kind) {
            continue;
        }
        divisor += 1;
        // 填充单元格等价于加零，无需任何运算
        if let CellKind::InBounds { index } = cell.kind {
            sum = Some(match sum {
                None => arg[index].clone(),
                Some(acc) => ops.add(&acc, &arg[index])?,
            });
        }
    }

    if divisor == 0 {
        return Err(KernelError::DegenerateWindow {
            output_coordinate: unflatten_index(flat_index, transform.out_shape()),
        });
    }

    let sum = match sum {
        Some(sum) => sum,
        None => {
            trace!("输出索引{flat_index}的窗口全部落在填充区，累加结果取零值");
            ops.zero(element_type)?
        }
    };
    Ok(ops.scalar_multiply(&sum, 1. / divisor as f64, element_type)?)
}
