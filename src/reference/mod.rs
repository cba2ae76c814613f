//! # 参考实现
//!
//! 普通浮点数上的平均池化，直接在 `ndarray` 上按“窗口盒子”计算，
//! 与坐标迭代模块相互独立，用作同态内核的对照基准。

use ndarray::{ArrayD, Dimension, IxDyn};
use num_traits::Float;

use crate::errors::KernelError;
use crate::kernel::AvgPoolConfig;

#[cfg(test)]
mod tests;

/// 对`input`做平均池化，输出形状由[`AvgPoolConfig::output_shape`]推断
pub fn avg_pool<T: Float>(input: &ArrayD<T>, config: &AvgPoolConfig) -> Result<ArrayD<T>, KernelError> {
    let arg_shape = input.shape().to_vec();
    let out_shape = config.output_shape(&arg_shape)?;
    avg_pool_into_shape(input, &out_shape, config)
}

/// 同[`avg_pool`]，但输出形状由调用方给定（可超出推断值，以覆盖外边界被截断的窗口）
pub fn avg_pool_into_shape<T: Float>(
    input: &ArrayD<T>,
    out_shape: &[usize],
    config: &AvgPoolConfig,
) -> Result<ArrayD<T>, KernelError> {
    let arg_shape = input.shape().to_vec();
    // 借用窗口变换做维数与步长校验
    config.transform(&arg_shape, out_shape)?;

    let window = config.window_shape();
    let strides = config.window_movement_strides();
    let below = config.padding_below();
    let above = config.padding_above();
    let include_padding = config.include_padding_in_avg_computation();

    let mut output = ArrayD::<T>::zeros(IxDyn(out_shape));
    for (out_index, value) in output.indexed_iter_mut() {
        let out_coordinate = out_index.slice();

        // 每一维：窗口在输入坐标系下的 [start, end)，以及与输入、与填充后范围的交集
        let mut in_bounds_start = Vec::with_capacity(arg_shape.len());
        let mut in_bounds_extent = Vec::with_capacity(arg_shape.len());
        let mut padded_count = 1usize;
        for d in 0..arg_shape.len() {
            let start = (out_coordinate[d] * strides[d]) as isize - below[d] as isize;
            let end = start + window[d] as isize;

            let padded_end = end.min((arg_shape[d] + above[d]) as isize);
            padded_count *= (padded_end - start).max(0) as usize;

            let lo = start.max(0);
            let hi = end.min(arg_shape[d] as isize);
            in_bounds_start.push(lo as usize);
            in_bounds_extent.push((hi - lo).max(0) as usize);
        }

        let mut sum = T::zero();
        let mut in_bounds_count = 0usize;
        for offset in ndarray::indices(IxDyn(&in_bounds_extent)) {
            let coordinate: Vec<usize> = offset
                .slice()
                .iter()
                .zip(&in_bounds_start)
                .map(|(&o, &s)| o + s)
                .collect();
            sum = sum + input[&coordinate[..]];
            in_bounds_count += 1;
        }

        let divisor = if include_padding {
            padded_count
        } else {
            in_bounds_count
        };
        if divisor == 0 {
            return Err(KernelError::DegenerateWindow {
                output_coordinate: out_coordinate.to_vec(),
            });
        }
        let divisor = T::from(divisor).ok_or_else(|| {
            KernelError::InvalidConfig(format!("除数{}无法转换为元素类型", divisor))
        })?;
        *value = sum / divisor;
    }
    Ok(output)
}
