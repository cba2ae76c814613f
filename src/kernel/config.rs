use serde::{Deserialize, Serialize};

use super::PaddingPolicy;
use crate::coordinate::WindowTransform;
use crate::errors::{ComparisonOperator, KernelError};

/// 平均池化的参数（窗口、步长、填充、填充是否计入除数）。
///
/// 序列化为 JSON 时，`window_movement_strides` 缺省（或为空）即等于 `window_shape`，
/// `padding_below`/`padding_above` 缺省即全零，`include_padding_in_avg_computation` 缺省为 `false`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvgPoolConfig {
    window_shape: Vec<usize>,
    #[serde(default)]
    window_movement_strides: Vec<usize>,
    #[serde(default)]
    padding_below: Vec<usize>,
    #[serde(default)]
    padding_above: Vec<usize>,
    #[serde(default)]
    include_padding_in_avg_computation: bool,
}

impl AvgPoolConfig {
    /// 步长默认等于窗口大小，无填充，填充不计入除数
    pub fn new(window_shape: &[usize]) -> Self {
        Self {
            window_shape: window_shape.to_vec(),
            window_movement_strides: window_shape.to_vec(),
            padding_below: vec![0; window_shape.len()],
            padding_above: vec![0; window_shape.len()],
            include_padding_in_avg_computation: false,
        }
    }

    pub fn with_strides(mut self, window_movement_strides: &[usize]) -> Self {
        self.window_movement_strides = window_movement_strides.to_vec();
        self
    }

    pub fn with_padding(mut self, padding_below: &[usize], padding_above: &[usize]) -> Self {
        self.padding_below = padding_below.to_vec();
        self.padding_above = padding_above.to_vec();
        self
    }

    pub fn with_include_padding(mut self, include_padding_in_avg_computation: bool) -> Self {
        self.include_padding_in_avg_computation = include_padding_in_avg_computation;
        self
    }

    pub fn window_shape(&self) -> &[usize] {
        &self.window_shape
    }

    pub fn window_movement_strides(&self) -> &[usize] {
        &self.window_movement_strides
    }

    pub fn padding_below(&self) -> &[usize] {
        &self.padding_below
    }

    pub fn padding_above(&self) -> &[usize] {
        &self.padding_above
    }

    pub fn include_padding_in_avg_computation(&self) -> bool {
        self.include_padding_in_avg_computation
    }

    pub fn padding_policy(&self) -> PaddingPolicy {
        PaddingPolicy::from_flag(self.include_padding_in_avg_computation)
    }

    pub fn from_json(json: &str) -> Result<Self, KernelError> {
        let mut config: Self =
            serde_json::from_str(json).map_err(|e| KernelError::InvalidConfig(e.to_string()))?;
        let rank = config.window_shape.len();
        if config.window_movement_strides.is_empty() {
            config.window_movement_strides = config.window_shape.clone();
        }
        if config.padding_below.is_empty() {
            config.padding_below = vec![0; rank];
        }
        if config.padding_above.is_empty() {
            config.padding_above = vec![0; rank];
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, KernelError> {
        serde_json::to_string(self).map_err(|e| KernelError::InvalidConfig(e.to_string()))
    }

    /// 为给定的输入形状和输出形状构造窗口变换（校验维数与步长）
    pub fn transform(
        &self,
        arg_shape: &[usize],
        out_shape: &[usize],
    ) -> Result<WindowTransform, KernelError> {
        WindowTransform::new(
            arg_shape,
            out_shape,
            &self.window_shape,
            &self.window_movement_strides,
            &self.padding_below,
            &self.padding_above,
        )
    }

    /// 推断输出形状：`out_d = (arg_d + padding_below_d + padding_above_d - window_d) / stride_d + 1`
    ///
    /// 填充不计入除数时，还要求每一维的填充都小于窗口，否则会出现完全落在填充区内、除数为零的窗口。
    pub fn output_shape(&self, arg_shape: &[usize]) -> Result<Vec<usize>, KernelError> {
        // 借用窗口变换的维数与步长校验
        self.transform(arg_shape, arg_shape)?;

        if self.window_shape.iter().any(|&w| w == 0) {
            return Err(KernelError::ValueMustSatisfyComparison {
                value_name: "window_shape的每个元素".to_string(),
                operator: ComparisonOperator::GreaterOrEqual,
                threshold: 1,
            });
        }

        let padded_shape: Vec<usize> = arg_shape
            .iter()
            .zip(&self.padding_below)
            .zip(&self.padding_above)
            .map(|((&dim, &below), &above)| dim + below + above)
            .collect();
        if padded_shape
            .iter()
            .zip(&self.window_shape)
            .any(|(&padded, &window)| window > padded)
        {
            return Err(KernelError::ShapeMismatch {
                expected: padded_shape,
                got: self.window_shape.clone(),
                message: "池化窗口超出了填充后的输入".to_string(),
            });
        }

        if !self.include_padding_in_avg_computation {
            for (d, &window) in self.window_shape.iter().enumerate() {
                for (name, padding) in [
                    ("padding_below", self.padding_below[d]),
                    ("padding_above", self.padding_above[d]),
                ] {
                    if padding >= window {
                        return Err(KernelError::ValueMustSatisfyComparison {
                            value_name: format!("填充不计入除数时，{name}[{d}]"),
                            operator: ComparisonOperator::LessThan,
                            threshold: window,
                        });
                    }
                }
            }
        }

        Ok(padded_shape
            .iter()
            .zip(&self.window_shape)
            .zip(&self.window_movement_strides)
            .map(|((&padded, &window), &stride)| (padded - window) / stride + 1)
            .collect())
    }
}
