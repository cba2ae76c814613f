use thiserror::Error;
mod ops;
pub use self::ops::*;

use crate::backend::ElementType;

/// 池化内核的错误类型
///
/// 形状类错误在调用任何后端运算之前即被报告；后端错误原样向上传递。
#[derive(Error, Debug, PartialEq)]
pub enum KernelError {
    // 数字比较用
    #[error("{value_name}须{operator}{threshold}")]
    ValueMustSatisfyComparison {
        value_name: String,
        operator: ComparisonOperator,
        threshold: usize,
    },
    #[error("`{name}`的维数为{got}，与输入张量的维数{expected}不一致")]
    RankMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("形状不匹配：预期{expected:?}，得到{got:?}（{message}）")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    #[error("输出坐标{output_coordinate:?}处的池化窗口有效元素数为零，无法求平均")]
    DegenerateWindow { output_coordinate: Vec<usize> },
    #[error("池化配置无效：{0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// 算术后端（同态加密引擎）的错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("{operator}时两操作数的缩放因子不一致：{left} 与 {right}")]
    ScaleMismatch {
        operator: Operator,
        left: f64,
        right: f64,
    },
    #[error("{operator}失败：乘法深度已耗尽（剩余层级为{level}）")]
    DepthExhausted { operator: Operator, level: usize },
    #[error("{operator}不支持元素类型{element_type}")]
    UnsupportedElementType {
        operator: Operator,
        element_type: ElementType,
    },
    #[error("{operator}时数值溢出：{message}")]
    Overflow { operator: Operator, message: String },
    #[error("后端内部错误：{0}")]
    Internal(String),
}
