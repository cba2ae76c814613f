use std::fmt::{self, Display};

/// 算术后端的运算类型（用于错误信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    AddPlain,
    MultiplyScalar,
    MultiplyPlainScalar,
    CreateZero,
    Encode,
}
impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operation_name = match self {
            Operator::Add => "密文相加",
            Operator::AddPlain => "明文相加",
            Operator::MultiplyScalar => "密文乘标量",
            Operator::MultiplyPlainScalar => "明文乘标量",
            Operator::CreateZero => "构造零值",
            Operator::Encode => "编码",
        };
        write!(f, "{}", operation_name)
    }
}

/// 比较运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    GreaterOrEqual,
    LessThan,
}
impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator_name = match self {
            ComparisonOperator::GreaterOrEqual => "≥",
            ComparisonOperator::LessThan => "<",
        };
        write!(f, "{}", operator_name)
    }
}
