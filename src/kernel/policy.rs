use crate::coordinate::{CellKind, Window};

/// 填充单元格是否计入平均值的除数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingPolicy {
    /// 填充视为值为零的单元格，计入除数（只计填充后范围内的部分）
    IncludePadding,
    /// 填充单元格被跳过，不计入除数
    ExcludePadding,
}

impl PaddingPolicy {
    pub const fn from_flag(include_padding_in_avg_computation: bool) -> Self {
        if include_padding_in_avg_computation {
            Self::IncludePadding
        } else {
            Self::ExcludePadding
        }
    }

    /// 该单元格是否计入除数
    pub const fn counts(&self, kind: CellKind) -> bool {
        match kind {
            CellKind::InBounds { .. } => true,
            CellKind::Padding => matches!(self, Self::IncludePadding),
            CellKind::Clipped => false,
        }
    }

    /// 某个窗口的除数
    pub fn divisor(&self, window: Window<'_>) -> usize {
        window.filter(|cell| self.counts(cell.kind)).count()
    }
}
