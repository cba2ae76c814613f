use super::row_major::{RowMajor, shape_size, unflatten_index};
use crate::errors::{ComparisonOperator, KernelError};

/// 窗口内某个单元格相对于输入张量的位置分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// 落在输入张量内，`index`为其在输入（行优先）中的展平索引
    InBounds { index: usize },
    /// 落在填充区内：位于`[-padding_below, arg_shape + padding_above)`之内，但不在输入张量内
    Padding,
    /// 超出了填充后的范围（只可能出现在外边界）
    Clipped,
}

/// 池化窗口中的一个单元格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCell {
    /// 窗口内的相对偏移`w`
    pub offset: Vec<usize>,
    /// 对应的输入坐标`i = o ⊙ stride + w - padding_below`（可能为负）
    pub coordinate: Vec<isize>,
    pub kind: CellKind,
}

/// 输出坐标到池化窗口的变换。
///
/// 构造时一次性校验各形状参数的维数；之后任一输出坐标的窗口都可以仅凭
/// `(o, w)`重新推导，不存在隐藏的迭代状态，因此可以被多个线程并行使用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTransform {
    arg_shape: Vec<usize>,
    out_shape: Vec<usize>,
    window_shape: Vec<usize>,
    strides: Vec<usize>,
    padding_below: Vec<usize>,
    padding_above: Vec<usize>,
}

impl WindowTransform {
    pub fn new(
        arg_shape: &[usize],
        out_shape: &[usize],
        window_shape: &[usize],
        window_movement_strides: &[usize],
        padding_below: &[usize],
        padding_above: &[usize],
    ) -> Result<Self, KernelError> {
        let rank = arg_shape.len();
        for (name, sequence) in [
            ("out_shape", out_shape),
            ("window_shape", window_shape),
            ("window_movement_strides", window_movement_strides),
            ("padding_below", padding_below),
            ("padding_above", padding_above),
        ] {
            if sequence.len() != rank {
                return Err(KernelError::RankMismatch {
                    name: name.to_string(),
                    expected: rank,
                    got: sequence.len(),
                });
            }
        }
        if window_movement_strides.iter().any(|&s| s == 0) {
            return Err(KernelError::ValueMustSatisfyComparison {
                value_name: "window_movement_strides的每个元素".to_string(),
                operator: ComparisonOperator::GreaterOrEqual,
                threshold: 1,
            });
        }

        Ok(Self {
            arg_shape: arg_shape.to_vec(),
            out_shape: out_shape.to_vec(),
            window_shape: window_shape.to_vec(),
            strides: window_movement_strides.to_vec(),
            padding_below: padding_below.to_vec(),
            padding_above: padding_above.to_vec(),
        })
    }

    pub fn rank(&self) -> usize {
        self.arg_shape.len()
    }

    pub fn arg_shape(&self) -> &[usize] {
        &self.arg_shape
    }

    pub fn out_shape(&self) -> &[usize] {
        &self.out_shape
    }

    pub fn window_shape(&self) -> &[usize] {
        &self.window_shape
    }

    /// 输出元素个数
    pub fn output_count(&self) -> usize {
        shape_size(&self.out_shape)
    }

    /// 窗口内单元格个数（即`product(window_shape)`）
    pub fn window_size(&self) -> usize {
        shape_size(&self.window_shape)
    }

    /// 按行优先顺序遍历所有输出坐标；每次调用都返回一个新的迭代器
    pub fn output_coordinates(&self) -> RowMajor {
        RowMajor::new(&self.out_shape)
    }

    /// 输出坐标`output`对应的窗口（惰性、按行优先遍历`window_shape`）
    pub fn window(&self, output: &[usize]) -> Window<'_> {
        debug_assert_eq!(output.len(), self.rank());
        let origin = output
            .iter()
            .zip(&self.strides)
            .map(|(&o, &s)| o * s)
            .collect();
        Window {
            transform: self,
            origin,
            offsets: RowMajor::new(&self.window_shape),
        }
    }

    /// 由展平的输出索引重新推导其窗口
    pub fn window_at(&self, flat_output_index: usize) -> Window<'_> {
        self.window(&unflatten_index(flat_output_index, &self.out_shape))
    }

    /// `origin`为填充后坐标系下的窗口起点（即`o ⊙ stride`）
    fn classify(&self, origin: &[usize], offset: &[usize]) -> CellKind {
        let mut index = 0;
        let mut in_bounds = true;
        for d in 0..self.rank() {
            let padded = origin[d] + offset[d];
            let (below, dim) = (self.padding_below[d], self.arg_shape[d]);
            if padded >= below + dim + self.padding_above[d] {
                return CellKind::Clipped;
            }
            if padded < below || padded - below >= dim {
                in_bounds = false;
            } else if in_bounds {
                index = index * dim + (padded - below);
            }
        }
        if in_bounds {
            CellKind::InBounds { index }
        } else {
            CellKind::Padding
        }
    }
}

/// 单个输出坐标的池化窗口
#[derive(Debug, Clone)]
pub struct Window<'a> {
    transform: &'a WindowTransform,
    origin: Vec<usize>,
    offsets: RowMajor,
}

impl Iterator for Window<'_> {
    type Item = WindowCell;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offsets.next()?;
        let kind = self.transform.classify(&self.origin, &offset);
        let coordinate = self
            .origin
            .iter()
            .zip(&offset)
            .zip(&self.transform.padding_below)
            .map(|((&o, &w), &below)| (o + w) as isize - below as isize)
            .collect();
        Some(WindowCell {
            offset,
            coordinate,
            kind,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl ExactSizeIterator for Window<'_> {}
