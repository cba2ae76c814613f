/// 形状中元素的总数。形状为`[]`（标量）时为1；任一维为0时为0。
pub fn shape_size(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// 将坐标按行优先（最后一维变化最快）展平为一维索引。
/// 调用方须保证`coordinate`与`shape`等长且每一维都在范围内。
pub fn flatten_index(coordinate: &[usize], shape: &[usize]) -> usize {
    debug_assert_eq!(coordinate.len(), shape.len());
    coordinate
        .iter()
        .zip(shape)
        .fold(0, |acc, (&c, &dim)| acc * dim + c)
}

/// `flatten_index`的逆运算
pub fn unflatten_index(mut index: usize, shape: &[usize]) -> Vec<usize> {
    let mut coordinate = vec![0; shape.len()];
    for (c, &dim) in coordinate.iter_mut().zip(shape).rev() {
        if dim == 0 {
            continue;
        }
        *c = index % dim;
        index /= dim;
    }
    coordinate
}

/// 按行优先顺序遍历某形状下的所有坐标（里程表式进位）。
///
/// 迭代器有限、可重复构造；不依赖任何外部状态。
#[derive(Debug, Clone)]
pub struct RowMajor {
    shape: Vec<usize>,
    next: Option<Vec<usize>>,
    remaining: usize,
}

impl RowMajor {
    pub fn new(shape: &[usize]) -> Self {
        let remaining = shape_size(shape);
        let next = if remaining == 0 {
            None
        } else {
            Some(vec![0; shape.len()])
        };
        Self {
            shape: shape.to_vec(),
            next,
            remaining,
        }
    }
}

impl Iterator for RowMajor {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.remaining -= 1;

        let mut successor = current.clone();
        for d in (0..self.shape.len()).rev() {
            successor[d] += 1;
            if successor[d] < self.shape[d] {
                self.next = Some(successor);
                break;
            }
            successor[d] = 0;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RowMajor {}
