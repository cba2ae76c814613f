/*
 * @Author       : 老董
 * @Date         : 2026-10-16
 * @Description  : 坐标迭代模块：行优先遍历形状，以及输出坐标与其池化窗口内输入坐标（或填充标记）的对应关系。
 *                 加密版与明文编码版池化内核共用此模块，二者的窗口/填充语义因此始终一致。
 */

mod row_major;
mod window;

pub use self::row_major::{RowMajor, flatten_index, shape_size, unflatten_index};
pub use self::window::{CellKind, Window, WindowCell, WindowTransform};

#[cfg(test)]
mod tests;
