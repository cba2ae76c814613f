use super::*;
use crate::coordinate::{CellKind, WindowTransform};
use crate::kernel::PaddingPolicy;

#[test]
fn test_policy_from_flag() {
    assert_eq!(PaddingPolicy::from_flag(true), PaddingPolicy::IncludePadding);
    assert_eq!(PaddingPolicy::from_flag(false), PaddingPolicy::ExcludePadding);
}

#[test]
fn test_policy_counts() {
    let in_bounds = CellKind::InBounds { index: 3 };
    for policy in [PaddingPolicy::IncludePadding, PaddingPolicy::ExcludePadding] {
        assert!(policy.counts(in_bounds));
        assert!(!policy.counts(CellKind::Clipped));
    }
    assert!(PaddingPolicy::IncludePadding.counts(CellKind::Padding));
    assert!(!PaddingPolicy::ExcludePadding.counts(CellKind::Padding));
}

#[test]
fn test_policy_divisor() -> Result<(), KernelError> {
    // 输入 3，上下各填充 1，窗口 3，步长 2，输出形状故意取 3 以产生越界单元格
    let transform = WindowTransform::new(&[3], &[3], &[3], &[2], &[1], &[1])?;

    let include: Vec<_> = (0..3)
        .map(|o| PaddingPolicy::IncludePadding.divisor(transform.window_at(o)))
        .collect();
    let exclude: Vec<_> = (0..3)
        .map(|o| PaddingPolicy::ExcludePadding.divisor(transform.window_at(o)))
        .collect();

    assert_eq!(include, vec![3, 3, 1]);
    assert_eq!(exclude, vec![2, 2, 0]);
    Ok(())
}
