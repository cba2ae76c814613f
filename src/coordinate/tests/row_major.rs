use crate::coordinate::{RowMajor, flatten_index, shape_size, unflatten_index};

#[test]
fn test_shape_size() {
    assert_eq!(shape_size(&[]), 1);
    assert_eq!(shape_size(&[4]), 4);
    assert_eq!(shape_size(&[2, 3, 4]), 24);
    assert_eq!(shape_size(&[2, 0, 4]), 0);
}

#[test]
fn test_row_major_order() {
    let coordinates: Vec<_> = RowMajor::new(&[2, 3]).collect();
    assert_eq!(
        coordinates,
        vec![
            vec![0, 0],
            vec![0, 1],
            vec![0, 2],
            vec![1, 0],
            vec![1, 1],
            vec![1, 2],
        ]
    );
}

#[test]
fn test_row_major_scalar_and_empty() {
    // 标量形状只有一个（空）坐标
    let scalar: Vec<_> = RowMajor::new(&[]).collect();
    assert_eq!(scalar, vec![Vec::<usize>::new()]);

    // 含0维的形状没有坐标
    assert_eq!(RowMajor::new(&[3, 0, 2]).count(), 0);
}

#[test]
fn test_row_major_exact_size() {
    let mut iter = RowMajor::new(&[2, 2, 3]);
    assert_eq!(iter.len(), 12);
    iter.next();
    iter.next();
    assert_eq!(iter.len(), 10);
}

#[test]
fn test_flatten_matches_iteration_order() {
    let shape = [3, 1, 4, 2];
    for (expected, coordinate) in RowMajor::new(&shape).enumerate() {
        assert_eq!(flatten_index(&coordinate, &shape), expected);
        assert_eq!(unflatten_index(expected, &shape), coordinate);
    }
}
