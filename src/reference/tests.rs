use crate::assert_err;
use crate::errors::KernelError;
use crate::kernel::AvgPoolConfig;
use crate::reference::{avg_pool, avg_pool_into_shape};
use approx::assert_abs_diff_eq;
use ndarray::{ArrayD, IxDyn};

fn array(data: &[f32], shape: &[usize]) -> ArrayD<f32> {
    ArrayD::from_shape_vec(IxDyn(shape), data.to_vec()).unwrap()
}

#[test]
fn test_reference_2x2_pool() -> Result<(), KernelError> {
    #[rustfmt::skip]
    let input = array(&[
        1.0, 2.0, 3.0, 4.0,
        5.0, 6.0, 7.0, 8.0,
        9.0, 10.0, 11.0, 12.0,
        13.0, 14.0, 15.0, 16.0,
    ], &[1, 4, 4]);

    let output = avg_pool(&input, &AvgPoolConfig::new(&[1, 2, 2]))?;
    assert_eq!(output.shape(), &[1, 2, 2]);
    assert_abs_diff_eq!(output[[0, 0, 0]], 3.5, epsilon = 1e-6);
    assert_abs_diff_eq!(output[[0, 0, 1]], 5.5, epsilon = 1e-6);
    assert_abs_diff_eq!(output[[0, 1, 0]], 11.5, epsilon = 1e-6);
    assert_abs_diff_eq!(output[[0, 1, 1]], 13.5, epsilon = 1e-6);

    Ok(())
}

#[test]
fn test_reference_padding_policies() -> Result<(), KernelError> {
    let input = array(&[1., 2., 3., 4.], &[1, 1, 4]);
    let config = AvgPoolConfig::new(&[1, 1, 3])
        .with_strides(&[1, 1, 1])
        .with_padding(&[0, 0, 1], &[0, 0, 0]);

    let excluded = avg_pool(&input, &config.clone().with_include_padding(false))?;
    assert_abs_diff_eq!(excluded[[0, 0, 0]], 1.5, epsilon = 1e-6);
    assert_abs_diff_eq!(excluded[[0, 0, 1]], 2.0, epsilon = 1e-6);

    let included = avg_pool(&input, &config.with_include_padding(true))?;
    assert_abs_diff_eq!(included[[0, 0, 0]], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(included[[0, 0, 2]], 3.0, epsilon = 1e-6);

    Ok(())
}

#[test]
fn test_reference_clipped_window() -> Result<(), KernelError> {
    let input = array(&[3., 6., 9.], &[3]);
    let config = AvgPoolConfig::new(&[3])
        .with_strides(&[2])
        .with_padding(&[1], &[1])
        .with_include_padding(true);

    let output = avg_pool_into_shape(&input, &[3], &config)?;
    assert_abs_diff_eq!(output[[0]], 3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(output[[1]], 5.0, epsilon = 1e-6);
    assert_abs_diff_eq!(output[[2]], 0.0, epsilon = 1e-6);

    assert_err!(
        avg_pool_into_shape(&input, &[3], &config.with_include_padding(false)),
        KernelError::DegenerateWindow { output_coordinate } if output_coordinate == &vec![2]
    );

    Ok(())
}
