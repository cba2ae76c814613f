use ndarray::{Array, ArrayD, IxDyn};

use crate::backend::{ArithmeticBackend, CipherOps, ElementType, PlainOps, ValueOps};
use crate::coordinate::{flatten_index, shape_size};
use crate::errors::KernelError;
use crate::kernel::{AvgPoolConfig, avg_pool_with};


/// 同态加密张量：形状 + 按行优先排列的一组不透明值（密文或明文编码值）。
/// 形状为`[]`时为标量，只含一个值。
#[derive(Debug, Clone, PartialEq)]
pub struct HeTensor<V> {
    shape: Vec<usize>,
    values: Vec<V>,
}

impl<V> HeTensor<V> {
    /// `values`的个数必须等于`shape`中所有元素的乘积
    pub fn new(values: Vec<V>, shape: &[usize]) -> Result<Self, KernelError> {
        let expected = shape_size(shape);
        if values.len() != expected {
            return Err(KernelError::ShapeMismatch {
                expected: vec![expected],
                got: vec![values.len()],
                message: format!("值的个数与形状{shape:?}不符"),
            });
        }
        Ok(Self {
            shape: shape.to_vec(),
            values,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// 张量的维（dim）数、阶（rank）数
    pub fn dimension(&self) -> usize {
        self.shape.len()
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn into_values(self) -> Vec<V> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 按坐标取值；坐标维数不符或越界时返回`None`
    pub fn get(&self, coordinate: &[usize]) -> Option<&V> {
        if coordinate.len() != self.shape.len()
            || coordinate.iter().zip(&self.shape).any(|(&c, &dim)| c >= dim)
        {
            return None;
        }
        self.values.get(flatten_index(coordinate, &self.shape))
    }

    /// 逐元素变换（如加密、解密、编码），形状不变
    pub fn try_map<U, E>(&self, f: impl FnMut(&V) -> Result<U, E>) -> Result<HeTensor<U>, E> {
        let values = self.values.iter().map(f).collect::<Result<Vec<_>, _>>()?;
        Ok(HeTensor {
            shape: self.shape.clone(),
            values,
        })
    }

    pub fn map<U>(&self, f: impl FnMut(&V) -> U) -> HeTensor<U> {
        HeTensor {
            shape: self.shape.clone(),
            values: self.values.iter().map(f).collect(),
        }
    }
}

impl<V: Clone> HeTensor<V> {
    pub fn from_array(array: &ArrayD<V>) -> Self {
        Self {
            shape: array.shape().to_vec(),
            values: array.iter().cloned().collect(),
        }
    }

    pub fn to_array(&self) -> Result<ArrayD<V>, KernelError> {
        Array::from_shape_vec(IxDyn(&self.shape), self.values.clone()).map_err(|e| {
            KernelError::ShapeMismatch {
                expected: self.shape.clone(),
                got: vec![self.values.len()],
                message: e.to_string(),
            }
        })
    }
}

impl<V: Clone + Send + Sync> HeTensor<V> {
    /// 按`config`推断输出形状，用`ops`的零值预分配输出，然后执行平均池化
    pub fn avg_pool_with<O: ValueOps<Value = V>>(
        &self,
        ops: &O,
        config: &AvgPoolConfig,
        element_type: ElementType,
    ) -> Result<Self, KernelError> {
        let out_shape = config.output_shape(&self.shape)?;
        let zero = ops.zero(element_type)?;
        let mut out = vec![zero; shape_size(&out_shape)];
        avg_pool_with(
            ops,
            &self.values,
            &mut out,
            &self.shape,
            &out_shape,
            config,
            element_type,
        )?;
        Ok(Self {
            shape: out_shape,
            values: out,
        })
    }

    /// 密文张量上的平均池化
    pub fn avg_pool_encrypted<B>(
        &self,
        config: &AvgPoolConfig,
        element_type: ElementType,
        backend: &B,
    ) -> Result<Self, KernelError>
    where
        B: ArithmeticBackend<Ciphertext = V>,
    {
        self.avg_pool_with(&CipherOps(backend), config, element_type)
    }

    /// 明文编码张量上的平均池化
    pub fn avg_pool_encoded<B>(
        &self,
        config: &AvgPoolConfig,
        element_type: ElementType,
        backend: &B,
    ) -> Result<Self, KernelError>
    where
        B: ArithmeticBackend<Plaintext = V>,
    {
        self.avg_pool_with(&PlainOps(backend), config, element_type)
    }
}
