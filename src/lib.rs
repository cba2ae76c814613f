//! # HE Pool
//!
//! `he_pool`项目在同态加密（HE）数据上直接计算平均池化：输入张量的每个元素都是不透明的密文
//! （或已编码的明文），内核只借助后端提供的加法、乘以未加密标量与构造零值三种运算，
//! 在不解密的前提下得出每个池化窗口的平均值。
//!
//! - [`kernel`]：池化算子本体与其配置
//! - [`backend`]：算术后端接口，以及明文计数后端与玩具级 CKKS 后端
//! - [`coordinate`]：行优先坐标与窗口变换
//! - [`tensor`]：携带形状的同态张量容器
//! - [`reference`]：普通浮点数上的参考实现，用作对照
//!

pub mod backend;
pub mod coordinate;
pub mod errors;
pub mod kernel;
pub mod reference;
pub mod tensor;
pub mod utils;

pub use backend::{ArithmeticBackend, ElementType};
pub use errors::{BackendError, KernelError};
pub use kernel::{AvgPoolConfig, PaddingPolicy, avg_pool, avg_pool_plain};
pub use tensor::HeTensor;
