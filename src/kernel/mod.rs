/*
 * @Author       : 老董
 * @Date         : 2026-10-16
 * @Description  : 同态加密下的平均池化内核
 *
 * 设计决策：
 * - 加密版（密文）与明文编码版共用一个泛型算法，二者的窗口/步长/填充语义不可能分叉
 * - 除法用“乘以未加密的标量 1/n”代替：加密方案无法在密文上做除法
 * - 填充是否计入除数，在调用入口一次性转换为 `PaddingPolicy`
 * - 使用 Rayon 在输出坐标上并行：各输出坐标写入位置互不相交，输入只读共享
 */

mod avg_pool;
mod config;
mod policy;

pub use self::avg_pool::{avg_pool, avg_pool_plain, avg_pool_with};
pub use self::config::AvgPoolConfig;
pub use self::policy::PaddingPolicy;

#[cfg(test)]
mod tests;
