//! 批处理层：配置、目录遍历与原地回写
//!
//! 标签引擎本身不做任何 IO，这里负责把文件内容交给引擎并写回结果

pub mod batch;
pub mod config;

pub use batch::{BatchDriver, BatchSummary, FileOutcome};
pub use config::DriverConfig;
