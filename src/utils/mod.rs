/// 工具模块

#[macro_use]
pub mod log;
