pub mod ark;
pub mod base;
pub mod configs;
pub mod factory;
pub mod openai_compatible;
pub mod qwen;
pub mod utils;

#[cfg(test)]
pub mod mock;
