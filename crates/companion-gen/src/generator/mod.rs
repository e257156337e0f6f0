pub mod ast;
pub mod builder;
pub mod codegen;
pub mod descriptors;
pub mod errors;
pub mod metrics;
pub mod naming;
pub mod orchestrator;
pub mod runtime;

#[cfg(test)]
mod tests;
