pub mod descriptors;

pub use descriptors::DescriptorLoader;
