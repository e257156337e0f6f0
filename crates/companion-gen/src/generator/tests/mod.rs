mod descriptors;
mod orchestrator;
